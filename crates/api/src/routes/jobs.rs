//! Route definitions for the `/jobs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET    /start              -> start_job
/// POST   /result?jobId=      -> save_result
/// GET    /status?jobId=      -> job_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", get(jobs::start_job))
        .route("/result", post(jobs::save_result))
        .route("/status", get(jobs::job_status))
}

/// Paths already configured in deployed engine workflows and front-ends.
///
/// ```text
/// GET    /start-n8n          -> start_job
/// POST   /save-result        -> save_result
/// GET    /status-n8n         -> job_status
/// ```
pub fn legacy_router() -> Router<AppState> {
    Router::new()
        .route("/start-n8n", get(jobs::start_job))
        .route("/save-result", post(jobs::save_result))
        .route("/status-n8n", get(jobs::job_status))
}
