pub mod health;
pub mod jobs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /jobs/start                     start a job on the engine (GET)
/// /jobs/result?jobId=             completion callback (POST)
/// /jobs/status?jobId=             completion poll (GET)
///
/// /start-n8n                      legacy alias of /jobs/start
/// /save-result?jobId=             legacy alias of /jobs/result
/// /status-n8n?jobId=              legacy alias of /jobs/status
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/jobs", jobs::router())
        .merge(jobs::legacy_router())
}
