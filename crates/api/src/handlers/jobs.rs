//! Handlers for the job relay endpoints.
//!
//! Start a job on the workflow engine, receive its completion callback, and
//! answer status polls.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use relay_core::lifecycle::{require_job_id, JobStatus};
use relay_core::store::PutOutcome;

use crate::error::{AppError, AppResult};
use crate::query::JobIdParams;
use crate::response::SuccessResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Start
// ---------------------------------------------------------------------------

/// GET /api/jobs/start
///
/// Ask the workflow engine to start a job. The engine's response, which
/// carries the new job identifier, is returned verbatim.
pub async fn start_job(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let body = state.service.start_job().await?;

    tracing::info!(job_id = ?body.get("jobId"), "Job started on workflow engine");

    Ok(Json(body))
}

// ---------------------------------------------------------------------------
// Result callback
// ---------------------------------------------------------------------------

/// POST /api/jobs/result?jobId=...
///
/// Completion callback from the workflow engine. The body is stored as-is
/// and replaces any earlier result for the same job. An empty body is
/// stored as `{}`.
pub async fn save_result(
    State(state): State<AppState>,
    query: Result<Query<JobIdParams>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<SuccessResponse>> {
    let Query(params) = query?;
    let job_id = require_job_id(params.job_id())?;
    let body = body?;

    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Object(Default::default())
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Request body is not valid JSON: {e}")))?
    };

    let outcome = state.service.ingest_result(job_id, payload).await?;

    match outcome {
        PutOutcome::Inserted => {
            tracing::info!(job_id, bytes = body.len(), "Saved job result");
        }
        PutOutcome::Replaced => {
            tracing::warn!(
                job_id,
                bytes = body.len(),
                "Job result redelivered; previous result replaced",
            );
        }
    }

    Ok(Json(SuccessResponse::ok()))
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// GET /api/jobs/status?jobId=...
///
/// Poll for completion. Unknown and still-running jobs both report
/// `{ "done": false }`.
pub async fn job_status(
    State(state): State<AppState>,
    query: Result<Query<JobIdParams>, QueryRejection>,
) -> AppResult<Json<JobStatus>> {
    let Query(params) = query?;
    let status = state.service.get_status(params.job_id()).await?;

    tracing::debug!(job_id = params.job_id(), done = status.done, "Job status polled");

    Ok(Json(status))
}
