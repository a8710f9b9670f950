use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_core::error::JobError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`JobError`] for lifecycle failures and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent
/// `{ "error": ..., "code": ... }` bodies; server-side details are logged,
/// never returned.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A lifecycle error from `relay_core`.
    #[error(transparent)]
    Job(#[from] JobError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An extractor could not read the request (malformed query string,
    /// body over the size limit).
    #[error("Rejected request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Job(job) => match job {
                JobError::MissingJobId => (
                    StatusCode::BAD_REQUEST,
                    "MISSING_JOB_ID",
                    "Missing jobId query parameter".to_string(),
                ),
                JobError::InvalidJobId => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_JOB_ID",
                    "jobId must not contain NUL characters".to_string(),
                ),
                JobError::UpstreamStartFailure(err) => {
                    tracing::error!(error = %err, "Failed to start job on workflow engine");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "UPSTREAM_START_FAILED",
                        "Failed to start the job on the workflow engine".to_string(),
                    )
                }
                JobError::PersistFailure(err) => {
                    tracing::error!(error = %err, "Failed to persist job result");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "PERSIST_FAILED",
                        "Failed to save the job result".to_string(),
                    )
                }
                JobError::StoreUnavailable(err) => {
                    tracing::error!(error = %err, "Failed to query job store");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORE_UNAVAILABLE",
                        "Failed to query job status".to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Rejected { status, message } => {
                let code = match *status {
                    StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
                    s if s.is_server_error() => "INTERNAL_ERROR",
                    _ => "BAD_REQUEST",
                };
                if status.is_server_error() {
                    tracing::error!(error = %message, "Failed to read request");
                    (*status, code, "An internal error occurred".to_string())
                } else {
                    (*status, code, message.clone())
                }
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
