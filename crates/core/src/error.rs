/// Failures reported by a [`JobStore`](crate::store::JobStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or rejected our credentials.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the write because of a uniqueness rule.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Failures reported by a [`WorkflowEngine`](crate::engine::WorkflowEngine).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The request never produced a response (network, DNS, TLS, timeout).
    #[error("Engine request failed: {0}")]
    Request(String),

    /// The engine answered with a non-2xx status.
    #[error("Engine returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The engine answered 2xx but the body was not JSON.
    #[error("Engine response could not be decoded: {0}")]
    Decode(String),
}

/// Errors surfaced by [`JobLifecycleService`](crate::lifecycle::JobLifecycleService).
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("Missing job identifier")]
    MissingJobId,

    /// The identifier contains characters no store can hold (NUL).
    #[error("Invalid job identifier")]
    InvalidJobId,

    #[error("Failed to start job on the workflow engine: {0}")]
    UpstreamStartFailure(#[source] EngineError),

    #[error("Failed to persist job result: {0}")]
    PersistFailure(#[source] StoreError),

    #[error("Failed to query job status: {0}")]
    StoreUnavailable(#[source] StoreError),
}
