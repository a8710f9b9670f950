//! Seam to the external workflow engine that performs the actual work.

use async_trait::async_trait;

use crate::error::EngineError;

/// Starts jobs on the external workflow engine.
///
/// Implementations make exactly one outbound call per invocation and do not
/// retry. The returned value is the engine's response body, which is
/// expected to carry the freshly minted job identifier.
#[async_trait]
pub trait WorkflowEngine: Send + Sync {
    async fn start_job(&self) -> Result<serde_json::Value, EngineError>;
}
