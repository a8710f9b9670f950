//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// The `?jobId=` parameter carried by the result callback and status polls.
///
/// `job_id` is accepted as an alias. A missing parameter reads as empty and
/// is rejected by the lifecycle service.
#[derive(Debug, Default, Deserialize)]
pub struct JobIdParams {
    #[serde(rename = "jobId", alias = "job_id")]
    pub job_id: Option<String>,
}

impl JobIdParams {
    pub fn job_id(&self) -> &str {
        self.job_id.as_deref().unwrap_or_default()
    }
}
