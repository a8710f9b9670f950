//! Shared response body types for API handlers.

use serde::Serialize;

/// `{ "success": true }` acknowledgement for the result callback.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
