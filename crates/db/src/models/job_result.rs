//! `job_results` row model.

use relay_core::store::JobRecord;
use relay_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `job_results` table.
#[derive(Debug, Clone, FromRow)]
pub struct JobResult {
    pub id: i64,
    pub job_id: String,
    pub done: bool,
    pub raw: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row returned by an upsert, flagged with whether it was newly inserted.
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedJobResult {
    #[sqlx(flatten)]
    pub row: JobResult,
    pub inserted: bool,
}

impl From<JobResult> for JobRecord {
    fn from(row: JobResult) -> Self {
        Self {
            job_id: row.job_id,
            done: row.done,
            raw: row.raw,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
