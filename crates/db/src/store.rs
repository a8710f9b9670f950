//! Durable [`JobStore`] on PostgreSQL.

use async_trait::async_trait;
use relay_core::error::StoreError;
use relay_core::store::{JobRecord, JobStore, PutOutcome};
use relay_core::types::Timestamp;

use crate::repositories::JobResultRepo;
use crate::DbPool;

/// PostgreSQL error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// [`JobStore`] backed by the `job_results` table.
#[derive(Clone)]
pub struct PgJobStore {
    pool: DbPool,
}

impl PgJobStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn put(&self, record: JobRecord) -> Result<PutOutcome, StoreError> {
        let upserted = JobResultRepo::upsert(
            &self.pool,
            &record.job_id,
            record.done,
            &record.raw,
            record.updated_at,
        )
        .await
        .map_err(classify_sqlx_error)?;

        tracing::debug!(
            job_id = %upserted.row.job_id,
            row_id = upserted.row.id,
            inserted = upserted.inserted,
            "Upserted job result",
        );

        Ok(if upserted.inserted {
            PutOutcome::Inserted
        } else {
            PutOutcome::Replaced
        })
    }

    async fn get(&self, job_id: &str) -> Result<Option<JobRecord>, StoreError> {
        let row = JobResultRepo::find_by_job_id_or_prefix(&self.pool, job_id)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(row.map(JobRecord::from))
    }

    async fn purge_older_than(&self, cutoff: Timestamp) -> Result<u64, StoreError> {
        let purged = JobResultRepo::delete_older_than(&self.pool, cutoff)
            .await
            .map_err(classify_sqlx_error)?;
        if purged > 0 {
            tracing::info!(purged, %cutoff, "Purged expired job results");
        }
        Ok(purged)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Classify a sqlx error into a [`StoreError`].
///
/// - Unique constraint violations map to `ConstraintViolation`.
/// - Everything else (connectivity, credentials, pool timeouts, bad rows)
///   maps to `Unavailable`.
fn classify_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown");
            return StoreError::ConstraintViolation(format!(
                "Duplicate value violates unique constraint: {constraint}"
            ));
        }
    }
    StoreError::Unavailable(err.to_string())
}
