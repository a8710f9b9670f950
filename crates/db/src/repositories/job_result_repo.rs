//! Repository for the `job_results` table.

use relay_core::types::Timestamp;
use sqlx::PgPool;

use crate::like::prefix_pattern;
use crate::models::job_result::{JobResult, UpsertedJobResult};

const COLUMNS: &str = "id, job_id, done, raw, created_at, updated_at";

/// Provides upsert, lookup, and retention operations for job results.
pub struct JobResultRepo;

impl JobResultRepo {
    /// Insert the result for `job_id`, or overwrite `done`/`raw` on an
    /// existing row. `created_at` survives the overwrite.
    pub async fn upsert(
        pool: &PgPool,
        job_id: &str,
        done: bool,
        raw: &serde_json::Value,
        now: Timestamp,
    ) -> Result<UpsertedJobResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO job_results (job_id, done, raw, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) \
             ON CONFLICT (job_id) DO UPDATE \
                SET done = EXCLUDED.done, raw = EXCLUDED.raw, updated_at = EXCLUDED.updated_at \
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        sqlx::query_as::<_, UpsertedJobResult>(&query)
            .bind(job_id)
            .bind(done)
            .bind(raw)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find the row whose `job_id` equals `job_id`, or else the first row
    /// whose `job_id` starts with it literally.
    ///
    /// The prefix is escaped before use, so `%` and `_` inside `job_id`
    /// never act as wildcards.
    pub async fn find_by_job_id_or_prefix(
        pool: &PgPool,
        job_id: &str,
    ) -> Result<Option<JobResult>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM job_results \
             WHERE job_id = $1 OR job_id LIKE $2 ESCAPE '\\' \
             ORDER BY (job_id = $1) DESC, job_id COLLATE \"C\" \
             LIMIT 1"
        );
        sqlx::query_as::<_, JobResult>(&query)
            .bind(job_id)
            .bind(prefix_pattern(job_id))
            .fetch_optional(pool)
            .await
    }

    /// Delete rows last updated before `cutoff`. Returns the count removed.
    pub async fn delete_older_than(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM job_results WHERE updated_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
