//! Integration tests for the PostgreSQL job store.
//!
//! Exercises `PgJobStore` against a real database:
//! - Upsert insert vs. overwrite
//! - Exact and escaped-prefix lookup
//! - Retention purge

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use relay_core::store::{JobRecord, JobStore, PutOutcome};
use relay_db::repositories::JobResultRepo;
use relay_db::store::PgJobStore;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn put(store: &PgJobStore, job_id: &str, raw: serde_json::Value) -> PutOutcome {
    store
        .put(JobRecord::completed(job_id, raw, Utc::now()))
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn put_inserts_then_replaces(pool: PgPool) {
    let store = PgJobStore::new(pool.clone());

    assert_eq!(put(&store, "JOB-1", json!({"v": 1})).await, PutOutcome::Inserted);
    let first = store.get("JOB-1").await.unwrap().unwrap();

    assert_eq!(put(&store, "JOB-1", json!({"v": 2})).await, PutOutcome::Replaced);
    let second = store.get("JOB-1").await.unwrap().unwrap();

    assert!(second.done);
    assert_eq!(second.raw, json!({"v": 2}));
    assert_eq!(second.created_at, first.created_at);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM job_results")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn raw_string_payload_round_trips(pool: PgPool) {
    let store = PgJobStore::new(pool);
    let raw = json!("{\"message\": \"{}\"}");

    put(&store, "JOB-1", raw.clone()).await;

    assert_eq!(store.get("JOB-1").await.unwrap().unwrap().raw, raw);
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_job_is_none(pool: PgPool) {
    let store = PgJobStore::new(pool);
    assert_matches!(store.get("JOB-missing").await, Ok(None));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn prefix_tolerates_trailing_newline(pool: PgPool) {
    let store = PgJobStore::new(pool);
    put(&store, "JOB-42\n", json!({})).await;

    let record = store.get("JOB-42").await.unwrap().unwrap();
    assert_eq!(record.job_id, "JOB-42\n");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn exact_match_preferred_over_prefix(pool: PgPool) {
    let store = PgJobStore::new(pool);
    put(&store, "JOB-10", json!("long")).await;
    put(&store, "JOB-1", json!("short")).await;

    let record = store.get("JOB-1").await.unwrap().unwrap();
    assert_eq!(record.raw, json!("short"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wildcards_do_not_match_unrelated_jobs(pool: PgPool) {
    let store = PgJobStore::new(pool);
    put(&store, "JOB-1", json!({})).await;
    put(&store, "JOBX2", json!({})).await;

    assert_matches!(store.get("%").await, Ok(None));
    assert_matches!(store.get("_").await, Ok(None));
    assert_matches!(store.get("JOB_1").await, Ok(None));
    assert_matches!(store.get("JOB%").await, Ok(None));
    assert_matches!(store.get("\\").await, Ok(None));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn identifier_with_literal_percent_is_found(pool: PgPool) {
    let store = PgJobStore::new(pool);
    put(&store, "JOB-100%-done", json!("pct")).await;
    put(&store, "JOB-100X-done", json!("other")).await;

    let record = store.get("JOB-100%").await.unwrap().unwrap();
    assert_eq!(record.job_id, "JOB-100%-done");
}

// ---------------------------------------------------------------------------
// Retention
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn purge_deletes_only_stale_rows(pool: PgPool) {
    let store = PgJobStore::new(pool.clone());
    let now = Utc::now();
    store
        .put(JobRecord::completed("old", json!({}), now - Duration::days(2)))
        .await
        .unwrap();
    store
        .put(JobRecord::completed("fresh", json!({}), now))
        .await
        .unwrap();

    let purged = store.purge_older_than(now - Duration::days(1)).await.unwrap();

    assert_eq!(purged, 1);
    assert_matches!(store.get("old").await, Ok(None));
    assert!(JobResultRepo::find_by_job_id_or_prefix(&pool, "fresh")
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ping_succeeds_on_live_pool(pool: PgPool) {
    let store = PgJobStore::new(pool);
    store.ping().await.unwrap();
    assert_eq!(store.backend(), "postgres");
}
