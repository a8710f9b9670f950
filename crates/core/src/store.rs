//! Job record storage.
//!
//! [`JobStore`] maps a job identifier to its [`JobRecord`]. Lookups match the
//! identifier exactly or, failing that, as a literal prefix of a stored
//! identifier: the engine sometimes echoes identifiers with trailing
//! whitespace or newlines, and the prefix match lets a poll for the clean
//! identifier still find the record.

use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::types::Timestamp;

/// The stored outcome of one job's completion callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub done: bool,
    /// Verbatim callback payload.
    pub raw: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl JobRecord {
    /// A completed record for `job_id` carrying `raw`, stamped at `now`.
    pub fn completed(job_id: impl Into<String>, raw: serde_json::Value, now: Timestamp) -> Self {
        Self {
            job_id: job_id.into(),
            done: true,
            raw,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Whether a `put` created a new record or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Inserted,
    Replaced,
}

/// Key-value storage for job records.
///
/// `get` returns `Ok(None)` for unknown identifiers; `Err` is reserved for
/// the backend itself failing, so callers never mistake an outage for a
/// job that is still running.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert or overwrite the record for `record.job_id`.
    ///
    /// On overwrite the existing `created_at` is kept.
    async fn put(&self, record: JobRecord) -> Result<PutOutcome, StoreError>;

    /// Find the record whose identifier equals `job_id`, or else the first
    /// record whose identifier starts with `job_id` literally.
    async fn get(&self, job_id: &str) -> Result<Option<JobRecord>, StoreError>;

    /// Delete records last updated before `cutoff`. Returns how many went.
    async fn purge_older_than(&self, cutoff: Timestamp) -> Result<u64, StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Short backend name for health reporting.
    fn backend(&self) -> &'static str;
}

/// Process-local [`JobStore`] backed by an ordered map.
///
/// Ordering makes the prefix lookup a single range probe: the exact key,
/// when present, sorts before every longer key sharing its prefix.
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    records: RwLock<BTreeMap<String, JobRecord>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn put(&self, mut record: JobRecord) -> Result<PutOutcome, StoreError> {
        let mut records = self.records.write().await;
        match records.get(&record.job_id) {
            Some(existing) => {
                record.created_at = existing.created_at;
                records.insert(record.job_id.clone(), record);
                Ok(PutOutcome::Replaced)
            }
            None => {
                records.insert(record.job_id.clone(), record);
                Ok(PutOutcome::Inserted)
            }
        }
    }

    async fn get(&self, job_id: &str) -> Result<Option<JobRecord>, StoreError> {
        let records = self.records.read().await;
        let found = records
            .range::<str, _>((Bound::Included(job_id), Bound::Unbounded))
            .next()
            .filter(|(key, _)| key.starts_with(job_id))
            .map(|(_, record)| record.clone());
        Ok(found)
    }

    async fn purge_older_than(&self, cutoff: Timestamp) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.updated_at >= cutoff);
        Ok((before - records.len()) as u64)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
