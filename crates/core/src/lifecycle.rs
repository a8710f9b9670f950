//! Job lifecycle: start on the engine, ingest the completion callback, and
//! answer status polls.
//!
//! A job moves `NONE -> PENDING -> DONE`. `PENDING` lives only in the engine;
//! the store learns about a job when its callback arrives. Status queries
//! therefore report unknown and still-running jobs identically.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use serde::Serialize;

use crate::engine::WorkflowEngine;
use crate::error::{JobError, StoreError};
use crate::normalize::{normalize, NormalizedResult};
use crate::store::{JobRecord, JobStore, PutOutcome};
use crate::types::Timestamp;

/// Poll response: `{ "done": false }` or
/// `{ "done": true, "headlines": [...], "articles": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStatus {
    pub done: bool,
    #[serde(flatten)]
    pub result: Option<NormalizedResult>,
}

impl JobStatus {
    pub fn pending() -> Self {
        Self {
            done: false,
            result: None,
        }
    }

    pub fn completed(result: NormalizedResult) -> Self {
        Self {
            done: true,
            result: Some(result),
        }
    }
}

/// Orchestrates the engine and the store.
///
/// Cheap to clone; all state lives behind `Arc`.
#[derive(Clone)]
pub struct JobLifecycleService {
    store: Arc<dyn JobStore>,
    engine: Arc<dyn WorkflowEngine>,
    retention: Option<TimeDelta>,
}

impl JobLifecycleService {
    pub fn new(store: Arc<dyn JobStore>, engine: Arc<dyn WorkflowEngine>) -> Self {
        Self {
            store,
            engine,
            retention: None,
        }
    }

    /// Forget results last updated more than `retention` ago.
    ///
    /// Expired records read as not done and are purged opportunistically
    /// after each successful ingest.
    pub fn with_retention(mut self, retention: TimeDelta) -> Self {
        self.retention = Some(retention);
        self
    }

    pub fn store_backend(&self) -> &'static str {
        self.store.backend()
    }

    pub async fn ping_store(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }

    /// Ask the engine to start a job and return its response verbatim.
    pub async fn start_job(&self) -> Result<serde_json::Value, JobError> {
        self.engine
            .start_job()
            .await
            .map_err(JobError::UpstreamStartFailure)
    }

    /// Record the completion payload for `job_id`, replacing any earlier one.
    pub async fn ingest_result(
        &self,
        job_id: &str,
        payload: serde_json::Value,
    ) -> Result<PutOutcome, JobError> {
        let job_id = require_job_id(job_id)?;
        let now = Utc::now();

        let outcome = self
            .store
            .put(JobRecord::completed(job_id, payload, now))
            .await
            .map_err(JobError::PersistFailure)?;

        if let Some(cutoff) = self.cutoff(now) {
            if let Err(err) = self.store.purge_older_than(cutoff).await {
                tracing::warn!(error = %err, "Failed to purge expired job results");
            }
        }

        Ok(outcome)
    }

    /// Report whether `job_id` has completed, with its normalized result.
    pub async fn get_status(&self, job_id: &str) -> Result<JobStatus, JobError> {
        let job_id = require_job_id(job_id)?;

        let record = self
            .store
            .get(job_id)
            .await
            .map_err(JobError::StoreUnavailable)?;

        match record {
            Some(record) if record.done && !self.is_expired(&record, Utc::now()) => {
                Ok(JobStatus::completed(normalize(&record.raw)))
            }
            _ => Ok(JobStatus::pending()),
        }
    }

    fn is_expired(&self, record: &JobRecord, now: Timestamp) -> bool {
        self.cutoff(now)
            .is_some_and(|cutoff| record.updated_at < cutoff)
    }

    fn cutoff(&self, now: Timestamp) -> Option<Timestamp> {
        self.retention
            .and_then(|retention| now.checked_sub_signed(retention))
    }
}

/// Reject blank identifiers with [`JobError::MissingJobId`] and identifiers
/// containing NUL with [`JobError::InvalidJobId`].
pub fn require_job_id(job_id: &str) -> Result<&str, JobError> {
    if job_id.trim().is_empty() {
        return Err(JobError::MissingJobId);
    }
    if job_id.contains('\0') {
        return Err(JobError::InvalidJobId);
    }
    Ok(job_id)
}
