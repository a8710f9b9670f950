//! Core domain for the job relay.
//!
//! Tracks the completion state of jobs started on an external workflow
//! engine, stores the verbatim callback payloads, and normalizes them into
//! the `{ headlines, articles }` output contract. Storage and the engine are
//! reached only through the [`store::JobStore`] and
//! [`engine::WorkflowEngine`] traits.

pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod normalize;
pub mod store;
pub mod types;
