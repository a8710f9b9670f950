//! HTTP client for the external workflow engine.
//!
//! The engine exposes a start webhook that mints a job identifier and
//! later calls back into the relay with the result. This crate covers the
//! outbound half: [`api::EngineApi`] implements
//! [`relay_core::engine::WorkflowEngine`] over [`reqwest`].

pub mod api;
