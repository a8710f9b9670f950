//! Database row structs.

pub mod job_result;
