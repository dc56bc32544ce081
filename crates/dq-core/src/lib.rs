//! Data-quality pipeline over customer records.
//!
//! Each record runs five independent status groups (first name, surname,
//! address, email, phone) through validate → detect → correct →
//! re-validate, then receives an overall status. Records share only
//! read-only state, so a batch is a parallel map.

#![deny(unsafe_code)]

pub mod batch;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod status;

pub use batch::{
    BatchResult, BatchStats, CodeCounts, process_record, process_record_isolated, run_batch,
};
pub use context::PipelineContext;
pub use error::{PipelineError, Result};
pub use pipeline::{StageFlags, inspect_field, resolve_status, run_address, run_field, run_group};
pub use status::overall_status;
