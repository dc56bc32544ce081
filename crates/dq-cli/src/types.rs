use std::path::PathBuf;

use dq_core::BatchResult;

#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub batch: BatchResult,
}

impl RunResult {
    /// Any record whose processing failed.
    pub fn has_errors(&self) -> bool {
        self.batch.failed_count() > 0
    }
}
