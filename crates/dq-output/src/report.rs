//! JSON summary of a run.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use dq_core::{BatchResult, BatchStats};
use serde::Serialize;
use tracing::info;

use crate::error::{OutputError, Result};

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub input: String,
    pub duration_ms: u64,
    pub failed_records: usize,
    #[serde(flatten)]
    pub stats: BatchStats,
}

impl RunReport {
    pub fn new(input: &Path, result: &BatchResult) -> Self {
        Self {
            generated_at: Utc::now(),
            input: input.display().to_string(),
            duration_ms: u64::try_from(result.duration.as_millis()).unwrap_or(u64::MAX),
            failed_records: result.failed_count(),
            stats: result.stats.clone(),
        }
    }
}

pub fn write_json_report(path: &Path, report: &RunReport) -> Result<()> {
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), report).map_err(|source| {
        OutputError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(path = %path.display(), "run report written");
    Ok(())
}
