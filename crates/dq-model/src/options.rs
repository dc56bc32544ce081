//! Processing options for a pipeline run.

use serde::{Deserialize, Serialize};

/// Default name of the record identifier column.
pub const DEFAULT_ID_COLUMN: &str = "ID";

/// Options that shape a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Column holding the record identifier.
    pub id_column: String,
    /// Minimum frequency for a name or surname to count as known.
    pub min_name_frequency: u64,
    /// Process records on the rayon thread pool.
    pub parallel: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            id_column: DEFAULT_ID_COLUMN.to_string(),
            min_name_frequency: 1,
            parallel: true,
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = column.into();
        self
    }

    #[must_use]
    pub fn with_min_name_frequency(mut self, frequency: u64) -> Self {
        self.min_name_frequency = frequency;
        self
    }

    #[must_use]
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
