//! Output writers: the augmented customer table and the JSON run report.

#![deny(unsafe_code)]

pub mod augmented;
pub mod columns;
pub mod error;
pub mod report;

pub use augmented::{write_augmented, write_augmented_csv};
pub use columns::{OVERALL_STATUS_COLUMN, PROCESSING_ERROR_COLUMN, result_cells, result_columns};
pub use error::{OutputError, Result};
pub use report::{RunReport, write_json_report};
