use thiserror::Error;

/// Failure of one record. The batch records it and continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("record at row {row_index} has no identifier")]
    MissingIdentifier { row_index: usize },

    #[error("processing record {record_id} panicked: {message}")]
    Panicked { record_id: String, message: String },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
