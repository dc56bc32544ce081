use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown error code: {0}")]
    UnknownCode(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("unknown status: {0}")]
    UnknownStatus(String),
}
