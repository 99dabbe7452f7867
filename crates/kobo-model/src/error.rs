use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("missing required field {field} on row {row}")]
    MissingField { field: String, row: usize },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
