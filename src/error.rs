use thiserror::Error;

pub type Result<T> = std::result::Result<T, DndError>;

#[derive(Debug, Error)]
pub enum DndError {
    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    #[error("Board invariant violated: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
