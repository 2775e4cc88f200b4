use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataprepError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing required column: {0}")]
    MissingColumn(String),
}

pub type Result<T> = std::result::Result<T, DataprepError>;
