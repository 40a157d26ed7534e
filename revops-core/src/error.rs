//! Error types for the revops ecosystem.

use thiserror::Error;

/// Errors that can occur in revops operations.
#[derive(Error, Debug)]
pub enum RevopsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown timezone identifier: {0}")]
    Timezone(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("No column with a valid date label was found")]
    NoDataColumns,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for revops operations.
pub type RevopsResult<T> = Result<T, RevopsError>;
