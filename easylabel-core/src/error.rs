// easylabel-core/src/error.rs

use thiserror::Error;

/// Errors produced by the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("invalid update: {0}")]
    InvalidUpdate(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("duplicate _id: {0}")]
    DuplicateId(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;
