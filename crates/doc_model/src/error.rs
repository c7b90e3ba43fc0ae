//! Error types for document model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocModelError {
    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Invalid page number: {page} (document has {total} pages)")]
    InvalidPageNumber { page: u32, total: u32 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DocModelError>;
