//! Error types for DOCX operations

use thiserror::Error;

/// Errors that can occur during DOCX export
#[derive(Debug, Error)]
pub enum DocxError {
    /// IO error while writing the package
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Invalid DOCX structure
    #[error("Invalid DOCX structure: {0}")]
    InvalidStructure(String),
}

/// Result type for DOCX operations
pub type DocxResult<T> = std::result::Result<T, DocxError>;
