//! Error types for RTF operations

use thiserror::Error;

/// Errors that can occur during RTF export
#[derive(Debug, Error)]
pub enum RtfError {
    /// IO error while writing the output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for RTF operations
pub type RtfResult<T> = std::result::Result<T, RtfError>;
