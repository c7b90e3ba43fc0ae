//! Error types for PDF export

use super::raster::RasterError;
use thiserror::Error;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid document structure
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Capturing the view or a header/footer failed
    #[error("Raster error on page {page}: {source}")]
    Raster {
        page: usize,
        #[source]
        source: RasterError,
    },
}

/// Result type for PDF operations
pub type PdfResult<T> = std::result::Result<T, PdfError>;
