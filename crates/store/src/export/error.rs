//! Error types for the export orchestrator

use super::download::DownloadError;
use super::format::ExportFormat;
use crate::docx::DocxError;
use crate::pdf::PdfError;
use crate::rtf::RtfError;
use thiserror::Error;

/// Errors surfaced to the caller of an export
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested format is not one of doc, docx, pdf
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// PDF export was requested without a rendered view to capture
    #[error("PDF export requires a rendered view")]
    MissingRenderedView,

    /// A converter or the download failed; the cause is in `source()`
    #[error("Failed to export document")]
    ExportFailed {
        format: ExportFormat,
        #[source]
        source: ConverterError,
    },
}

impl ExportError {
    pub(crate) fn failed(format: ExportFormat, source: impl Into<ConverterError>) -> Self {
        ExportError::ExportFailed {
            format,
            source: source.into(),
        }
    }
}

/// Underlying cause of a failed export
#[derive(Debug, Error)]
pub enum ConverterError {
    #[error("RTF export error: {0}")]
    Rtf(#[from] RtfError),

    #[error("DOCX export error: {0}")]
    Docx(#[from] DocxError),

    #[error("PDF export error: {0}")]
    Pdf(#[from] PdfError),

    #[error("Download error: {0}")]
    Download(#[from] DownloadError),
}

/// Result type for exports
pub type ExportResult<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_export_failed_keeps_cause() {
        let err = ExportError::failed(
            ExportFormat::Docx,
            DocxError::InvalidStructure("no sections".to_string()),
        );
        assert_eq!(err.to_string(), "Failed to export document");
        let cause = err.source().unwrap().to_string();
        assert!(cause.contains("no sections"));
    }
}
