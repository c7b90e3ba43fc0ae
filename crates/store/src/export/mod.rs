//! Export Orchestrator
//!
//! Entry point for exporting a document: format dispatch, uniform error
//! reporting, and the download side effect shared by DOC and DOCX.

mod download;
mod error;
mod format;
mod orchestrator;

pub use download::{
    sanitize_filename, trigger_download, DirectoryDownloads, DownloadError, DownloadHost,
    DownloadReceipt, DownloadResult, DownloadScope, LinkHandle, ObjectUrl,
};
pub use error::{ConverterError, ExportError, ExportResult};
pub use format::ExportFormat;
pub use orchestrator::{ExportOutcome, ExportRequest, Exporter, PdfSurface};
