//! Store - Document export and download handling
//!
//! This crate converts a document (metadata plus markup) into DOC (RTF),
//! DOCX, or PDF, triggers downloads through a pluggable host, and persists
//! export settings.

mod artifact;
mod error;
mod settings;
pub mod docx;
pub mod export;
pub mod pdf;
pub mod rtf;

pub use artifact::*;
pub use error::*;
pub use settings::*;

// Re-export the orchestrator surface
pub use export::{
    trigger_download, ConverterError, DirectoryDownloads, DownloadError, DownloadHost,
    DownloadReceipt, ExportError, ExportFormat, ExportOutcome, ExportRequest, Exporter,
    PdfSurface,
};

// Re-export converter entry points
pub use docx::{docx_artifact, export_docx_bytes, DocxError, DocxResult};
pub use pdf::{
    PdfDocument, PdfEncoder, PdfError, PdfResult, RasterError, RasterImage, RenderedView,
    StagingArea, StagingNode,
};
pub use rtf::{export_rtf_bytes, rtf_artifact, RtfError, RtfResult, RtfWriterConfig};
