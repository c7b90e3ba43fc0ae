//! Export artifacts
//!
//! An artifact is created per export call, consumed by the download trigger,
//! and then dropped.

/// MIME type of the DOC (RTF) fallback format
pub const RTF_MIME_TYPE: &str = "application/rtf";
/// MIME type of Office Open XML word-processing documents
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// MIME type of PDF documents
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Binary output of an export, ready for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub payload: Vec<u8>,
    pub suggested_filename: String,
    pub mime_type: &'static str,
}

impl ExportArtifact {
    /// Create an artifact named `<title>.<extension>`
    pub fn new(payload: Vec<u8>, title: &str, extension: &str, mime_type: &'static str) -> Self {
        Self {
            payload,
            suggested_filename: format!("{}.{}", title, extension),
            mime_type,
        }
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
