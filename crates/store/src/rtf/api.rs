//! Public API for RTF export

use crate::artifact::{ExportArtifact, RTF_MIME_TYPE};
use crate::rtf::error::RtfResult;
use crate::rtf::writer::{RtfWriter, RtfWriterConfig};
use doc_model::{DocumentContent, DocumentMetadata};
use std::io::Cursor;

/// File extension used for the RTF download
pub const DOC_EXTENSION: &str = "doc";

/// Export a document to an in-memory RTF byte vector
///
/// # Example
///
/// ```ignore
/// use store::rtf::{export_rtf_bytes, RtfWriterConfig};
///
/// let bytes = export_rtf_bytes(&metadata, &content, RtfWriterConfig::default())?;
/// ```
pub fn export_rtf_bytes(
    metadata: &DocumentMetadata,
    content: &DocumentContent,
    config: RtfWriterConfig,
) -> RtfResult<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let writer = Cursor::new(&mut buffer);
        RtfWriter::with_config(writer, config).write(metadata, content)?;
    }
    Ok(buffer)
}

/// Export a document as a `<title>.doc` artifact
pub fn rtf_artifact(
    metadata: &DocumentMetadata,
    content: &DocumentContent,
    config: RtfWriterConfig,
) -> RtfResult<ExportArtifact> {
    let payload = export_rtf_bytes(metadata, content, config)?;
    Ok(ExportArtifact::new(payload, &metadata.title, DOC_EXTENSION, RTF_MIME_TYPE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtf_artifact() {
        let metadata = DocumentMetadata::new("Letter", "Ada");
        let content = DocumentContent::new("<p>Hello <b>World</b></p>");

        let artifact = rtf_artifact(&metadata, &content, RtfWriterConfig::default()).unwrap();
        assert_eq!(artifact.suggested_filename, "Letter.doc");
        assert_eq!(artifact.mime_type, "application/rtf");

        let rtf = String::from_utf8(artifact.payload).unwrap();
        assert!(rtf.starts_with("{\\rtf1"));
        assert!(rtf.contains("\\par Hello \\b World\\b0 \\par"));
    }

    #[test]
    fn test_custom_font() {
        let config = RtfWriterConfig {
            default_font: "Times New Roman".to_string(),
            ..Default::default()
        };
        let bytes = export_rtf_bytes(
            &DocumentMetadata::new("T", "A"),
            &DocumentContent::new(""),
            config,
        )
        .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("\\fswiss Times New Roman;"));
    }
}
