//! Public API for DOCX export

use crate::artifact::{ExportArtifact, DOCX_MIME_TYPE};
use crate::docx::error::DocxResult;
use crate::docx::model::DocxDocument;
use crate::docx::writer::DocxWriter;
use doc_model::{DocumentContent, DocumentMetadata};
use std::io::Cursor;

/// File extension of exported DOCX files
pub const DOCX_EXTENSION: &str = "docx";

/// Export a document to DOCX bytes
pub fn export_docx_bytes(
    metadata: &DocumentMetadata,
    content: &DocumentContent,
) -> DocxResult<Vec<u8>> {
    let document = DocxDocument::from_document(metadata, content);
    let cursor = DocxWriter::new(Cursor::new(Vec::new())).write(&document)?;
    Ok(cursor.into_inner())
}

/// Export a document to a downloadable DOCX artifact
pub fn docx_artifact(
    metadata: &DocumentMetadata,
    content: &DocumentContent,
) -> DocxResult<ExportArtifact> {
    let payload = export_docx_bytes(metadata, content)?;
    Ok(ExportArtifact::new(
        payload,
        &metadata.title,
        DOCX_EXTENSION,
        DOCX_MIME_TYPE,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::PageVariantSettings;
    use std::io::Read;
    use zip::ZipArchive;

    fn read(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut content = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut content).unwrap();
        content
    }

    /// The `default` band part of the section that governs the paragraph
    /// containing `body_text`
    fn default_part_for(bytes: Vec<u8>, band: &str, body_text: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let document = read(&mut archive, "word/document.xml");
        let rels = read(&mut archive, "word/_rels/document.xml.rels");

        // A paragraph belongs to the first section break at or after it
        let text_at = document.find(body_text).unwrap();
        let paragraph_at = document[..text_at].rfind("<w:p>").unwrap();
        let sect_at = paragraph_at + document[paragraph_at..].find("<w:sectPr>").unwrap();
        let sect_end = sect_at + document[sect_at..].find("</w:sectPr>").unwrap();
        let sect_pr = &document[sect_at..sect_end];

        let marker = format!(r#"<w:{}Reference w:type="default" r:id=""#, band);
        let id_at = sect_pr.find(&marker).unwrap() + marker.len();
        let id = &sect_pr[id_at..id_at + sect_pr[id_at..].find('"').unwrap()];

        let rel_at = rels.find(&format!(r#"Id="{}""#, id)).unwrap();
        let target_at = rel_at + rels[rel_at..].find(r#"Target=""#).unwrap() + r#"Target=""#.len();
        let target = &rels[target_at..target_at + rels[target_at..].find('"').unwrap()];

        read(&mut archive, &format!("word/{}", target))
    }

    #[test]
    fn test_docx_artifact() {
        let metadata = DocumentMetadata::new("Notes", "Ada");
        let artifact = docx_artifact(&metadata, &DocumentContent::new("<p>x</p>")).unwrap();
        assert_eq!(artifact.suggested_filename, "Notes.docx");
        assert_eq!(artifact.mime_type, DOCX_MIME_TYPE);
        // ZIP local file header
        assert_eq!(&artifact.payload[..2], b"PK");
    }

    #[test]
    fn test_title_page_section_in_document() {
        let metadata = DocumentMetadata::new("T", "A")
            .with_header_settings(PageVariantSettings::new().with_first_page("Cover"));
        let bytes = export_docx_bytes(&metadata, &DocumentContent::new("<p>Body</p>")).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut document = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();

        assert_eq!(document.matches("<w:titlePg/>").count(), 1);
        assert_eq!(document.matches("&lt;p&gt;Body&lt;/p&gt;").count(), 1);
        assert!(document.contains(r#"<w:headerReference w:type="first""#));
        assert!(document.contains(r#"<w:type w:val="continuous"/>"#));
        // Fields live in the footer parts, not the body
        assert!(!document.contains("NUMPAGES"));
    }

    #[test]
    fn test_body_section_defaults_to_base_bands() {
        let metadata = DocumentMetadata::new("T", "A")
            .with_header("Base head")
            .with_header_settings(PageVariantSettings::new().with_first_page("Cover"))
            .with_footer("Confidential ");
        let bytes = export_docx_bytes(&metadata, &DocumentContent::new("<p>Body</p>")).unwrap();

        let header = default_part_for(bytes.clone(), "header", "Body");
        assert!(header.contains(">Base head</w:t>"));
        assert!(!header.contains("Cover"));

        let footer = default_part_for(bytes, "footer", "Body");
        assert!(footer.contains(">Confidential </w:t>"));
        assert!(footer.contains(" PAGE </w:instrText>"));
        assert!(footer.contains(" NUMPAGES </w:instrText>"));
    }

    #[test]
    fn test_odd_footer_part_keeps_page_fields() {
        let metadata = DocumentMetadata::new("T", "A")
            .with_footer("Confidential ")
            .with_footer_settings(PageVariantSettings::new().with_odd_even("Odd ", "Even"));
        let bytes = export_docx_bytes(&metadata, &DocumentContent::new("<p>Body</p>")).unwrap();

        let footer = default_part_for(bytes, "footer", "Body");
        assert!(footer.contains(">Odd </w:t>"));
        assert!(footer.contains(" PAGE </w:instrText>"));
        assert!(footer.contains(" NUMPAGES </w:instrText>"));
    }
}
