//! DOCX Export Module
//!
//! Writes Office Open XML word-processing packages (ECMA-376) from document
//! metadata and content.
//!
//! ## Structure
//!
//! A DOCX file is a ZIP archive containing XML files:
//! - `[Content_Types].xml` - Content type definitions
//! - `_rels/.rels` - Root relationships
//! - `word/document.xml` - Body and section properties
//! - `word/settings.xml` - Document settings (even/odd header switch)
//! - `word/headerN.xml`, `word/footerN.xml` - Header and footer parts
//! - `word/_rels/document.xml.rels` - Document relationships
//! - `docProps/core.xml` - Title, author, and modification time
//!
//! ## Sections
//!
//! When either band asks for a different first page, a leading title-page
//! section carries the body and the first-page variants. The main section
//! follows as a continuous break and carries the default, even, and odd
//! variants plus the live page-number footer.

mod api;
mod content_types;
mod core_properties;
mod document_writer;
mod error;
mod header_footer_writer;
mod model;
mod relationships;
mod writer;

pub use api::{docx_artifact, export_docx_bytes, DOCX_EXTENSION};
pub use error::{DocxError, DocxResult};
pub use model::{
    CoreProperties, DocxDocument, DocxParagraph, DocxRun, DocxSection, FieldKind,
    HeaderFooterParts, ReferenceType, SectionBreak,
};
pub use writer::DocxWriter;

/// XML namespaces used in DOCX files
pub mod namespaces {
    /// Main WordprocessingML namespace
    pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    /// Relationships namespace
    pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    /// Package relationships namespace
    pub const PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
    /// Content types namespace
    pub const CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
    /// Core properties namespace
    pub const CP: &str =
        "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
    /// Dublin Core elements
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    /// Dublin Core terms
    pub const DCTERMS: &str = "http://purl.org/dc/terms/";
    /// XML Schema instance
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
}

/// Relationship types used in DOCX
pub mod relationship_types {
    pub const DOCUMENT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str = "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const SETTINGS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
    pub const HEADER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
    pub const FOOTER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
}

/// Content types for DOCX parts
pub mod content_type_values {
    pub const DOCUMENT: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const SETTINGS: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
    pub const HEADER: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml";
    pub const FOOTER: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml";
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
}

/// Escape text for XML element content and attribute values
pub(crate) fn escape_xml(text: &str) -> std::borrow::Cow<'_, str> {
    quick_xml::escape::escape(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<p>a & b</p>"), "&lt;p&gt;a &amp; b&lt;/p&gt;");
        assert_eq!(escape_xml("plain"), "plain");
    }
}
