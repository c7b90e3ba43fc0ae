//! PDF Document Structure
//!
//! A composed document: pages of placed images plus the info dictionary.
//! The encoder builds it; callers choose between raw bytes and a download
//! artifact.

use super::error::PdfResult;
use super::images::ImageXObject;
use super::layout::{PageLayout, Rect};
use super::objects::{PdfDictionary, PdfObject};
use super::writer::write_document;
use crate::artifact::{ExportArtifact, PDF_MIME_TYPE};
use chrono::{DateTime, Utc};

/// File extension of exported PDF files
pub const PDF_EXTENSION: &str = "pdf";

/// PDF document information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub creator: String,
    pub producer: String,
    pub modification_date: DateTime<Utc>,
}

impl DocumentInfo {
    /// Info for a document with the given title and author
    pub fn new(title: impl Into<String>, author: impl Into<String>, modified: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            creator: "Go Word".to_string(),
            producer: "Go Word PDF Export".to_string(),
            modification_date: modified,
        }
    }

    /// Convert to PDF dictionary
    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        dict.insert("Title", PdfObject::text(&self.title));
        dict.insert("Author", PdfObject::text(&self.author));
        dict.insert("Creator", PdfObject::text(&self.creator));
        dict.insert("Producer", PdfObject::text(&self.producer));
        dict.insert(
            "ModDate",
            PdfObject::text(&self.modification_date.format("D:%Y%m%d%H%M%SZ").to_string()),
        );
        dict
    }
}

/// Which band an image was placed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Header,
    Content,
    Footer,
}

/// An image stretched over a rectangle of the page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    pub placement: Placement,
    pub rect: Rect,
    pub image: ImageXObject,
}

/// One composed page
#[derive(Debug, Clone, PartialEq)]
pub struct PdfPage {
    pub number: usize,
    pub images: Vec<PlacedImage>,
}

impl PdfPage {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            images: Vec::new(),
        }
    }

    /// Image placed in a band, if any
    pub fn image_in(&self, placement: Placement) -> Option<&PlacedImage> {
        self.images.iter().find(|i| i.placement == placement)
    }
}

/// A composed PDF document
#[derive(Debug, Clone, PartialEq)]
pub struct PdfDocument {
    pub info: DocumentInfo,
    pub layout: PageLayout,
    pub pages: Vec<PdfPage>,
    /// Whether streams are Flate-compressed on serialization
    pub compress: bool,
}

impl PdfDocument {
    pub fn new(info: DocumentInfo, layout: PageLayout) -> Self {
        Self {
            info,
            layout,
            pages: Vec::new(),
            compress: true,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize to PDF bytes
    pub fn to_bytes(&self) -> PdfResult<Vec<u8>> {
        write_document(self, Vec::new())
    }

    /// Serialize into a downloadable artifact named after the title
    pub fn into_artifact(self) -> PdfResult<ExportArtifact> {
        let payload = self.to_bytes()?;
        Ok(ExportArtifact::new(
            payload,
            &self.info.title,
            PDF_EXTENSION,
            PDF_MIME_TYPE,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_document_info() {
        let modified = Utc.with_ymd_and_hms(2026, 10, 16, 8, 5, 0).unwrap();
        let dict = DocumentInfo::new("Report", "Ada", modified).to_dictionary();
        assert_eq!(dict.get("Title"), Some(&PdfObject::text("Report")));
        assert_eq!(dict.get("ModDate"), Some(&PdfObject::text("D:20261016080500Z")));
        assert!(dict.get("Producer").is_some());
    }

    #[test]
    fn test_into_artifact() {
        let info = DocumentInfo::new("Report", "Ada", Utc::now());
        let mut document = PdfDocument::new(info, PageLayout::letter());
        document.pages.push(PdfPage::new(1));

        let artifact = document.into_artifact().unwrap();
        assert_eq!(artifact.suggested_filename, "Report.pdf");
        assert_eq!(artifact.mime_type, PDF_MIME_TYPE);
        assert!(artifact.payload.starts_with(b"%PDF-1.4"));
    }
}
