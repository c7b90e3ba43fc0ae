//! DOCX Writer Infrastructure
//!
//! Creates ZIP archives with correct DOCX structure.

use crate::docx::content_types::{create_default_content_types, ContentTypes};
use crate::docx::core_properties::write_core_properties;
use crate::docx::document_writer::{DocumentWriter, SectionReferences};
use crate::docx::error::DocxResult;
use crate::docx::header_footer_writer::{write_part, Band};
use crate::docx::model::{DocxDocument, HeaderFooterParts, ReferenceType};
use crate::docx::relationships::{create_document_rels, create_root_rels, Relationships};
use crate::docx::{content_type_values, namespaces, relationship_types};
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Main DOCX writer
pub struct DocxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    content_types: ContentTypes,
    root_rels: Relationships,
    doc_rels: Relationships,
    header_count: usize,
    footer_count: usize,
}

impl<W: Write + Seek> DocxWriter<W> {
    /// Create a new DOCX writer
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            content_types: create_default_content_types(),
            root_rels: create_root_rels(),
            doc_rels: create_document_rels(),
            header_count: 0,
            footer_count: 0,
        }
    }

    /// Write a complete DOCX package and return the underlying writer
    pub fn write(mut self, document: &DocxDocument) -> DocxResult<W> {
        // Header and footer parts first, so document.xml can reference them
        let mut references = Vec::with_capacity(document.sections.len());
        for section in &document.sections {
            let headers = self.write_band_parts(Band::Header, &section.headers)?;
            let footers = self.write_band_parts(Band::Footer, &section.footers)?;
            references.push(SectionReferences { headers, footers });
        }

        let doc_xml = DocumentWriter::write(&document.sections, &references)?;
        self.write_file("word/document.xml", &doc_xml)?;

        let settings_xml = write_settings(document.even_and_odd_headers());
        self.write_file("word/settings.xml", &settings_xml)?;

        self.write_file("docProps/core.xml", &write_core_properties(&document.core))?;

        let root_rels_xml = self.root_rels.to_xml();
        self.write_file("_rels/.rels", &root_rels_xml)?;

        let doc_rels_xml = self.doc_rels.to_xml();
        self.write_file("word/_rels/document.xml.rels", &doc_rels_xml)?;

        // Write [Content_Types].xml last
        let content_types_xml = self.content_types.to_xml();
        self.write_file("[Content_Types].xml", &content_types_xml)?;

        tracing::debug!(
            sections = document.sections.len(),
            headers = self.header_count,
            footers = self.footer_count,
            "Wrote DOCX package"
        );

        Ok(self.zip.finish()?)
    }

    /// Write one part per variant and register its relationship
    fn write_band_parts(
        &mut self,
        band: Band,
        parts: &HeaderFooterParts,
    ) -> DocxResult<Vec<(ReferenceType, String)>> {
        let mut refs = Vec::new();
        for (kind, paragraph) in parts.references() {
            let (counter, rel_type, content_type) = match band {
                Band::Header => (
                    &mut self.header_count,
                    relationship_types::HEADER,
                    content_type_values::HEADER,
                ),
                Band::Footer => (
                    &mut self.footer_count,
                    relationship_types::FOOTER,
                    content_type_values::FOOTER,
                ),
            };
            *counter += 1;
            let part_name = band.part_name(*counter);

            let id = self.doc_rels.add(rel_type, &part_name);
            self.content_types
                .add_override(&format!("/word/{}", part_name), content_type);
            self.write_file(&format!("word/{}", part_name), &write_part(band, paragraph))?;

            refs.push((kind, id));
        }
        Ok(refs)
    }

    /// Write a file to the ZIP archive
    pub fn write_file(&mut self, path: &str, content: &str) -> DocxResult<()> {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        self.zip.start_file(path, options)?;
        self.zip.write_all(content.as_bytes())?;

        Ok(())
    }
}

/// Generate `word/settings.xml`
fn write_settings(even_and_odd_headers: bool) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<w:settings xmlns:w="{}">"#, namespaces::W));
    if even_and_odd_headers {
        xml.push_str("<w:evenAndOddHeaders/>");
    }
    xml.push_str("</w:settings>");
    xml
}
