//! Document.xml writer
//!
//! Converts the section model to DOCX document.xml format.

use crate::docx::error::{DocxError, DocxResult};
use crate::docx::model::{DocxParagraph, DocxRun, DocxSection, FieldKind, ReferenceType};
use crate::docx::{escape_xml, namespaces};

/// Relationship IDs of the header and footer parts referenced by a section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionReferences {
    pub headers: Vec<(ReferenceType, String)>,
    pub footers: Vec<(ReferenceType, String)>,
}

/// Writer for document.xml
pub struct DocumentWriter;

impl DocumentWriter {
    /// Generate document.xml content
    ///
    /// `references` holds one entry per section, in section order. Every
    /// section but the last stores its properties in the paragraph properties
    /// of its final paragraph; the last one closes the body.
    pub fn write(sections: &[DocxSection], references: &[SectionReferences]) -> DocxResult<String> {
        if sections.is_empty() {
            return Err(DocxError::InvalidStructure(
                "document has no sections".to_string(),
            ));
        }
        if sections.len() != references.len() {
            return Err(DocxError::InvalidStructure(format!(
                "{} sections but {} reference sets",
                sections.len(),
                references.len()
            )));
        }

        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            namespaces::W,
            namespaces::R,
        ));
        xml.push_str("<w:body>");

        let last = sections.len() - 1;
        for (index, (section, refs)) in sections.iter().zip(references).enumerate() {
            if index == last {
                for paragraph in &section.body {
                    write_paragraph(&mut xml, paragraph, None);
                }
                write_section_properties(&mut xml, section, refs);
            } else {
                let (tail, head) = match section.body.split_last() {
                    Some((tail, head)) => (Some(tail), head),
                    None => (None, &section.body[..]),
                };
                for paragraph in head {
                    write_paragraph(&mut xml, paragraph, None);
                }
                let empty = DocxParagraph::empty();
                write_paragraph(&mut xml, tail.unwrap_or(&empty), Some((section, refs)));
            }
        }

        xml.push_str("</w:body>");
        xml.push_str("</w:document>");

        Ok(xml)
    }
}

/// Write a paragraph, optionally carrying section properties
pub(crate) fn write_paragraph(
    xml: &mut String,
    paragraph: &DocxParagraph,
    section: Option<(&DocxSection, &SectionReferences)>,
) {
    xml.push_str("<w:p>");

    if let Some((section, refs)) = section {
        xml.push_str("<w:pPr>");
        write_section_properties(xml, section, refs);
        xml.push_str("</w:pPr>");
    }

    for run in &paragraph.runs {
        match run {
            DocxRun::Text(text) => write_text_run(xml, text),
            DocxRun::Field(field) => write_field(xml, *field),
        }
    }

    xml.push_str("</w:p>");
}

fn write_text_run(xml: &mut String, text: &str) {
    xml.push_str("<w:r><w:t xml:space=\"preserve\">");
    xml.push_str(&escape_xml(text));
    xml.push_str("</w:t></w:r>");
}

/// Write a complex field with a placeholder result
fn write_field(xml: &mut String, field: FieldKind) {
    xml.push_str("<w:r><w:fldChar w:fldCharType=\"begin\"/></w:r>");

    xml.push_str("<w:r><w:instrText xml:space=\"preserve\"> ");
    xml.push_str(field.instruction());
    xml.push_str(" </w:instrText></w:r>");

    xml.push_str("<w:r><w:fldChar w:fldCharType=\"separate\"/></w:r>");

    // Cached result, replaced when the field is updated
    xml.push_str("<w:r><w:t>1</w:t></w:r>");

    xml.push_str("<w:r><w:fldChar w:fldCharType=\"end\"/></w:r>");
}

/// Write `w:sectPr` in schema order
fn write_section_properties(xml: &mut String, section: &DocxSection, refs: &SectionReferences) {
    xml.push_str("<w:sectPr>");

    for (kind, id) in &refs.headers {
        xml.push_str(&format!(
            r#"<w:headerReference w:type="{}" r:id="{}"/>"#,
            kind.as_str(),
            id
        ));
    }
    for (kind, id) in &refs.footers {
        xml.push_str(&format!(
            r#"<w:footerReference w:type="{}" r:id="{}"/>"#,
            kind.as_str(),
            id
        ));
    }

    xml.push_str(&format!(r#"<w:type w:val="{}"/>"#, section.break_type.as_str()));

    let page = &section.page;
    xml.push_str(&format!(
        r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
        page.width, page.height
    ));
    xml.push_str(&format!(
        r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="720" w:footer="720" w:gutter="0"/>"#,
        page.margin_top, page.margin_right, page.margin_bottom, page.margin_left
    ));

    if section.title_page {
        xml.push_str("<w:titlePg/>");
    }

    xml.push_str("</w:sectPr>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::model::SectionBreak;

    fn section(body: &str) -> DocxSection {
        DocxSection {
            body: vec![DocxParagraph::text(body)],
            ..DocxSection::new()
        }
    }

    #[test]
    fn test_single_section() {
        let xml = DocumentWriter::write(&[section("Hello")], &[SectionReferences::default()]).unwrap();
        assert!(xml.contains("<w:t xml:space=\"preserve\">Hello</w:t>"));
        assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(xml.contains(r#"w:top="1440" w:right="1440" w:bottom="1440" w:left="1440""#));
        assert!(xml.ends_with("</w:sectPr></w:body></w:document>"));
        assert!(!xml.contains("<w:titlePg/>"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let xml = DocumentWriter::write(&[section("<p>a & b</p>")], &[SectionReferences::default()]).unwrap();
        assert!(xml.contains("&lt;p&gt;a &amp; b&lt;/p&gt;"));
    }

    #[test]
    fn test_leading_section_properties_live_in_paragraph() {
        let leading = DocxSection {
            title_page: true,
            ..section("Body")
        };
        let main = DocxSection {
            break_type: SectionBreak::Continuous,
            body: vec![DocxParagraph::empty()],
            ..DocxSection::new()
        };
        let refs = SectionReferences {
            headers: vec![(ReferenceType::First, "rId2".to_string())],
            footers: vec![(ReferenceType::Default, "rId3".to_string())],
        };
        let xml = DocumentWriter::write(&[leading, main], &[refs, SectionReferences::default()]).unwrap();

        assert_eq!(xml.matches("<w:sectPr>").count(), 2);
        assert!(xml.contains("<w:p><w:pPr><w:sectPr><w:headerReference w:type=\"first\" r:id=\"rId2\"/>"));
        assert!(xml.contains("<w:footerReference w:type=\"default\" r:id=\"rId3\"/>"));
        assert!(xml.contains("<w:titlePg/></w:sectPr></w:pPr>"));
        assert!(xml.contains(r#"<w:type w:val="continuous"/>"#));
    }

    #[test]
    fn test_fields() {
        let mut xml = String::new();
        let paragraph = DocxParagraph::text("Page ")
            .with_field(FieldKind::Page)
            .with_text(" of ")
            .with_field(FieldKind::NumPages);
        write_paragraph(&mut xml, &paragraph, None);

        assert!(xml.contains(" PAGE </w:instrText>"));
        assert!(xml.contains(" NUMPAGES </w:instrText>"));
        assert_eq!(xml.matches("w:fldCharType=\"begin\"").count(), 2);
        assert_eq!(xml.matches("w:fldCharType=\"end\"").count(), 2);
    }

    #[test]
    fn test_mismatched_references_rejected() {
        assert!(DocumentWriter::write(&[section("a")], &[]).is_err());
        assert!(DocumentWriter::write(&[], &[]).is_err());
    }
}
