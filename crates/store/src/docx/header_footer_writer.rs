//! Header and footer part writer

use crate::docx::document_writer::write_paragraph;
use crate::docx::model::DocxParagraph;
use crate::docx::namespaces;

/// Which band a part belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Header,
    Footer,
}

impl Band {
    /// Root element name
    fn element(self) -> &'static str {
        match self {
            Band::Header => "w:hdr",
            Band::Footer => "w:ftr",
        }
    }

    /// Part file name for the n-th part of this band, e.g. `header1.xml`
    pub fn part_name(self, index: usize) -> String {
        match self {
            Band::Header => format!("header{}.xml", index),
            Band::Footer => format!("footer{}.xml", index),
        }
    }
}

/// Generate a `word/headerN.xml` or `word/footerN.xml` part
pub fn write_part(band: Band, paragraph: &DocxParagraph) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<{} xmlns:w="{}" xmlns:r="{}">"#,
        band.element(),
        namespaces::W,
        namespaces::R
    ));
    write_paragraph(&mut xml, paragraph, None);
    xml.push_str(&format!("</{}>", band.element()));
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::model::FieldKind;

    #[test]
    fn test_header_part() {
        let xml = write_part(Band::Header, &DocxParagraph::text("Title"));
        assert!(xml.contains("<w:hdr "));
        assert!(xml.ends_with("</w:hdr>"));
        assert!(xml.contains(">Title</w:t>"));
    }

    #[test]
    fn test_footer_part_with_field() {
        let xml = write_part(Band::Footer, &DocxParagraph::empty().with_field(FieldKind::Page));
        assert!(xml.contains("<w:ftr "));
        assert!(xml.contains(" PAGE </w:instrText>"));
    }

    #[test]
    fn test_part_names() {
        assert_eq!(Band::Header.part_name(1), "header1.xml");
        assert_eq!(Band::Footer.part_name(3), "footer3.xml");
    }
}
