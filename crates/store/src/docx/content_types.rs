//! [Content_Types].xml generation
//!
//! Defaults are keyed by extension and overrides by part name. Both keep
//! insertion order so the generated package is byte-stable.

use crate::docx::{content_type_values, namespaces};

/// Content types of the parts in a DOCX package
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    /// Default content types by extension (e.g., "xml" -> "application/xml")
    defaults: Vec<(String, String)>,
    /// Override content types by part name (e.g., "/word/document.xml" -> "...")
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    /// Create content types with the rels and xml defaults
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.add_default("rels", content_type_values::RELATIONSHIPS);
        ct.add_default("xml", content_type_values::XML);
        ct
    }

    /// Add or replace the default for an extension
    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        upsert(&mut self.defaults, extension.to_string(), content_type);
    }

    /// Add or replace the override for a specific part
    pub fn add_override(&mut self, part_name: &str, content_type: &str) {
        let normalized = if part_name.starts_with('/') {
            part_name.to_string()
        } else {
            format!("/{}", part_name)
        };
        upsert(&mut self.overrides, normalized, content_type);
    }

    /// Generate XML content for [Content_Types].xml
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, namespaces::CT));

        for (ext, ct) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                ext, ct
            ));
        }

        for (part, ct) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                part, ct
            ));
        }

        xml.push_str("</Types>");
        xml
    }
}

fn upsert(entries: &mut Vec<(String, String)>, key: String, value: &str) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value.to_string(),
        None => entries.push((key, value.to_string())),
    }
}

/// Content types for the fixed parts every export writes
pub fn create_default_content_types() -> ContentTypes {
    let mut ct = ContentTypes::new();
    ct.add_override("/word/document.xml", content_type_values::DOCUMENT);
    ct.add_override("/word/settings.xml", content_type_values::SETTINGS);
    ct.add_override("/docProps/core.xml", content_type_values::CORE_PROPERTIES);
    ct
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types_creation() {
        let xml = create_default_content_types().to_xml();
        assert!(xml.contains(&format!(
            r#"<Default Extension="rels" ContentType="{}"/>"#,
            content_type_values::RELATIONSHIPS
        )));
        assert!(xml.contains(&format!(
            r#"<Override PartName="/word/document.xml" ContentType="{}"/>"#,
            content_type_values::DOCUMENT
        )));
        assert!(xml.contains(r#"PartName="/docProps/core.xml""#));
    }

    #[test]
    fn test_override_replaces_existing_entry() {
        let mut ct = ContentTypes::new();
        ct.add_override("word/header1.xml", content_type_values::XML);
        ct.add_override("/word/header1.xml", content_type_values::HEADER);

        let xml = ct.to_xml();
        assert_eq!(xml.matches("/word/header1.xml").count(), 1);
        assert!(xml.contains(content_type_values::HEADER));
    }

    #[test]
    fn test_to_xml_is_ordered() {
        let mut ct = create_default_content_types();
        ct.add_override("/word/header1.xml", content_type_values::HEADER);
        ct.add_override("/word/footer1.xml", content_type_values::FOOTER);

        let xml = ct.to_xml();
        let doc = xml.find("/word/document.xml").unwrap();
        let header = xml.find("/word/header1.xml").unwrap();
        let footer = xml.find("/word/footer1.xml").unwrap();
        assert!(doc < header && header < footer);
        assert_eq!(xml, ct.to_xml());
    }
}
