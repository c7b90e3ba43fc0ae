//! Relationships (.rels) generation
//!
//! DOCX uses relationships to connect parts of the document together.

use crate::docx::{namespaces, relationship_types};

/// A single relationship in a .rels file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Unique ID within the rels file (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative to the source part)
    pub target: String,
}

/// Ordered collection of relationships for one .rels file
#[derive(Debug, Clone)]
pub struct Relationships {
    relationships: Vec<Relationship>,
    /// Counter for generating new IDs
    next_id: u32,
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new()
    }
}

impl Relationships {
    /// Create a new empty relationships collection
    pub fn new() -> Self {
        Self {
            relationships: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a relationship and return its ID
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        let id = format!("rId{}", self.next_id);
        self.next_id += 1;

        self.relationships.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
        });

        id
    }

    /// Generate XML content for the .rels file
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, namespaces::PKG_REL));

        for rel in &self.relationships {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                rel.id, rel.rel_type, rel.target
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }
}

/// Create the root .rels file for a new DOCX
pub fn create_root_rels() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(relationship_types::DOCUMENT, "word/document.xml");
    rels.add(relationship_types::CORE_PROPERTIES, "docProps/core.xml");
    rels
}

/// Create the document.xml.rels for a new DOCX
pub fn create_document_rels() -> Relationships {
    let mut rels = Relationships::new();
    rels.add(relationship_types::SETTINGS, "settings.xml");
    rels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_relationship() {
        let mut rels = create_document_rels();
        let id = rels.add(relationship_types::HEADER, "header1.xml");
        assert_eq!(id, "rId2");
        let xml = rels.to_xml();
        assert_eq!(xml.matches("<Relationship ").count(), 2);
        assert!(xml.contains(&format!(
            r#"<Relationship Id="rId2" Type="{}" Target="header1.xml"/>"#,
            relationship_types::HEADER
        )));
    }

    #[test]
    fn test_root_rels() {
        let xml = create_root_rels().to_xml();
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains(r#"Target="word/document.xml""#));
        assert!(xml.contains(r#"Target="docProps/core.xml""#));
    }

    #[test]
    fn test_to_xml_preserves_order() {
        let mut rels = Relationships::new();
        rels.add(relationship_types::HEADER, "header1.xml");
        rels.add(relationship_types::FOOTER, "footer1.xml");
        let xml = rels.to_xml();
        assert!(xml.find("header1.xml").unwrap() < xml.find("footer1.xml").unwrap());
    }
}
