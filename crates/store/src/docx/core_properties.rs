//! docProps/core.xml writer

use crate::docx::model::CoreProperties;
use crate::docx::{escape_xml, namespaces};
use chrono::SecondsFormat;

/// Generate `docProps/core.xml`
pub fn write_core_properties(core: &CoreProperties) -> String {
    let modified = core.modified.to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<cp:coreProperties xmlns:cp="{}" xmlns:dc="{}" xmlns:dcterms="{}" xmlns:xsi="{}">"#,
        namespaces::CP,
        namespaces::DC,
        namespaces::DCTERMS,
        namespaces::XSI
    ));
    xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(&core.title)));
    xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape_xml(&core.creator)));
    xml.push_str(&format!(
        "<cp:lastModifiedBy>{}</cp:lastModifiedBy>",
        escape_xml(&core.last_modified_by)
    ));
    xml.push_str(&format!(
        r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
        modified
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}
