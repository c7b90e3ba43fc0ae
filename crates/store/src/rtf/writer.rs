//! RTF Writer - Serializes document markup to RTF
//!
//! The body is produced by ordered literal substitutions over the markup
//! string. Substitution order matters: tags are replaced before entities, and
//! `&amp;` is decoded before `&lt;`/`&gt;`, so `&amp;lt;` ends up as `<`.

use crate::rtf::control_words::*;
use crate::rtf::error::RtfResult;
use crate::rtf::{ANSI_CODE_PAGE, LANG_EN_US};
use doc_model::{DocumentContent, DocumentMetadata};
use std::io::Write;

/// Tag and entity substitutions, applied in order
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("<p>", "\\par "),
    ("</p>", "\\par "),
    ("<b>", "\\b "),
    ("</b>", "\\b0 "),
    ("<i>", "\\i "),
    ("</i>", "\\i0 "),
    ("<u>", "\\ul "),
    ("</u>", "\\ul0 "),
    ("<br>", "\\line "),
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
];

/// RTF writer configuration
#[derive(Debug, Clone)]
pub struct RtfWriterConfig {
    /// Default font name
    pub default_font: String,
    /// Whether to include the document info block
    pub include_metadata: bool,
}

impl Default for RtfWriterConfig {
    fn default() -> Self {
        Self {
            default_font: "Calibri".to_string(),
            include_metadata: true,
        }
    }
}

/// RTF Writer
pub struct RtfWriter<W: Write> {
    writer: W,
    config: RtfWriterConfig,
}

impl<W: Write> RtfWriter<W> {
    /// Create a new RTF writer
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, RtfWriterConfig::default())
    }

    /// Create a new RTF writer with custom configuration
    pub fn with_config(writer: W, config: RtfWriterConfig) -> Self {
        Self { writer, config }
    }

    /// Write the document as RTF
    pub fn write(mut self, metadata: &DocumentMetadata, content: &DocumentContent) -> RtfResult<()> {
        self.write_header()?;
        self.write_font_table()?;

        if self.config.include_metadata {
            self.write_info(metadata)?;
        }

        self.write_str(&html_to_rtf_body(content.as_markup()))?;

        // Close document
        self.write_str("}")?;

        self.writer.flush()?;
        Ok(())
    }

    /// Write the RTF header: version, character set, default font and language
    fn write_header(&mut self) -> RtfResult<()> {
        writeln!(
            self.writer,
            "{{\\{}1\\{}\\{}{}\\{}0\\{}{}",
            RTF, ANSI, ANSICPG, ANSI_CODE_PAGE, DEFF, DEFLANG, LANG_EN_US
        )?;
        Ok(())
    }

    /// Write a single-entry font table for the default font
    fn write_font_table(&mut self) -> RtfResult<()> {
        let font = escape_rtf_text(&self.config.default_font);
        writeln!(self.writer, "{{\\{}{{\\f0\\{} {};}}}}", FONTTBL, FSWISS, font)?;
        Ok(())
    }

    /// Write the document info group
    fn write_info(&mut self, metadata: &DocumentMetadata) -> RtfResult<()> {
        writeln!(
            self.writer,
            "{{\\{}{{\\{} {}}}{{\\{} {}}}}}",
            INFO,
            TITLE,
            escape_rtf_text(&metadata.title),
            AUTHOR,
            escape_rtf_text(&metadata.author)
        )?;
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> RtfResult<()> {
        self.writer.write_all(s.as_bytes())?;
        Ok(())
    }
}

/// Convert markup to an RTF body fragment
///
/// RTF-special characters are escaped first, then the whitelist
/// substitutions run in order. Anything else passes through unchanged.
pub fn html_to_rtf_body(markup: &str) -> String {
    SUBSTITUTIONS
        .iter()
        .fold(escape_rtf_text(markup), |body, (from, to)| body.replace(from, to))
}

/// Escape text for inclusion in RTF
///
/// Backslashes and braces are escaped; characters outside ASCII are written
/// as `\uN?` with `N` the signed 16-bit code unit.
pub fn escape_rtf_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            c if c.is_ascii() => escaped.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    escaped.push_str(&format!("\\{}{}?", U, *unit as i16));
                }
            }
        }
    }
    escaped
}
