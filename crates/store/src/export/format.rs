//! Export formats

use super::error::ExportError;
use crate::artifact::{DOCX_MIME_TYPE, PDF_MIME_TYPE, RTF_MIME_TYPE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Formats a document can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Legacy Word download, written as RTF
    Doc,
    /// Office Open XML
    Docx,
    /// Paginated PDF built from the rendered view
    Pdf,
}

impl ExportFormat {
    /// All supported formats
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Doc, ExportFormat::Docx, ExportFormat::Pdf];

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Doc => "doc",
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Get the MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Doc => RTF_MIME_TYPE,
            ExportFormat::Docx => DOCX_MIME_TYPE,
            ExportFormat::Pdf => PDF_MIME_TYPE,
        }
    }

    /// Get a human-readable name for this format
    pub fn display_name(&self) -> &'static str {
        match self {
            ExportFormat::Doc => "Word 97-2003 Document",
            ExportFormat::Docx => "Word Document",
            ExportFormat::Pdf => "PDF Document",
        }
    }

    /// Whether the orchestrator downloads the result itself
    pub fn downloads_directly(&self) -> bool {
        !matches!(self, ExportFormat::Pdf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doc" => Ok(ExportFormat::Doc),
            "docx" => Ok(ExportFormat::Docx),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!("doc".parse::<ExportFormat>().unwrap(), ExportFormat::Doc);
        assert_eq!("docx".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
    }

    #[test]
    fn test_tokens_are_exact() {
        for token in ["DOCX", " pdf ", "Doc"] {
            match token.parse::<ExportFormat>() {
                Err(ExportError::UnsupportedFormat(name)) => assert_eq!(name, token),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_unknown_format() {
        match "xyz".parse::<ExportFormat>() {
            Err(ExportError::UnsupportedFormat(name)) => assert_eq!(name, "xyz"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_format_metadata() {
        for format in ExportFormat::ALL {
            assert_eq!(format.to_string().parse::<ExportFormat>().unwrap(), format);
        }
        assert_eq!(ExportFormat::Doc.mime_type(), "application/rtf");
        assert!(!ExportFormat::Pdf.downloads_directly());
        assert_eq!(serde_json::to_string(&ExportFormat::Docx).unwrap(), "\"docx\"");
    }
}
