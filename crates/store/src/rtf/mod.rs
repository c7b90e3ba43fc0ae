//! RTF Export Module
//!
//! Produces the DOC download: a Rich Text Format file built by literal
//! substitution of a small HTML tag whitelist. This is a deliberately lossy
//! fallback format; markup outside the whitelist passes through unconverted.
//!
//! ## Substitutions (applied in order)
//!
//! | Markup | RTF |
//! |--------|-----|
//! | `<p>`, `</p>` | `\par ` |
//! | `<b>`, `</b>` | `\b `, `\b0 ` |
//! | `<i>`, `</i>` | `\i `, `\i0 ` |
//! | `<u>`, `</u>` | `\ul `, `\ul0 ` |
//! | `<br>` | `\line ` |
//! | `&nbsp;` `&amp;` `&lt;` `&gt;` | ` ` `&` `<` `>` |

mod api;
mod error;
mod writer;

pub use api::{export_rtf_bytes, rtf_artifact, DOC_EXTENSION};
pub use error::{RtfError, RtfResult};
pub use writer::{escape_rtf_text, html_to_rtf_body, RtfWriter, RtfWriterConfig};

/// RTF control word constants
pub mod control_words {
    pub const RTF: &str = "rtf";
    pub const ANSI: &str = "ansi";
    pub const ANSICPG: &str = "ansicpg";
    pub const DEFF: &str = "deff";
    pub const DEFLANG: &str = "deflang";
    pub const FONTTBL: &str = "fonttbl";
    pub const INFO: &str = "info";
    pub const TITLE: &str = "title";
    pub const AUTHOR: &str = "author";
    pub const FSWISS: &str = "fswiss";
    pub const U: &str = "u";
}

/// Windows-1252 code page identifier
pub const ANSI_CODE_PAGE: u16 = 1252;

/// English (United States) language identifier
pub const LANG_EN_US: u16 = 1033;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        assert_eq!(control_words::RTF, "rtf");
        assert_eq!(control_words::FONTTBL, "fonttbl");
        assert_eq!(ANSI_CODE_PAGE, 1252);
    }
}
