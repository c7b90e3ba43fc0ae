//! Document metadata owned by the editing session
//!
//! The settings panels mutate these values; the export subsystem only reads
//! them. Field names serialize in camelCase so the same JSON the settings UI
//! produces can be loaded directly.

use crate::{DocModelError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-page header or footer variants
///
/// When neither flag is set, the base content of the owning
/// [`DocumentMetadata`] applies to every page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageVariantSettings {
    /// Use `first_page_content` on page 1
    pub different_first_page: bool,
    /// Markup shown on the first page
    pub first_page_content: Option<String>,
    /// Alternate between `odd_page_content` and `even_page_content`
    pub different_odd_even: bool,
    /// Markup shown on odd pages
    pub odd_page_content: Option<String>,
    /// Markup shown on even pages
    pub even_page_content: Option<String>,
}

impl PageVariantSettings {
    /// Create settings with no variants
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: enable a distinct first page with the given markup
    pub fn with_first_page(mut self, content: impl Into<String>) -> Self {
        self.different_first_page = true;
        self.first_page_content = Some(content.into());
        self
    }

    /// Builder: enable distinct odd and even pages
    pub fn with_odd_even(mut self, odd: impl Into<String>, even: impl Into<String>) -> Self {
        self.different_odd_even = true;
        self.odd_page_content = Some(odd.into());
        self.even_page_content = Some(even.into());
        self
    }

    /// Whether any per-page variant is enabled
    pub fn uses_variants(&self) -> bool {
        self.different_first_page || self.different_odd_even
    }

    /// First-page markup, empty when unset
    pub fn first_page(&self) -> &str {
        self.first_page_content.as_deref().unwrap_or("")
    }

    /// Odd-page markup, empty when unset
    pub fn odd_page(&self) -> &str {
        self.odd_page_content.as_deref().unwrap_or("")
    }

    /// Even-page markup, empty when unset
    pub fn even_page(&self) -> &str {
        self.even_page_content.as_deref().unwrap_or("")
    }
}

/// Metadata describing the document being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    pub last_updated: DateTime<Utc>,
    /// Page background color (CSS color string)
    pub theme: String,
    pub header_content: String,
    pub footer_content: String,
    #[serde(default = "default_visible")]
    pub header_visible: bool,
    #[serde(default = "default_visible")]
    pub footer_visible: bool,
    #[serde(default)]
    pub header_settings: PageVariantSettings,
    #[serde(default)]
    pub footer_settings: PageVariantSettings,
}

fn default_visible() -> bool {
    true
}

impl DocumentMetadata {
    /// Create metadata with empty headers and footers
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            last_updated: Utc::now(),
            theme: "#ffffff".to_string(),
            header_content: String::new(),
            footer_content: String::new(),
            header_visible: true,
            footer_visible: true,
            header_settings: PageVariantSettings::default(),
            footer_settings: PageVariantSettings::default(),
        }
    }

    /// Builder: set the base header markup
    pub fn with_header(mut self, content: impl Into<String>) -> Self {
        self.header_content = content.into();
        self
    }

    /// Builder: set the base footer markup
    pub fn with_footer(mut self, content: impl Into<String>) -> Self {
        self.footer_content = content.into();
        self
    }

    /// Builder: set header variants
    pub fn with_header_settings(mut self, settings: PageVariantSettings) -> Self {
        self.header_settings = settings;
        self
    }

    /// Builder: set footer variants
    pub fn with_footer_settings(mut self, settings: PageVariantSettings) -> Self {
        self.footer_settings = settings;
        self
    }

    /// Builder: set the last-updated timestamp
    pub fn with_last_updated(mut self, last_updated: DateTime<Utc>) -> Self {
        self.last_updated = last_updated;
        self
    }

    /// Whether either header or footer requests a distinct first page
    pub fn has_different_first_page(&self) -> bool {
        self.header_settings.different_first_page || self.footer_settings.different_first_page
    }

    /// Parse metadata from the settings UI's JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        let metadata: Self = serde_json::from_str(json)?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Serialize metadata to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants export relies on
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(DocModelError::InvalidMetadata(
                "title must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self::new("Untitled Document", "")
    }
}
