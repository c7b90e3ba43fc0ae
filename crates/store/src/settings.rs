//! Export settings management
//!
//! Settings are persisted as JSON next to the application data. A missing
//! file yields defaults; an unreadable one is logged and replaced by defaults.

use crate::{Result, StoreError};
use doc_model::{DEFAULT_WORDS_PER_PAGE, PAGE_HEIGHT_PX};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file name inside the settings directory
pub const SETTINGS_FILE_NAME: &str = "export-settings.json";

/// Configuration for pagination and export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    /// Words-per-page heuristic for the live view
    pub words_per_page: usize,
    /// Height of one page of the live view in pixels
    pub page_height_px: f64,
    /// Scale factor for content rasterization in PDF export
    pub raster_scale: f64,
    /// Default font named in the RTF font table
    pub default_font: String,
    /// Whether PDF streams are Flate-compressed
    pub compress_pdf: bool,
    /// Directory where downloads are saved
    pub downloads_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            words_per_page: DEFAULT_WORDS_PER_PAGE,
            page_height_px: PAGE_HEIGHT_PX,
            raster_scale: 2.0,
            default_font: "Calibri".to_string(),
            compress_pdf: true,
            downloads_dir: PathBuf::from("downloads"),
        }
    }
}

impl ExportSettings {
    /// Builder: set the downloads directory
    pub fn with_downloads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.downloads_dir = dir.into();
        self
    }

    /// Builder: set the words-per-page heuristic
    pub fn with_words_per_page(mut self, words_per_page: usize) -> Self {
        self.words_per_page = words_per_page;
        self
    }

    /// Builder: enable or disable PDF stream compression
    pub fn with_pdf_compression(mut self, compress: bool) -> Self {
        self.compress_pdf = compress;
        self
    }

    /// Check that numeric settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.words_per_page == 0 {
            return Err(StoreError::InvalidSettings(
                "wordsPerPage must be positive".to_string(),
            ));
        }
        if !(self.page_height_px.is_finite() && self.page_height_px > 0.0) {
            return Err(StoreError::InvalidSettings(format!(
                "pageHeightPx must be positive, got {}",
                self.page_height_px
            )));
        }
        if !(self.raster_scale.is_finite() && self.raster_scale > 0.0) {
            return Err(StoreError::InvalidSettings(format!(
                "rasterScale must be positive, got {}",
                self.raster_scale
            )));
        }
        Ok(())
    }
}

/// Settings manager for loading, saving, and updating export settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: ExportSettings,
}

impl SettingsManager {
    /// Create a settings manager rooted at a directory
    pub fn new(settings_dir: impl AsRef<Path>) -> Self {
        Self {
            settings_path: settings_dir.as_ref().join(SETTINGS_FILE_NAME),
            current: ExportSettings::default(),
        }
    }

    /// Create a settings manager for an explicit file path
    pub fn with_path(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            current: ExportSettings::default(),
        }
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub async fn load(&mut self) -> Result<&ExportSettings> {
        if tokio::fs::try_exists(&self.settings_path).await? {
            let content = tokio::fs::read_to_string(&self.settings_path).await?;
            self.current = parse_or_default(&content);
        } else {
            self.current = ExportSettings::default();
        }
        Ok(&self.current)
    }

    /// Load settings synchronously (for use during startup)
    pub fn load_sync(&mut self) -> Result<&ExportSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            self.current = parse_or_default(&content);
        } else {
            self.current = ExportSettings::default();
        }
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        tokio::fs::write(&self.settings_path, content).await?;
        Ok(())
    }

    /// Save settings synchronously
    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &ExportSettings {
        &self.current
    }

    /// Validate, replace, and save settings
    pub async fn update(&mut self, settings: ExportSettings) -> Result<()> {
        settings.validate()?;
        self.current = settings;
        self.save().await
    }

    /// Validate, replace, and save settings synchronously
    pub fn update_sync(&mut self, settings: ExportSettings) -> Result<()> {
        settings.validate()?;
        self.current = settings;
        self.save_sync()
    }

    /// Reset settings to defaults and save
    pub fn reset_sync(&mut self) -> Result<&ExportSettings> {
        self.current = ExportSettings::default();
        self.save_sync()?;
        Ok(&self.current)
    }
}

fn parse_or_default(content: &str) -> ExportSettings {
    match serde_json::from_str::<ExportSettings>(content) {
        Ok(settings) => match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                tracing::warn!("Invalid export settings, using defaults: {}", e);
                ExportSettings::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to parse settings file, using defaults: {}", e);
            ExportSettings::default()
        }
    }
}
