//! Download trigger
//!
//! A download is a short-lived object URL over the artifact bytes and a
//! link pointing at it. The link is activated once, then removed, and the
//! URL revoked. [`DownloadScope`] runs the cleanup on drop so it also
//! happens when activation fails.

use crate::artifact::ExportArtifact;
use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by a download host
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown object URL: {0}")]
    UnknownObjectUrl(String),

    #[error("Unknown link: {0}")]
    UnknownLink(u64),
}

/// Result type for downloads
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Handle to bytes registered with a host
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to a download link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkHandle(pub u64);

/// Platform download primitives
pub trait DownloadHost {
    /// Register bytes and return a URL addressing them
    fn create_object_url(&mut self, payload: Vec<u8>, mime_type: &str) -> DownloadResult<ObjectUrl>;

    /// Create a link that downloads `url` under `filename`
    fn create_link(&mut self, url: &ObjectUrl, filename: &str) -> DownloadResult<LinkHandle>;

    /// Activate a link, starting the download
    fn activate_link(&mut self, link: LinkHandle) -> DownloadResult<()>;

    fn remove_link(&mut self, link: LinkHandle) -> DownloadResult<()>;

    fn revoke_object_url(&mut self, url: &ObjectUrl) -> DownloadResult<()>;
}

/// Outcome of a completed download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReceipt {
    pub filename: String,
    pub mime_type: &'static str,
    pub size: usize,
}

/// Object URL and link for one download, released on drop
pub struct DownloadScope<'a, H: DownloadHost + ?Sized> {
    host: &'a mut H,
    url: ObjectUrl,
    link: Option<LinkHandle>,
}

impl<'a, H: DownloadHost + ?Sized> DownloadScope<'a, H> {
    /// Register the payload with the host
    pub fn open(host: &'a mut H, payload: Vec<u8>, mime_type: &str) -> DownloadResult<Self> {
        let url = host.create_object_url(payload, mime_type)?;
        Ok(Self {
            host,
            url,
            link: None,
        })
    }

    pub fn url(&self) -> &ObjectUrl {
        &self.url
    }

    /// Create the link and activate it
    pub fn activate(&mut self, filename: &str) -> DownloadResult<()> {
        let link = self.host.create_link(&self.url, filename)?;
        self.link = Some(link);
        self.host.activate_link(link)
    }
}

impl<H: DownloadHost + ?Sized> Drop for DownloadScope<'_, H> {
    fn drop(&mut self) {
        if let Some(link) = self.link.take() {
            if let Err(e) = self.host.remove_link(link) {
                tracing::warn!("Failed to remove download link: {}", e);
            }
        }
        if let Err(e) = self.host.revoke_object_url(&self.url) {
            tracing::warn!("Failed to revoke object URL {}: {}", self.url, e);
        }
    }
}

/// Download an artifact through a host
pub fn trigger_download<H: DownloadHost + ?Sized>(
    host: &mut H,
    artifact: ExportArtifact,
) -> DownloadResult<DownloadReceipt> {
    let size = artifact.len();
    let mut scope = DownloadScope::open(host, artifact.payload, artifact.mime_type)?;
    scope.activate(&artifact.suggested_filename)?;
    tracing::debug!(
        filename = %artifact.suggested_filename,
        url = %scope.url(),
        bytes = size,
        "Download triggered"
    );
    Ok(DownloadReceipt {
        filename: artifact.suggested_filename,
        mime_type: artifact.mime_type,
        size,
    })
}

// =============================================================================
// Directory host
// =============================================================================

#[derive(Debug)]
struct StoredObject {
    payload: Vec<u8>,
    mime_type: String,
}

#[derive(Debug)]
struct Link {
    url: ObjectUrl,
    filename: String,
}

/// Host that saves downloads into a directory
///
/// Object URLs are `blob:<uuid>` handles over in-memory payloads. Activating
/// a link writes the payload to a temporary file in the directory and
/// renames it into place, so a failed save never leaves a partial file.
#[derive(Debug)]
pub struct DirectoryDownloads {
    dir: PathBuf,
    objects: HashMap<ObjectUrl, StoredObject>,
    links: HashMap<LinkHandle, Link>,
    next_link: u64,
    saved: Vec<PathBuf>,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            objects: HashMap::new(),
            links: HashMap::new(),
            next_link: 1,
            saved: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in order
    pub fn saved_files(&self) -> &[PathBuf] {
        &self.saved
    }

    /// Path a download named `filename` is saved to
    pub fn target_path(&self, filename: &str) -> PathBuf {
        self.dir.join(sanitize_filename(filename))
    }

    /// Number of object URLs not yet revoked
    pub fn live_object_urls(&self) -> usize {
        self.objects.len()
    }

    /// Number of links not yet removed
    pub fn live_links(&self) -> usize {
        self.links.len()
    }

    /// MIME type registered for an object URL
    pub fn mime_type(&self, url: &ObjectUrl) -> Option<&str> {
        self.objects.get(url).map(|o| o.mime_type.as_str())
    }
}

impl DownloadHost for DirectoryDownloads {
    fn create_object_url(&mut self, payload: Vec<u8>, mime_type: &str) -> DownloadResult<ObjectUrl> {
        let url = ObjectUrl::new(format!("blob:{}", Uuid::new_v4()));
        self.objects.insert(
            url.clone(),
            StoredObject {
                payload,
                mime_type: mime_type.to_string(),
            },
        );
        Ok(url)
    }

    fn create_link(&mut self, url: &ObjectUrl, filename: &str) -> DownloadResult<LinkHandle> {
        if !self.objects.contains_key(url) {
            return Err(DownloadError::UnknownObjectUrl(url.to_string()));
        }
        let handle = LinkHandle(self.next_link);
        self.next_link += 1;
        self.links.insert(
            handle,
            Link {
                url: url.clone(),
                filename: filename.to_string(),
            },
        );
        Ok(handle)
    }

    fn activate_link(&mut self, link: LinkHandle) -> DownloadResult<()> {
        let entry = self.links.get(&link).ok_or(DownloadError::UnknownLink(link.0))?;
        let object = self
            .objects
            .get(&entry.url)
            .ok_or_else(|| DownloadError::UnknownObjectUrl(entry.url.to_string()))?;

        fs::create_dir_all(&self.dir)?;
        let target = self.target_path(&entry.filename);
        let temp_path = self.dir.join(format!(
            ".{}.tmp",
            sanitize_filename(&entry.filename)
        ));

        // Write to temp file first
        let written = write_file(&temp_path, &object.payload);
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        // Atomic rename
        if let Err(e) = fs::rename(&temp_path, &target) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %target.display(), "Saved download");
        self.saved.push(target);
        Ok(())
    }

    fn remove_link(&mut self, link: LinkHandle) -> DownloadResult<()> {
        self.links
            .remove(&link)
            .map(|_| ())
            .ok_or(DownloadError::UnknownLink(link.0))
    }

    fn revoke_object_url(&mut self, url: &ObjectUrl) -> DownloadResult<()> {
        self.objects
            .remove(url)
            .map(|_| ())
            .ok_or_else(|| DownloadError::UnknownObjectUrl(url.to_string()))
    }
}

fn write_file(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Make a suggested filename safe to use as a single path component
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        "download".to_string()
    } else {
        trimmed.to_string()
    }
}
