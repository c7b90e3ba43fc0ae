//! Export orchestrator
//!
//! Dispatches an export request to the matching converter. DOC and DOCX
//! artifacts are downloaded through the host; a PDF is returned to the
//! caller, who decides whether to download it.

use super::download::{trigger_download, DownloadHost, DownloadReceipt};
use super::error::{ExportError, ExportResult};
use super::format::ExportFormat;
use crate::docx::docx_artifact;
use crate::pdf::{PdfDocument, PdfEncoder, RenderedView, StagingArea};
use crate::rtf::{rtf_artifact, RtfWriterConfig};
use crate::settings::ExportSettings;
use doc_model::{DocumentContent, DocumentMetadata};
use std::error::Error as _;

/// What to export
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    pub metadata: &'a DocumentMetadata,
    pub content: &'a DocumentContent,
    /// Format token as supplied by the caller, e.g. `"docx"`
    pub format: &'a str,
}

impl<'a> ExportRequest<'a> {
    pub fn new(metadata: &'a DocumentMetadata, content: &'a DocumentContent, format: &'a str) -> Self {
        Self {
            metadata,
            content,
            format,
        }
    }
}

/// Live view and staging area needed for PDF export
pub struct PdfSurface<'a> {
    pub view: &'a dyn RenderedView,
    pub staging: &'a mut dyn StagingArea,
}

impl<'a> PdfSurface<'a> {
    pub fn new(view: &'a dyn RenderedView, staging: &'a mut dyn StagingArea) -> Self {
        Self { view, staging }
    }
}

/// Result of a successful export
#[derive(Debug)]
pub enum ExportOutcome {
    /// A DOC or DOCX file was downloaded
    Downloaded(DownloadReceipt),
    /// A composed PDF, not yet downloaded
    Pdf(PdfDocument),
}

impl ExportOutcome {
    pub fn receipt(&self) -> Option<&DownloadReceipt> {
        match self {
            ExportOutcome::Downloaded(receipt) => Some(receipt),
            ExportOutcome::Pdf(_) => None,
        }
    }

    pub fn into_pdf(self) -> Option<PdfDocument> {
        match self {
            ExportOutcome::Pdf(document) => Some(document),
            ExportOutcome::Downloaded(_) => None,
        }
    }
}

/// Runs exports against a download host
pub struct Exporter<H: DownloadHost> {
    settings: ExportSettings,
    host: H,
}

impl<H: DownloadHost> Exporter<H> {
    pub fn new(settings: ExportSettings, host: H) -> Self {
        Self { settings, host }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Export a document in the requested format
    ///
    /// The format is parsed before any converter runs, so an unknown token
    /// never reaches the download host.
    pub async fn export_document(
        &mut self,
        request: ExportRequest<'_>,
        surface: Option<PdfSurface<'_>>,
    ) -> ExportResult<ExportOutcome> {
        let format: ExportFormat = match request.format.parse() {
            Ok(format) => format,
            Err(e) => {
                tracing::error!("Export rejected: {}", e);
                return Err(e);
            }
        };
        tracing::debug!(%format, title = %request.metadata.title, "Starting export");

        let result = match format {
            ExportFormat::Doc => self.export_doc(&request),
            ExportFormat::Docx => self.export_docx(&request),
            ExportFormat::Pdf => self.export_pdf(&request, surface).await,
        };

        match &result {
            Ok(ExportOutcome::Downloaded(receipt)) => {
                tracing::debug!(%format, filename = %receipt.filename, bytes = receipt.size, "Export complete");
            }
            Ok(ExportOutcome::Pdf(document)) => {
                tracing::debug!(%format, pages = document.page_count(), "Export complete");
            }
            Err(e) => log_failure(format, e),
        }
        result
    }

    /// Download a PDF previously returned by [`Exporter::export_document`]
    pub fn download_pdf(&mut self, document: PdfDocument) -> ExportResult<DownloadReceipt> {
        let result = document
            .into_artifact()
            .map_err(|e| ExportError::failed(ExportFormat::Pdf, e))
            .and_then(|artifact| {
                trigger_download(&mut self.host, artifact)
                    .map_err(|e| ExportError::failed(ExportFormat::Pdf, e))
            });
        if let Err(e) = &result {
            log_failure(ExportFormat::Pdf, e);
        }
        result
    }

    fn export_doc(&mut self, request: &ExportRequest<'_>) -> ExportResult<ExportOutcome> {
        let config = RtfWriterConfig {
            default_font: self.settings.default_font.clone(),
            ..RtfWriterConfig::default()
        };
        let artifact = rtf_artifact(request.metadata, request.content, config)
            .map_err(|e| ExportError::failed(ExportFormat::Doc, e))?;
        tracing::debug!(bytes = artifact.len(), "RTF written");

        let receipt = trigger_download(&mut self.host, artifact)
            .map_err(|e| ExportError::failed(ExportFormat::Doc, e))?;
        Ok(ExportOutcome::Downloaded(receipt))
    }

    fn export_docx(&mut self, request: &ExportRequest<'_>) -> ExportResult<ExportOutcome> {
        let artifact = docx_artifact(request.metadata, request.content)
            .map_err(|e| ExportError::failed(ExportFormat::Docx, e))?;
        tracing::debug!(bytes = artifact.len(), "DOCX written");

        let receipt = trigger_download(&mut self.host, artifact)
            .map_err(|e| ExportError::failed(ExportFormat::Docx, e))?;
        Ok(ExportOutcome::Downloaded(receipt))
    }

    async fn export_pdf(
        &mut self,
        request: &ExportRequest<'_>,
        surface: Option<PdfSurface<'_>>,
    ) -> ExportResult<ExportOutcome> {
        let surface = surface.ok_or(ExportError::MissingRenderedView)?;
        let encoder = PdfEncoder::from(&self.settings);
        let document = encoder
            .encode(request.metadata, surface.view, surface.staging)
            .await
            .map_err(|e| ExportError::failed(ExportFormat::Pdf, e))?;
        Ok(ExportOutcome::Pdf(document))
    }
}

fn log_failure(format: ExportFormat, error: &ExportError) {
    match error.source() {
        Some(cause) => tracing::error!(%format, "{}: {}", error, cause),
        None => tracing::error!(%format, "{}", error),
    }
}
