//! PDF encoder
//!
//! Composes one PDF page per page of the live view. Each page gets the
//! resolved header, a slice of the rendered content, and the resolved
//! footer, each captured as a bitmap. Pages are produced strictly in order
//! and the encoder yields to the runtime between them.

use super::document::{DocumentInfo, PdfDocument, PdfPage, Placement, PlacedImage};
use super::error::{PdfError, PdfResult};
use super::images::ImageXObject;
use super::layout::{PageLayout, Rect};
use super::raster::{RasterResult, RenderedView, StagedMarkup, StagingArea};
use crate::settings::ExportSettings;
use chrono::{Local, NaiveDate};
use doc_model::header_footer::resolve;
use doc_model::{DocumentMetadata, HeaderFooterKind, PAGE_HEIGHT_PX};
use layout_engine::page_count_for_height;

/// Default scale factor for content capture
pub const DEFAULT_RASTER_SCALE: f64 = 2.0;

/// PDF encoder configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PdfEncoder {
    /// Height of one page of the live view in pixels
    pub page_height_px: f64,
    /// Resolution multiplier for content slices
    pub raster_scale: f64,
    /// Whether streams are Flate-compressed
    pub compress: bool,
    pub layout: PageLayout,
}

impl Default for PdfEncoder {
    fn default() -> Self {
        Self {
            page_height_px: PAGE_HEIGHT_PX,
            raster_scale: DEFAULT_RASTER_SCALE,
            compress: true,
            layout: PageLayout::letter(),
        }
    }
}

impl From<&ExportSettings> for PdfEncoder {
    fn from(settings: &ExportSettings) -> Self {
        Self {
            page_height_px: settings.page_height_px,
            raster_scale: settings.raster_scale,
            compress: settings.compress_pdf,
            ..Self::default()
        }
    }
}

impl PdfEncoder {
    /// Encode using today's local date for `[Current Date]`
    pub async fn encode<V, S>(
        &self,
        metadata: &DocumentMetadata,
        view: &V,
        staging: &mut S,
    ) -> PdfResult<PdfDocument>
    where
        V: RenderedView + ?Sized,
        S: StagingArea + ?Sized,
    {
        self.encode_on(metadata, view, staging, Local::now().date_naive())
            .await
    }

    /// Encode with an explicit date for `[Current Date]`
    pub async fn encode_on<V, S>(
        &self,
        metadata: &DocumentMetadata,
        view: &V,
        staging: &mut S,
        today: NaiveDate,
    ) -> PdfResult<PdfDocument>
    where
        V: RenderedView + ?Sized,
        S: StagingArea + ?Sized,
    {
        let total = page_count_for_height(view.content_height_px(), self.page_height_px);
        let total_u32 = u32::try_from(total)
            .map_err(|_| PdfError::InvalidDocument(format!("{} pages", total)))?;
        tracing::debug!(pages = total, title = %metadata.title, "Encoding PDF");

        let info = DocumentInfo::new(&metadata.title, &metadata.author, metadata.last_updated);
        let mut document = PdfDocument::new(info, self.layout);
        document.compress = self.compress;

        for number in 1..=total_u32 {
            let page = self
                .compose_page(metadata, view, staging, number, total_u32, today)
                .await
                .map_err(|source| PdfError::Raster {
                    page: number as usize,
                    source,
                })?;
            document.pages.push(page);
            tokio::task::yield_now().await;
        }

        Ok(document)
    }

    async fn compose_page<V, S>(
        &self,
        metadata: &DocumentMetadata,
        view: &V,
        staging: &mut S,
        number: u32,
        total: u32,
        today: NaiveDate,
    ) -> RasterResult<PdfPage>
    where
        V: RenderedView + ?Sized,
        S: StagingArea + ?Sized,
    {
        let mut page = PdfPage::new(number as usize);

        let header = resolve(HeaderFooterKind::Header, metadata, number, total, today);
        if let Some(image) = self
            .capture_band(staging, HeaderFooterKind::Header.is_visible(metadata), &header)
            .await?
        {
            page.images.push(placed(Placement::Header, self.layout.header, image));
        }

        let top = f64::from(number - 1) * self.page_height_px;
        let slice = view
            .rasterize_slice(top, self.page_height_px, self.raster_scale)
            .await?;
        page.images.push(placed(
            Placement::Content,
            self.layout.content,
            ImageXObject::from_raster(slice)?,
        ));

        let footer = resolve(HeaderFooterKind::Footer, metadata, number, total, today);
        if let Some(image) = self
            .capture_band(staging, HeaderFooterKind::Footer.is_visible(metadata), &footer)
            .await?
        {
            page.images.push(placed(Placement::Footer, self.layout.footer, image));
        }

        tracing::trace!(page = number, images = page.images.len(), "Composed PDF page");
        Ok(page)
    }

    /// Stage and capture a header or footer, skipping hidden or empty bands
    async fn capture_band<S>(
        &self,
        staging: &mut S,
        visible: bool,
        markup: &str,
    ) -> RasterResult<Option<ImageXObject>>
    where
        S: StagingArea + ?Sized,
    {
        if !visible || markup.trim().is_empty() {
            return Ok(None);
        }
        let mut staged = StagedMarkup::attach(staging, markup).await?;
        let image = staged.rasterize().await?;
        drop(staged);
        Ok(Some(ImageXObject::from_raster(image)?))
    }
}

fn placed(placement: Placement, rect: Rect, image: ImageXObject) -> PlacedImage {
    PlacedImage {
        placement,
        rect,
        image,
    }
}
