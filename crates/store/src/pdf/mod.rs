//! PDF Export Module
//!
//! Builds PDF files from captured bitmaps of the live view. Each page is the
//! resolved header, a page-height slice of the rendered content, and the
//! resolved footer, placed in fixed bands on a US Letter page.
//!
//! # Architecture
//!
//! - `raster`: Rendered view and staging area collaborators
//! - `encoder`: Per-page composition
//! - `layout`: Header, content, and footer bands
//! - `document`: Composed pages and document info
//! - `images`: Image XObject generation
//! - `content`: Content stream generation
//! - `objects`: PDF object model
//! - `writer`: File structure, cross-reference table, compression

mod content;
mod document;
mod encoder;
mod error;
mod images;
mod layout;
mod objects;
pub(crate) mod raster;
mod writer;

pub use document::{DocumentInfo, PdfDocument, PdfPage, Placement, PlacedImage, PDF_EXTENSION};
pub use encoder::{PdfEncoder, DEFAULT_RASTER_SCALE};
pub use error::{PdfError, PdfResult};
pub use images::ImageXObject;
pub use layout::{PageLayout, Rect, BAND_GAP_PT, BAND_HEIGHT_PT};
pub use raster::{
    RasterError, RasterImage, RasterResult, RenderedView, StagedMarkup, StagingArea, StagingNode,
};
