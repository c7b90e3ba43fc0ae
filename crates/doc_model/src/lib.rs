//! Document Model - Metadata, content, and pagination types for export
//!
//! This crate provides the data the export subsystem reads: document
//! metadata with per-page header/footer variants, the serialized content
//! string, derived pagination state, and the header/footer resolver.

mod content;
mod error;
pub mod header_footer;
mod metadata;
pub mod pagination;

pub use content::*;
pub use error::*;
pub use header_footer::{
    format_long_date, resolve_footer, resolve_footer_on, resolve_header, HeaderFooterKind,
};
pub use metadata::*;
pub use pagination::*;
