//! Layout Engine - Pagination estimation for the live view and exports
//!
//! Pagination here is a heuristic, not a layout oracle: the live view places
//! advisory page markers at fixed pixel intervals and the page count comes
//! from a words-per-page estimate. The PDF exporter uses the same page height
//! so on-screen and exported page counts agree.

mod error;
mod paginator;

pub use error::*;
pub use paginator::*;
