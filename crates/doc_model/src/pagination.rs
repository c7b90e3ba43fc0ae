//! Pagination state and page geometry
//!
//! The live view paginates with fixed-height advisory markers; content flows
//! continuously beneath them. Exported formats use US-Letter geometry.

use crate::{DocModelError, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Geometry constants
// =============================================================================

/// On-screen reference page height in CSS pixels
pub const PAGE_HEIGHT_PX: f64 = 1054.0;

/// Default words-per-page heuristic
pub const DEFAULT_WORDS_PER_PAGE: usize = 500;

/// Twentieths of a point per inch
pub const TWIPS_PER_INCH: u32 = 1440;

/// PDF points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Page geometry in twips (twentieths of a point)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: u32,
    pub height: u32,
    pub margin_top: u32,
    pub margin_right: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
}

impl PageGeometry {
    /// US Letter (8.5 x 11 inches) with 1-inch margins
    pub const fn us_letter() -> Self {
        Self {
            width: 12240,
            height: 15840,
            margin_top: TWIPS_PER_INCH,
            margin_right: TWIPS_PER_INCH,
            margin_bottom: TWIPS_PER_INCH,
            margin_left: TWIPS_PER_INCH,
        }
    }

    /// Page width in points
    pub fn width_pt(&self) -> f64 {
        twips_to_points(self.width)
    }

    /// Page height in points
    pub fn height_pt(&self) -> f64 {
        twips_to_points(self.height)
    }

    /// Top margin in points
    pub fn margin_top_pt(&self) -> f64 {
        twips_to_points(self.margin_top)
    }

    /// Left margin in points
    pub fn margin_left_pt(&self) -> f64 {
        twips_to_points(self.margin_left)
    }

    /// Right margin in points
    pub fn margin_right_pt(&self) -> f64 {
        twips_to_points(self.margin_right)
    }

    /// Bottom margin in points
    pub fn margin_bottom_pt(&self) -> f64 {
        twips_to_points(self.margin_bottom)
    }

    /// Width between the left and right margins, in points
    pub fn content_width_pt(&self) -> f64 {
        self.width_pt() - self.margin_left_pt() - self.margin_right_pt()
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::us_letter()
    }
}

/// Convert twips to PDF points
pub fn twips_to_points(twips: u32) -> f64 {
    twips as f64 / 20.0
}

// =============================================================================
// Pagination State
// =============================================================================

/// Derived pagination of the live view
///
/// Recomputed on every content change and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    current_page: u32,
    total_pages: u32,
    page_height_px: f64,
}

impl PaginationState {
    /// A single-page state with the given page height
    pub fn new(page_height_px: f64) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            page_height_px,
        }
    }

    /// Current page (1-based)
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total pages, always at least 1
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Height of one page in pixels
    pub fn page_height_px(&self) -> f64 {
        self.page_height_px
    }

    /// Replace the page count, keeping the current page in range
    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
        self.current_page = self.current_page.min(self.total_pages);
    }

    /// Move to a page, clamping into `1..=total_pages`
    pub fn go_to_page(&mut self, page: u32) {
        self.current_page = page.clamp(1, self.total_pages);
    }

    /// Move to a page, rejecting numbers outside the document
    pub fn try_go_to_page(&mut self, page: u32) -> Result<()> {
        if page == 0 || page > self.total_pages {
            return Err(DocModelError::InvalidPageNumber {
                page,
                total: self.total_pages,
            });
        }
        self.current_page = page;
        Ok(())
    }

    /// Whether a next page exists
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether a previous page exists
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(PAGE_HEIGHT_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_letter_geometry() {
        let geometry = PageGeometry::us_letter();
        assert_eq!(geometry.width, 12240);
        assert_eq!(geometry.height, 15840);
        assert_eq!(geometry.margin_left, 1440);
        assert_eq!(geometry.width_pt(), 612.0);
        assert_eq!(geometry.height_pt(), 792.0);
        assert_eq!(geometry.margin_top_pt(), 72.0);
        assert_eq!(geometry.content_width_pt(), 468.0);
    }

    #[test]
    fn test_state_defaults() {
        let state = PaginationState::default();
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_pages(), 1);
        assert_eq!(state.page_height_px(), PAGE_HEIGHT_PX);
    }

    #[test]
    fn test_total_pages_never_zero() {
        let mut state = PaginationState::default();
        state.set_total_pages(0);
        assert_eq!(state.total_pages(), 1);
    }

    #[test]
    fn test_shrinking_clamps_current_page() {
        let mut state = PaginationState::default();
        state.set_total_pages(5);
        state.go_to_page(5);
        state.set_total_pages(2);
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut state = PaginationState::default();
        state.set_total_pages(3);
        state.go_to_page(0);
        assert_eq!(state.current_page(), 1);
        state.go_to_page(9);
        assert_eq!(state.current_page(), 3);
        assert!(!state.has_next());
        assert!(state.has_previous());
    }

    #[test]
    fn test_try_go_to_page_rejects_out_of_range() {
        let mut state = PaginationState::default();
        state.set_total_pages(2);
        assert!(state.try_go_to_page(2).is_ok());
        assert!(matches!(
            state.try_go_to_page(3),
            Err(DocModelError::InvalidPageNumber { page: 3, total: 2 })
        ));
    }
}
