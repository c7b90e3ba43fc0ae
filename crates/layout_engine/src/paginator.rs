//! Pagination Estimator
//!
//! Computes page counts from word counts or rendered heights, the offsets of
//! the advisory page-break markers, and the mapping between scroll offsets
//! and page numbers.

use crate::{LayoutError, Result};
use doc_model::{PaginationState, DEFAULT_WORDS_PER_PAGE, PAGE_HEIGHT_PX};
use serde::{Deserialize, Serialize};

// =============================================================================
// Page count
// =============================================================================

/// Estimate the page count of a document from its plain text
///
/// Counts whitespace-separated words and returns
/// `max(1, ceil(words / words_per_page))`. An empty or whitespace-only
/// document is one page. A `words_per_page` of zero is treated as one.
pub fn compute_page_count(plain_text: &str, words_per_page: usize) -> usize {
    pages_for_word_count(count_words(plain_text), words_per_page)
}

/// Page count for a known word count
pub fn pages_for_word_count(word_count: usize, words_per_page: usize) -> usize {
    word_count.div_ceil(words_per_page.max(1)).max(1)
}

/// Number of whitespace-separated words
pub fn count_words(plain_text: &str) -> usize {
    plain_text.split_whitespace().count()
}

/// Page count for a rendered content height
///
/// Returns `max(1, ceil(height / page_height))`. Non-finite or
/// non-positive heights count as a single page.
pub fn page_count_for_height(content_height_px: f64, page_height_px: f64) -> usize {
    if !content_height_px.is_finite()
        || !page_height_px.is_finite()
        || content_height_px <= 0.0
        || page_height_px <= 0.0
    {
        return 1;
    }
    ((content_height_px / page_height_px).ceil() as usize).max(1)
}

// =============================================================================
// Page markers
// =============================================================================

/// Offsets of the page-break markers from the top of the content
///
/// One offset per boundary: `page_height * i` for `i` in `1..total_pages`.
pub fn page_break_offsets(total_pages: usize, page_height_px: f64) -> Vec<f64> {
    (1..total_pages)
        .map(|index| page_height_px * index as f64)
        .collect()
}

/// An advisory page-break overlay in the live view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMarker {
    /// Distance from the top of the content in pixels
    pub top_px: f64,
    /// Page that begins at this marker (1-based)
    pub page_number: usize,
}

impl PageMarker {
    /// Label drawn next to the marker
    pub fn label(&self) -> String {
        format!("Page {}", self.page_number)
    }
}

/// Markers for every page boundary
pub fn page_markers(total_pages: usize, page_height_px: f64) -> Vec<PageMarker> {
    page_break_offsets(total_pages, page_height_px)
        .into_iter()
        .enumerate()
        .map(|(index, top_px)| PageMarker {
            top_px,
            page_number: index + 2,
        })
        .collect()
}

// =============================================================================
// Scroll mapping
// =============================================================================

/// Scroll offset that brings a page to the top of the viewport
pub fn scroll_offset_for_page(page: usize, page_height_px: f64) -> f64 {
    page.saturating_sub(1) as f64 * page_height_px
}

/// Page shown at a given scroll offset (1-based)
pub fn page_at_scroll_offset(scroll_top_px: f64, page_height_px: f64) -> usize {
    if !scroll_top_px.is_finite() || scroll_top_px <= 0.0 || page_height_px <= 0.0 {
        return 1;
    }
    (scroll_top_px / page_height_px).floor() as usize + 1
}

// =============================================================================
// Paginator
// =============================================================================

/// Live-view paginator driven by content-change notifications
///
/// The rich text engine notifies on every edit, selection change, focus
/// change, and transaction commit. Each notification recomputes the page
/// count synchronously; nothing is cached.
#[derive(Debug, Clone)]
pub struct Paginator {
    words_per_page: usize,
    state: PaginationState,
}

impl Paginator {
    /// Create a paginator
    pub fn new(words_per_page: usize, page_height_px: f64) -> Result<Self> {
        if words_per_page == 0 {
            return Err(LayoutError::InvalidPageSetup(
                "words per page must be positive".to_string(),
            ));
        }
        if !page_height_px.is_finite() || page_height_px <= 0.0 {
            return Err(LayoutError::InvalidPageSetup(format!(
                "page height must be positive, got {}",
                page_height_px
            )));
        }
        Ok(Self {
            words_per_page,
            state: PaginationState::new(page_height_px),
        })
    }

    /// Words per page used by the estimate
    pub fn words_per_page(&self) -> usize {
        self.words_per_page
    }

    /// Current pagination
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Recompute the page count after a content change
    pub fn on_content_changed(&mut self, plain_text: &str) -> &PaginationState {
        let pages = compute_page_count(plain_text, self.words_per_page);
        self.state.set_total_pages(u32::try_from(pages).unwrap_or(u32::MAX));
        tracing::trace!(
            pages = self.state.total_pages(),
            words_per_page = self.words_per_page,
            "Recomputed pagination"
        );
        &self.state
    }

    /// Track the page under the viewport after a scroll
    pub fn on_scroll(&mut self, scroll_top_px: f64) -> u32 {
        let page = page_at_scroll_offset(scroll_top_px, self.state.page_height_px());
        self.state.go_to_page(u32::try_from(page).unwrap_or(u32::MAX));
        self.state.current_page()
    }

    /// Scroll offset for a page, updating the current page
    pub fn scroll_to_page(&mut self, page: u32) -> f64 {
        self.state.go_to_page(page);
        scroll_offset_for_page(self.state.current_page() as usize, self.state.page_height_px())
    }

    /// Markers for the current page count
    pub fn markers(&self) -> Vec<PageMarker> {
        page_markers(self.state.total_pages() as usize, self.state.page_height_px())
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            words_per_page: DEFAULT_WORDS_PER_PAGE,
            state: PaginationState::new(PAGE_HEIGHT_PX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_empty_document_is_one_page() {
        assert_eq!(compute_page_count("", 500), 1);
        assert_eq!(compute_page_count("   \n\t  ", 500), 1);
    }

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(compute_page_count(&words(500), 500), 1);
        assert_eq!(compute_page_count(&words(501), 500), 2);
        assert_eq!(compute_page_count(&words(1200), 500), 3);
    }

    #[test]
    fn test_whitespace_runs_are_one_separator() {
        assert_eq!(count_words("a  b\n\nc\t d"), 4);
    }

    #[test]
    fn test_zero_words_per_page() {
        assert_eq!(compute_page_count(&words(3), 0), 3);
    }

    #[test]
    fn test_page_count_for_height() {
        assert_eq!(page_count_for_height(0.0, PAGE_HEIGHT_PX), 1);
        assert_eq!(page_count_for_height(1054.0, PAGE_HEIGHT_PX), 1);
        assert_eq!(page_count_for_height(1055.0, PAGE_HEIGHT_PX), 2);
        assert_eq!(page_count_for_height(f64::NAN, PAGE_HEIGHT_PX), 1);
        assert_eq!(page_count_for_height(500.0, 0.0), 1);
    }

    #[test]
    fn test_page_break_offsets() {
        assert!(page_break_offsets(1, 1054.0).is_empty());
        assert_eq!(page_break_offsets(3, 1054.0), vec![1054.0, 2108.0]);
    }

    #[test]
    fn test_page_markers_label_next_page() {
        let markers = page_markers(3, 100.0);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].top_px, 100.0);
        assert_eq!(markers[0].label(), "Page 2");
        assert_eq!(markers[1].label(), "Page 3");
    }

    #[test]
    fn test_scroll_mapping() {
        assert_eq!(scroll_offset_for_page(1, 1054.0), 0.0);
        assert_eq!(scroll_offset_for_page(3, 1054.0), 2108.0);
        assert_eq!(page_at_scroll_offset(0.0, 1054.0), 1);
        assert_eq!(page_at_scroll_offset(1053.9, 1054.0), 1);
        assert_eq!(page_at_scroll_offset(1054.0, 1054.0), 2);
    }

    #[test]
    fn test_paginator_rejects_bad_setup() {
        assert!(Paginator::new(0, PAGE_HEIGHT_PX).is_err());
        assert!(Paginator::new(500, 0.0).is_err());
        assert!(Paginator::new(500, f64::INFINITY).is_err());
    }

    #[test]
    fn test_paginator_tracks_content_changes() {
        let mut paginator = Paginator::default();
        assert_eq!(paginator.on_content_changed(&words(1200)).total_pages(), 3);

        paginator.scroll_to_page(3);
        assert_eq!(paginator.state().current_page(), 3);

        // Deleting text shrinks the document and clamps the current page
        assert_eq!(paginator.on_content_changed("short").total_pages(), 1);
        assert_eq!(paginator.state().current_page(), 1);
    }

    #[test]
    fn test_paginator_scroll() {
        let mut paginator = Paginator::new(10, 100.0).unwrap();
        paginator.on_content_changed(&words(35));
        assert_eq!(paginator.on_scroll(250.0), 3);
        assert_eq!(paginator.on_scroll(10_000.0), 4);
        assert_eq!(paginator.scroll_to_page(2), 100.0);
        assert_eq!(paginator.markers().len(), 3);
    }

    proptest! {
        #[test]
        fn prop_matches_ceiling(w in 1usize..100_000, s in 1usize..5_000) {
            prop_assert_eq!(compute_page_count(&words(w.min(5_000)), s), w.min(5_000).div_ceil(s));
        }

        #[test]
        fn prop_monotonic(w in 0usize..20_000, extra in 0usize..5_000, s in 1usize..2_000) {
            prop_assert!(pages_for_word_count(w, s) <= pages_for_word_count(w + extra, s));
        }

        #[test]
        fn prop_never_zero(text in "\\PC*", s in 0usize..1_000) {
            prop_assert!(compute_page_count(&text, s) >= 1);
        }
    }
}
