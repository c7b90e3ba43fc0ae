//! Page bands
//!
//! Every exported page is split into three horizontal bands inside the
//! margins: header at the top, content in the middle, footer at the bottom.
//! Positions are in PDF points with the origin at the lower-left corner.

use doc_model::PageGeometry;

/// Height of the header and footer bands in points
pub const BAND_HEIGHT_PT: f64 = 36.0;
/// Vertical gap between a band and the content in points
pub const BAND_GAP_PT: f64 = 12.0;

/// A rectangle in PDF user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Lower-left x
    pub x: f64,
    /// Lower-left y
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Distance of the top edge from the top of a page of `page_height`
    pub fn top_from_page_top(&self, page_height: f64) -> f64 {
        page_height - (self.y + self.height)
    }
}

/// Band geometry for one page size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub header: Rect,
    pub content: Rect,
    pub footer: Rect,
}

impl PageLayout {
    /// Lay out bands inside the margins of `page`
    pub fn from_geometry(page: &PageGeometry) -> Self {
        let width = page.width_pt();
        let height = page.height_pt();
        let left = page.margin_left_pt();
        let band_width = page.content_width_pt();
        let top = height - page.margin_top_pt();
        let bottom = page.margin_bottom_pt();

        let header = Rect {
            x: left,
            y: top - BAND_HEIGHT_PT,
            width: band_width,
            height: BAND_HEIGHT_PT,
        };
        let footer = Rect {
            x: left,
            y: bottom,
            width: band_width,
            height: BAND_HEIGHT_PT,
        };
        let content_top = header.y - BAND_GAP_PT;
        let content_bottom = footer.y + footer.height + BAND_GAP_PT;
        let content = Rect {
            x: left,
            y: content_bottom,
            width: band_width,
            height: (content_top - content_bottom).max(0.0),
        };

        Self {
            width,
            height,
            header,
            content,
            footer,
        }
    }

    /// US Letter with 1-inch margins
    pub fn letter() -> Self {
        Self::from_geometry(&PageGeometry::us_letter())
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::letter()
    }
}
