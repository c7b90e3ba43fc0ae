//! PDF Content Stream Generation
//!
//! Builder for page content streams. Exported pages only paint images, so
//! only the graphics-state, transform, and XObject operators are needed:
//! - q/Q: Save/restore graphics state
//! - cm: Concatenate transformation matrix
//! - Do: Paint an XObject

use super::layout::Rect;
use super::objects::format_real;
use std::io::Write;

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the content stream data
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Save the current graphics state (q)
    pub fn save_state(&mut self) -> &mut Self {
        self.write_line("q");
        self
    }

    /// Restore the graphics state (Q)
    pub fn restore_state(&mut self) -> &mut Self {
        self.write_line("Q");
        self
    }

    /// Concatenate the transformation matrix (cm)
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        let _ = writeln!(
            self.data,
            "{} {} {} {} {} {} cm",
            format_real(a),
            format_real(b),
            format_real(c),
            format_real(d),
            format_real(e),
            format_real(f)
        );
        self
    }

    /// Paint an XObject (Do)
    pub fn draw_xobject(&mut self, name: &str) -> &mut Self {
        let _ = writeln!(self.data, "/{} Do", name);
        self
    }

    /// Paint an image XObject stretched over `rect`
    ///
    /// Image space is the unit square, so scaling by the rectangle size and
    /// translating to its lower-left corner places it.
    pub fn draw_image(&mut self, name: &str, rect: Rect) -> &mut Self {
        self.save_state()
            .transform(rect.width, 0.0, 0.0, rect.height, rect.x, rect.y)
            .draw_xobject(name)
            .restore_state()
    }

    fn write_line(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
        self.data.push(b'\n');
    }
}
