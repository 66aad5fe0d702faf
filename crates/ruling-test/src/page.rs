//! Synthetic ruled pages
//!
//! [`PageBuilder`] draws rules, boxes, and text-like noise onto a blank
//! binary page so regression tests can describe their input geometrically.

use crate::error::{TestError, TestResult};
use ruling_core::{Pix, PixMut, PixelOp, Rect};

/// Builder for a synthetic binary page
///
/// Drawing calls chain; the first rendering error is kept and reported by
/// [`PageBuilder::build`].
#[derive(Debug)]
pub struct PageBuilder {
    pix: PixMut,
    error: Option<TestError>,
}

impl PageBuilder {
    /// Start a blank white page
    pub fn new(width: u32, height: u32) -> TestResult<Self> {
        Ok(Self {
            pix: PixMut::new(width, height)?,
            error: None,
        })
    }

    fn record(mut self, result: ruling_core::Result<()>) -> Self {
        if let Err(e) = result {
            self.error.get_or_insert(TestError::Core(e));
        }
        self
    }

    /// Fill a rect with black
    pub fn fill(mut self, rect: Rect) -> Self {
        let result = self.pix.render_rect(&rect, PixelOp::Set);
        self.record(result)
    }

    /// Clear a rect to white
    pub fn erase(mut self, rect: Rect) -> Self {
        let result = self.pix.render_rect(&rect, PixelOp::Clear);
        self.record(result)
    }

    /// Horizontal rule covering columns `[x0, x1)` and rows `[y, y + thickness)`
    pub fn hline(self, y: i32, x0: i32, x1: i32, thickness: i32) -> Self {
        self.fill(Rect::from_corners(x0, y, x1, y + thickness))
    }

    /// Vertical rule covering rows `[y0, y1)` and columns `[x, x + thickness)`
    pub fn vline(self, x: i32, y0: i32, y1: i32, thickness: i32) -> Self {
        self.fill(Rect::from_corners(x, y0, x + thickness, y1))
    }

    /// Rule from `(x0, y0)` to `(x1, y1)` drawn with Bresenham strokes
    pub fn skewed_line(mut self, x0: i32, y0: i32, x1: i32, y1: i32, width: u32) -> Self {
        self.pix.render_line(x0, y0, x1, y1, width, PixelOp::Set);
        self
    }

    /// Box ruled on all four sides, drawn inside `rect`
    pub fn ruled_box(mut self, rect: Rect, thickness: u32) -> Self {
        let result = self.pix.render_rect_outline(&rect, thickness, PixelOp::Set);
        self.record(result)
    }

    /// Text-like noise: every row of `rect` holds `block`-wide black blocks
    /// separated by `gap` white pixels
    pub fn text_band(mut self, rect: Rect, block: i32, gap: i32) -> Self {
        if block <= 0 || gap < 0 {
            self.error.get_or_insert(TestError::InvalidFixture {
                name: "text_band".to_string(),
                message: format!("block {block} / gap {gap}"),
            });
            return self;
        }
        let mut x = rect.left;
        while x < rect.right {
            let right = (x + block).min(rect.right);
            self = self.fill(Rect::new_unchecked(x, rect.top, right, rect.bottom));
            x += block + gap;
        }
        self
    }

    /// Finish the page
    pub fn build(self) -> TestResult<Pix> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.pix.into()),
        }
    }
}
