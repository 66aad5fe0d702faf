//! Graphics rendering functions
//!
//! Drawing primitives for building synthetic pages:
//! - Lines (straight or skewed, with variable width)
//! - Filled rectangles and rectangle outlines
//!
//! Everything is clipped to the image; drawing off the page is not an error.

use super::PixMut;
use crate::error::{Error, Result};
use crate::rect::Rect;

/// Pixel operation for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelOp {
    /// Set pixels to black (foreground)
    #[default]
    Set,
    /// Clear pixels to white (background)
    Clear,
    /// Flip pixel values
    Flip,
}

/// Generate the points of a line using Bresenham's integer algorithm.
///
/// The line connects `(x1, y1)` to `(x2, y2)` inclusive with 8-connectivity.
pub fn generate_line_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
    if x1 == x2 && y1 == y2 {
        return vec![(x1, y1)];
    }

    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x2 > x1 { 1i32 } else { -1 };
    let sy = if y2 > y1 { 1i32 } else { -1 };

    let npts = dx.max(dy) + 1;
    let mut points = Vec::with_capacity(npts as usize);

    let mut x = x1;
    let mut y = y1;

    if dx >= dy {
        let mut err = dx / 2;
        for _ in 0..npts {
            points.push((x, y));
            err -= dy;
            if err < 0 {
                y += sy;
                err += dx;
            }
            x += sx;
        }
    } else {
        let mut err = dy / 2;
        for _ in 0..npts {
            points.push((x, y));
            err -= dx;
            if err < 0 {
                x += sx;
                err += dy;
            }
            y += sy;
        }
    }

    points
}

/// Generate the points of a line `width` pixels thick.
///
/// Extra strokes are offset perpendicular to the dominant direction,
/// alternating above and below the base stroke.
pub fn generate_wide_line_points(
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    width: u32,
) -> Vec<(i32, i32)> {
    let width = width.max(1);
    let mut points = generate_line_points(x1, y1, x2, y2);
    if width == 1 {
        return points;
    }

    let is_horizontal = (x2 - x1).abs() > (y2 - y1).abs();
    for i in 1..width {
        let offset = (i + 1).div_ceil(2) as i32;
        let offset = if i % 2 == 1 { -offset } else { offset };
        let stroke = if is_horizontal {
            generate_line_points(x1, y1 + offset, x2, y2 + offset)
        } else {
            generate_line_points(x1 + offset, y1, x2 + offset, y2)
        };
        points.extend(stroke);
    }

    points
}

impl PixMut {
    /// Render a list of points; points outside the image are clipped.
    pub fn render_points(&mut self, points: &[(i32, i32)], op: PixelOp) {
        let w = self.width() as i32;
        let h = self.height() as i32;

        for &(x, y) in points {
            if x < 0 || x >= w || y < 0 || y >= h {
                continue;
            }
            let (xu, yu) = (x as u32, y as u32);
            match op {
                PixelOp::Set => self.set_pixel_unchecked(xu, yu, 1),
                PixelOp::Clear => self.set_pixel_unchecked(xu, yu, 0),
                PixelOp::Flip => {
                    let current = super::get_data_bit(self.row_data(yu), xu);
                    self.set_pixel_unchecked(xu, yu, current ^ 1);
                }
            }
        }
    }

    /// Render a line from (x1, y1) to (x2, y2).
    pub fn render_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, width: u32, op: PixelOp) {
        let points = generate_wide_line_points(x1, y1, x2, y2, width);
        self.render_points(&points, op);
    }

    /// Fill a rect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the rect edges are inverted.
    pub fn render_rect(&mut self, rect: &Rect, op: PixelOp) -> Result<()> {
        if !rect.is_valid() {
            return Err(Error::InvalidParameter(format!(
                "cannot fill inverted rect {rect:?}"
            )));
        }
        let bounds = Rect::new_unchecked(0, 0, self.width() as i32, self.height() as i32);
        let Some(clip) = rect.intersect(&bounds) else {
            return Ok(());
        };
        for y in clip.top..clip.bottom {
            let points: Vec<(i32, i32)> = (clip.left..clip.right).map(|x| (x, y)).collect();
            self.render_points(&points, op);
        }
        Ok(())
    }

    /// Render the outline of a rect, `width` pixels thick, drawn inward.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the rect edges are inverted.
    pub fn render_rect_outline(&mut self, rect: &Rect, width: u32, op: PixelOp) -> Result<()> {
        if !rect.is_valid() {
            return Err(Error::InvalidParameter(format!(
                "cannot outline inverted rect {rect:?}"
            )));
        }
        let t = (width.max(1) as i32).min(rect.width()).min(rect.height());
        if t <= 0 {
            return Ok(());
        }
        let Rect {
            left,
            top,
            right,
            bottom,
        } = *rect;
        // Sides are disjoint: Flip toggles every outline pixel once.
        self.render_rect(&Rect::new_unchecked(left, top, right, top + t), op)?;
        self.render_rect(&Rect::new_unchecked(left, bottom - t, right, bottom), op)?;
        self.render_rect(&Rect::new_unchecked(left, top + t, left + t, bottom - t), op)?;
        self.render_rect(&Rect::new_unchecked(right - t, top + t, right, bottom - t), op)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pix::Pix;

    #[test]
    fn test_generate_line_points_horizontal() {
        let points = generate_line_points(0, 0, 10, 0);
        assert_eq!(points.len(), 11);
        assert!(points.iter().all(|&(_, y)| y == 0));
    }

    #[test]
    fn test_generate_line_points_skewed() {
        let points = generate_line_points(0, 0, 100, 3);
        assert_eq!(points.len(), 101);
        assert_eq!(points[0], (0, 0));
        assert_eq!(points[100], (100, 3));
        // 8-connected: every step moves at most one pixel across
        for w in points.windows(2) {
            assert!((w[1].1 - w[0].1).abs() <= 1);
        }
    }

    #[test]
    fn test_render_wide_line_clipped() {
        let mut pm = PixMut::new(50, 50).unwrap();
        pm.render_line(-10, 1, 60, 1, 3, PixelOp::Set);
        let pix: Pix = pm.into();
        // rows 0, 1, 2 across the full width
        assert_eq!(pix.count_pixels(), 150);
    }

    #[test]
    fn test_render_rect_fill_and_clear() {
        let mut pm = PixMut::new(40, 40).unwrap();
        pm.render_rect(&Rect::new_unchecked(10, 10, 20, 15), PixelOp::Set)
            .unwrap();
        pm.render_rect(&Rect::new_unchecked(10, 10, 12, 15), PixelOp::Clear)
            .unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.count_pixels(), 40);
        assert_eq!(pix.get_pixel(12, 10), Some(1));
        assert_eq!(pix.get_pixel(11, 10), Some(0));
    }

    #[test]
    fn test_render_rect_outline_flip() {
        let mut pm = PixMut::new(40, 40).unwrap();
        pm.render_rect_outline(&Rect::new_unchecked(5, 5, 15, 15), 2, PixelOp::Flip)
            .unwrap();
        let pix: Pix = pm.into();
        // 10x10 minus the 6x6 interior
        assert_eq!(pix.count_pixels(), 64);
        assert_eq!(pix.get_pixel(5, 5), Some(1));
        assert_eq!(pix.get_pixel(7, 7), Some(0));
    }

    #[test]
    fn test_render_rect_rejects_inverted() {
        let mut pm = PixMut::new(10, 10).unwrap();
        assert!(
            pm.render_rect(&Rect::new_unchecked(5, 5, 2, 2), PixelOp::Set)
                .is_err()
        );
    }
}
