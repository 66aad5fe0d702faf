//! Rect - Rectangle regions
//!
//! `Rect` is the integer rectangle every other structure is built on. Edges
//! are stored as `left`/`top`/`right`/`bottom` with `right` and `bottom`
//! exclusive, so a rect covering pixel columns 10..=19 has `left = 10` and
//! `right = 20`.

use crate::error::{Error, Result};

/// A rectangle region
///
/// A small `Copy` type; all operations return new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left x coordinate (inclusive)
    pub left: i32,
    /// Top y coordinate (inclusive)
    pub top: i32,
    /// Right x coordinate (exclusive)
    pub right: i32,
    /// Bottom y coordinate (exclusive)
    pub bottom: i32,
}

impl Rect {
    /// Create a new rect
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `right < left` or `bottom < top`.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Result<Self> {
        if right < left || bottom < top {
            return Err(Error::InvalidParameter(format!(
                "rect edges are inverted: left={left}, top={top}, right={right}, bottom={bottom}"
            )));
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Create a rect without validation
    pub const fn new_unchecked(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rect from an origin and a size
    pub const fn from_xywh(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + w,
            bottom: y + h,
        }
    }

    /// Create a rect from two corner points, in any order
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            left: x1.min(x2),
            top: y1.min(y2),
            right: x1.max(x2),
            bottom: y1.max(y2),
        }
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Get the center x coordinate
    #[inline]
    pub fn center_x(&self) -> i32 {
        self.left + self.width() / 2
    }

    /// Get the center y coordinate
    #[inline]
    pub fn center_y(&self) -> i32 {
        self.top + self.height() / 2
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_valid() {
            self.width() as i64 * self.height() as i64
        } else {
            0
        }
    }

    /// Check if the rect is valid (edges not inverted)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.right >= self.left && self.bottom >= self.top
    }

    /// Check if the rect is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Check if a point is inside the rect
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Check if this rect contains another rect
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Check if this rect overlaps another (shares at least one pixel)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// Compute the intersection of two rects
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);

        if left < right && top < bottom {
            Some(Rect {
                left,
                top,
                right,
                bottom,
            })
        } else {
            None
        }
    }

    /// Compute the union (bounding rect) of two rects
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Translate the rect by (dx, dy)
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Grow the rect by `dx` on the left and right and `dy` on the top and bottom
    ///
    /// Negative values shrink the rect; the result may become empty.
    pub fn inflate(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            left: self.left - dx,
            top: self.top - dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Mirror the rect across the main diagonal (swap x and y)
    pub fn transpose(&self) -> Rect {
        Rect {
            left: self.top,
            top: self.left,
            right: self.bottom,
            bottom: self.right,
        }
    }

    /// Percentage (0..=100) of this rect's area lying inside `other`
    ///
    /// An empty rect is never considered inside anything.
    pub fn percent_inside(&self, other: &Rect) -> u32 {
        let area = self.area();
        if area == 0 {
            return 0;
        }
        match self.intersect(other) {
            Some(overlap) => (overlap.area() * 100 / area) as u32,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_creation() {
        let r = Rect::new(10, 20, 110, 70).unwrap();
        assert_eq!(r.width(), 100);
        assert_eq!(r.height(), 50);
        assert_eq!(r.area(), 5000);
        assert!(Rect::new(10, 20, 5, 70).is_err());
        assert!(Rect::new(10, 20, 10, 20).unwrap().is_empty());
    }

    #[test]
    fn test_rect_from_corners() {
        let r = Rect::from_corners(50, 40, 10, 5);
        assert_eq!(r, Rect::new_unchecked(10, 5, 50, 40));
        assert_eq!(Rect::from_xywh(1, 2, 3, 4), Rect::new_unchecked(1, 2, 4, 6));
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::from_xywh(10, 10, 100, 100);
        assert!(r.contains_point(10, 10));
        assert!(r.contains_point(109, 109));
        assert!(!r.contains_point(110, 50));
        assert!(r.contains_rect(&Rect::from_xywh(20, 20, 10, 10)));
        assert!(!r.contains_rect(&Rect::from_xywh(100, 100, 20, 20)));
    }

    #[test]
    fn test_rect_overlap_and_intersect() {
        let r1 = Rect::from_xywh(0, 0, 100, 100);
        let r2 = Rect::from_xywh(50, 50, 100, 100);
        let r3 = Rect::from_xywh(100, 0, 10, 10);
        assert!(r1.overlaps(&r2));
        assert!(!r1.overlaps(&r3)); // touching only
        assert_eq!(r1.intersect(&r2), Some(Rect::new_unchecked(50, 50, 100, 100)));
        assert_eq!(r1.intersect(&r3), None);
    }

    #[test]
    fn test_rect_union() {
        let r1 = Rect::from_xywh(0, 0, 50, 50);
        let r2 = Rect::from_xywh(25, 25, 50, 50);
        assert_eq!(r1.union(&r2), Rect::new_unchecked(0, 0, 75, 75));
    }

    #[test]
    fn test_rect_inflate_translate_transpose() {
        let r = Rect::new_unchecked(10, 20, 30, 60);
        assert_eq!(r.inflate(2, 5), Rect::new_unchecked(8, 15, 32, 65));
        assert_eq!(r.translate(-10, 5), Rect::new_unchecked(0, 25, 20, 65));
        assert_eq!(r.transpose(), Rect::new_unchecked(20, 10, 60, 30));
        assert_eq!(r.transpose().transpose(), r);
    }

    #[test]
    fn test_rect_percent_inside() {
        let small = Rect::from_xywh(10, 10, 10, 10);
        let big = Rect::from_xywh(0, 0, 100, 100);
        assert_eq!(small.percent_inside(&big), 100);
        assert_eq!(big.percent_inside(&small), 1);
        let half = Rect::from_xywh(15, 10, 10, 10);
        assert_eq!(small.percent_inside(&half), 50);
        assert_eq!(Rect::default().percent_inside(&big), 0);
    }
}
