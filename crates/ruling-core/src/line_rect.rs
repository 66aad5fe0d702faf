//! LineRect - Oriented line rectangles
//!
//! A [`LineRect`] is a [`Rect`] tagged with the direction the line runs in.
//! All line algorithms are written once against the orientation-neutral
//! accessors (`length_start`, `width_end`, `position`, ...) and work for
//! horizontal and vertical lines alike.
//!
//! Horizontal lines run along x: their length is the rect width and their
//! thickness the rect height. Vertical lines are the transpose.

use crate::error::{Error, Result};
use crate::rect::Rect;

/// Direction a line runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Orientation {
    /// Runs along the x axis
    #[default]
    Horizontal,
    /// Runs along the y axis
    Vertical,
}

impl Orientation {
    /// The other orientation
    pub fn perpendicular(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Extent of `rect` along the running direction as `(start, end)`
    #[inline]
    pub fn length_range(self, rect: &Rect) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (rect.left, rect.right),
            Orientation::Vertical => (rect.top, rect.bottom),
        }
    }

    /// Extent of `rect` across the running direction as `(start, end)`
    #[inline]
    pub fn width_range(self, rect: &Rect) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (rect.top, rect.bottom),
            Orientation::Vertical => (rect.left, rect.right),
        }
    }

    /// Build a rect from a length range and a width range
    #[inline]
    pub fn make_rect(self, length: (i32, i32), width: (i32, i32)) -> Rect {
        match self {
            Orientation::Horizontal => Rect::new_unchecked(length.0, width.0, length.1, width.1),
            Orientation::Vertical => Rect::new_unchecked(width.0, length.0, width.1, length.1),
        }
    }

    /// Map an `(along, across)` coordinate pair to image `(x, y)`
    #[inline]
    pub fn to_xy(self, along: i32, across: i32) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (along, across),
            Orientation::Vertical => (across, along),
        }
    }
}

/// Identifier of a line, unique within one detection session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u32);

/// Hands out increasing [`LineId`]s
///
/// One generator belongs to one detection session; there is no process-wide
/// counter, so independent sessions may run on different threads.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u32,
}

impl IdGenerator {
    /// Create a generator whose first id is 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator that continues after `last`
    pub fn starting_after(last: u32) -> Self {
        Self { last }
    }

    /// Draw the next id
    pub fn next_id(&mut self) -> LineId {
        self.last += 1;
        LineId(self.last)
    }

    /// The most recently assigned id (0 if none)
    pub fn last_assigned(&self) -> u32 {
        self.last
    }
}

/// An oriented line rectangle
///
/// Cloning preserves the id; building a new line with [`LineRect::new`]
/// draws a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineRect {
    rect: Rect,
    orientation: Orientation,
    id: LineId,
}

impl LineRect {
    /// Create a line with a new id
    pub fn new(rect: Rect, orientation: Orientation, ids: &mut IdGenerator) -> Self {
        Self {
            rect,
            orientation,
            id: ids.next_id(),
        }
    }

    /// Create a line carrying a known id
    pub fn with_id(rect: Rect, orientation: Orientation, id: LineId) -> Self {
        Self {
            rect,
            orientation,
            id,
        }
    }

    /// Create a line from its oriented extents, with a new id
    pub fn from_extents(
        orientation: Orientation,
        length: (i32, i32),
        width: (i32, i32),
        ids: &mut IdGenerator,
    ) -> Self {
        Self::new(orientation.make_rect(length, width), orientation, ids)
    }

    /// The bounding rect
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The orientation
    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The id
    #[inline]
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Copy another line's rect and id into this one
    ///
    /// # Errors
    ///
    /// Returns [`Error::OrientationMismatch`] if the orientations differ.
    pub fn assign(&mut self, other: &LineRect) -> Result<()> {
        if other.orientation != self.orientation {
            return Err(Error::OrientationMismatch {
                expected: self.orientation,
                actual: other.orientation,
            });
        }
        self.rect = other.rect;
        self.id = other.id;
        Ok(())
    }

    /// Give this line a fresh id
    pub fn renumber(&mut self, ids: &mut IdGenerator) {
        self.id = ids.next_id();
    }

    /// Replace the bounding rect, keeping orientation and id
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Start of the line along its running direction
    #[inline]
    pub fn length_start(&self) -> i32 {
        self.orientation.length_range(&self.rect).0
    }

    /// End (exclusive) of the line along its running direction
    #[inline]
    pub fn length_end(&self) -> i32 {
        self.orientation.length_range(&self.rect).1
    }

    /// Start of the line across its running direction
    #[inline]
    pub fn width_start(&self) -> i32 {
        self.orientation.width_range(&self.rect).0
    }

    /// End (exclusive) of the line across its running direction
    #[inline]
    pub fn width_end(&self) -> i32 {
        self.orientation.width_range(&self.rect).1
    }

    pub fn set_length_start(&mut self, value: i32) {
        self.rect = self
            .orientation
            .make_rect((value, self.length_end()), (self.width_start(), self.width_end()));
    }

    pub fn set_length_end(&mut self, value: i32) {
        self.rect = self
            .orientation
            .make_rect((self.length_start(), value), (self.width_start(), self.width_end()));
    }

    pub fn set_width_start(&mut self, value: i32) {
        self.rect = self
            .orientation
            .make_rect((self.length_start(), self.length_end()), (value, self.width_end()));
    }

    pub fn set_width_end(&mut self, value: i32) {
        self.rect = self
            .orientation
            .make_rect((self.length_start(), self.length_end()), (self.width_start(), value));
    }

    /// Extent along the running direction
    #[inline]
    pub fn length(&self) -> i32 {
        self.length_end() - self.length_start()
    }

    /// Thickness of the line
    #[inline]
    pub fn line_width(&self) -> i32 {
        self.width_end() - self.width_start()
    }

    /// Center of the thickness: the row of a horizontal line, the column of
    /// a vertical one
    #[inline]
    pub fn position(&self) -> i32 {
        self.width_start() + self.line_width() / 2
    }

    /// Center of the length
    #[inline]
    pub fn middle(&self) -> i32 {
        self.length_start() + self.length() / 2
    }

    /// Shared extent along the running direction; negative values are the
    /// size of the gap between the two lines
    pub fn length_overlap(&self, other: &LineRect) -> i32 {
        self.length_end().min(other.length_end()) - self.length_start().max(other.length_start())
    }

    /// Mirror across the main diagonal: a horizontal line becomes vertical
    /// and vice versa. The id is kept.
    pub fn transposed(&self) -> LineRect {
        LineRect {
            rect: self.rect.transpose(),
            orientation: self.orientation.perpendicular(),
            id: self.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_accessors() {
        let mut ids = IdGenerator::new();
        let line = LineRect::new(Rect::new_unchecked(10, 95, 210, 105), Orientation::Horizontal, &mut ids);
        assert_eq!(line.length_start(), 10);
        assert_eq!(line.length_end(), 210);
        assert_eq!(line.length(), 200);
        assert_eq!(line.line_width(), 10);
        assert_eq!(line.position(), 100);
        assert_eq!(line.middle(), 110);
    }

    #[test]
    fn test_vertical_accessors() {
        let mut ids = IdGenerator::new();
        let line = LineRect::new(Rect::new_unchecked(48, 0, 52, 300), Orientation::Vertical, &mut ids);
        assert_eq!(line.length(), 300);
        assert_eq!(line.line_width(), 4);
        assert_eq!(line.position(), 50);
        assert_eq!(line.middle(), 150);
    }

    #[test]
    fn test_setters_follow_orientation() {
        let mut ids = IdGenerator::new();
        let mut line = LineRect::new(Rect::new_unchecked(48, 0, 52, 300), Orientation::Vertical, &mut ids);
        line.set_length_end(400);
        line.set_width_start(40);
        assert_eq!(line.rect(), Rect::new_unchecked(40, 0, 52, 400));
        line.set_length_start(10);
        line.set_width_end(60);
        assert_eq!(line.rect(), Rect::new_unchecked(40, 10, 60, 400));
    }

    #[test]
    fn test_ids_are_unique_and_preserved_by_clone() {
        let mut ids = IdGenerator::new();
        let a = LineRect::new(Rect::from_xywh(0, 0, 10, 1), Orientation::Horizontal, &mut ids);
        let b = LineRect::new(Rect::from_xywh(0, 0, 10, 1), Orientation::Horizontal, &mut ids);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
        assert_eq!(ids.last_assigned(), 2);

        let mut c = a.clone();
        c.renumber(&mut ids);
        assert_eq!(c.id(), LineId(3));

        let mut more = IdGenerator::starting_after(ids.last_assigned());
        assert_eq!(more.next_id(), LineId(4));
    }

    #[test]
    fn test_assign_rejects_orientation_mismatch() {
        let mut ids = IdGenerator::new();
        let mut h = LineRect::new(Rect::from_xywh(0, 0, 10, 1), Orientation::Horizontal, &mut ids);
        let v = LineRect::new(Rect::from_xywh(0, 0, 1, 10), Orientation::Vertical, &mut ids);
        assert!(matches!(h.assign(&v), Err(Error::OrientationMismatch { .. })));

        let h2 = LineRect::new(Rect::from_xywh(5, 5, 20, 2), Orientation::Horizontal, &mut ids);
        h.assign(&h2).unwrap();
        assert_eq!(h, h2);
    }

    #[test]
    fn test_length_overlap() {
        let mut ids = IdGenerator::new();
        let a = LineRect::new(Rect::new_unchecked(10, 0, 200, 1), Orientation::Horizontal, &mut ids);
        let b = LineRect::new(Rect::new_unchecked(150, 5, 300, 6), Orientation::Horizontal, &mut ids);
        let c = LineRect::new(Rect::new_unchecked(210, 0, 400, 1), Orientation::Horizontal, &mut ids);
        assert_eq!(a.length_overlap(&b), 50);
        assert_eq!(a.length_overlap(&c), -10);
    }

    #[test]
    fn test_transposed() {
        let mut ids = IdGenerator::new();
        let h = LineRect::new(Rect::new_unchecked(10, 95, 210, 105), Orientation::Horizontal, &mut ids);
        let v = h.transposed();
        assert_eq!(v.orientation(), Orientation::Vertical);
        assert_eq!(v.position(), h.position());
        assert_eq!(v.length_start(), h.length_start());
        assert_eq!(v.id(), h.id());
    }
}
