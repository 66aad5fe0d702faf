//! Pixel probes
//!
//! The line finder never touches image memory directly. It asks a
//! [`PixelProbe`] whether a coordinate is on the page and whether it is
//! black. Any integer coordinate may be queried; off-page points are white.

use crate::pix::Pix;
use crate::rect::Rect;

/// Read-only access to a binary image
pub trait PixelProbe {
    /// Whether `(x, y)` is a black pixel. Off-page coordinates are white.
    fn is_black(&self, x: i32, y: i32) -> bool;

    /// Whether `(x, y)` lies on the page
    fn contains(&self, x: i32, y: i32) -> bool {
        self.bounds().contains_point(x, y)
    }

    /// The page rect in this probe's coordinates
    fn bounds(&self) -> Rect;
}

impl PixelProbe for Pix {
    fn is_black(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.get_pixel(x as u32, y as u32) == Some(1)
    }

    fn bounds(&self) -> Rect {
        Rect::new_unchecked(0, 0, self.width() as i32, self.height() as i32)
    }
}

impl<P: PixelProbe + ?Sized> PixelProbe for &P {
    fn is_black(&self, x: i32, y: i32) -> bool {
        (**self).is_black(x, y)
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        (**self).contains(x, y)
    }

    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

/// A sub-region of another probe with its own origin
///
/// Local `(0, 0)` is the top-left corner of `region`. Pixels outside the
/// region read as white even when the parent has them black.
#[derive(Debug)]
pub struct Window<'a, P: PixelProbe + ?Sized> {
    parent: &'a P,
    region: Rect,
}

impl<'a, P: PixelProbe + ?Sized> Window<'a, P> {
    /// Restrict `parent` to `region`, clipped to the parent's bounds
    pub fn new(parent: &'a P, region: Rect) -> Self {
        let region = region
            .intersect(&parent.bounds())
            .unwrap_or(Rect::new_unchecked(region.left, region.top, region.left, region.top));
        Self { parent, region }
    }

    /// The window in parent coordinates
    pub fn region(&self) -> Rect {
        self.region
    }

    /// Map a rect from local coordinates back into parent coordinates
    pub fn to_parent(&self, rect: &Rect) -> Rect {
        rect.translate(self.region.left, self.region.top)
    }
}

impl<P: PixelProbe + ?Sized> PixelProbe for Window<'_, P> {
    fn is_black(&self, x: i32, y: i32) -> bool {
        self.contains(x, y) && self.parent.is_black(x + self.region.left, y + self.region.top)
    }

    fn bounds(&self) -> Rect {
        Rect::new_unchecked(0, 0, self.region.width(), self.region.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pix::{PixMut, PixelOp};

    fn page() -> Pix {
        let mut pm = PixMut::new(100, 60).unwrap();
        pm.render_rect(&Rect::new_unchecked(20, 30, 80, 33), PixelOp::Set)
            .unwrap();
        pm.into()
    }

    #[test]
    fn test_pix_probe() {
        let pix = page();
        assert!(pix.is_black(20, 30));
        assert!(!pix.is_black(19, 30));
        assert!(!pix.is_black(-1, 30));
        assert!(!pix.is_black(20, 1000));
        assert!(pix.contains(99, 59));
        assert!(!pix.contains(100, 59));
    }

    #[test]
    fn test_window_local_coordinates() {
        let pix = page();
        let win = Window::new(&pix, Rect::new_unchecked(50, 25, 90, 40));
        assert_eq!(win.bounds(), Rect::new_unchecked(0, 0, 40, 15));
        assert!(win.is_black(0, 5));
        assert!(win.is_black(29, 7));
        assert!(!win.is_black(30, 7));
        assert!(!win.is_black(-1, 5));
        assert_eq!(
            win.to_parent(&Rect::new_unchecked(0, 5, 30, 8)),
            Rect::new_unchecked(50, 30, 80, 33)
        );
    }

    #[test]
    fn test_window_clipped_to_parent() {
        let pix = page();
        let win = Window::new(&pix, Rect::new_unchecked(90, 50, 200, 200));
        assert_eq!(win.region(), Rect::new_unchecked(90, 50, 100, 60));
        let off = Window::new(&pix, Rect::new_unchecked(300, 300, 310, 310));
        assert!(off.bounds().is_empty());
        assert!(!off.contains(0, 0));
    }
}
