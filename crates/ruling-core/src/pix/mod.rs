//! PIX - Binary page image
//!
//! `Pix` holds a 1 bpp page: 1 is a black (foreground) pixel, 0 is white.
//! It is the in-memory stand-in for a decoded scan and the reference
//! implementation of [`PixelProbe`](crate::probe::PixelProbe).
//!
//! Rows are padded to whole `u32` words and the leftmost pixel of a word
//! sits in its most significant bit.
//!
//! A `Pix` is shared through an `Arc`. Pages are drawn on a [`PixMut`] and
//! frozen with `Into<Pix>`; [`Pix::try_into_mut`] thaws a page nobody else
//! holds.

mod access;
pub mod graphics;

pub use access::*;
pub use graphics::PixelOp;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Packed rows of a page
#[derive(Debug, PartialEq, Eq)]
struct Bitmap {
    width: u32,
    height: u32,
    words_per_row: usize,
    words: Vec<u32>,
}

impl Bitmap {
    fn white(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self::white_unchecked(width, height))
    }

    fn white_unchecked(width: u32, height: u32) -> Self {
        let words_per_row = width.div_ceil(32) as usize;
        Self {
            width,
            height,
            words_per_row,
            words: vec![0; words_per_row * height as usize],
        }
    }

    fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.words_per_row;
        &self.words[start..start + self.words_per_row]
    }

    fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let start = y as usize * self.words_per_row;
        &mut self.words[start..start + self.words_per_row]
    }
}

/// Shared, read-only binary page
///
/// # Examples
///
/// ```
/// use ruling_core::Pix;
///
/// let pix = Pix::new(640, 480).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.count_pixels(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pix {
    bits: Arc<Bitmap>,
}

impl Pix {
    /// A white page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero width or height.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            bits: Arc::new(Bitmap::white(width, height)?),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.bits.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bits.height
    }

    /// `u32` words per row
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.bits.words_per_row as u32
    }

    /// Packed words of row `y`; panics past the last row
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        self.bits.row(y)
    }

    /// Number of black pixels
    pub fn count_pixels(&self) -> u64 {
        (0..self.height())
            .flat_map(|y| self.row_data(y).iter())
            .map(|word| word.count_ones() as u64)
            .sum()
    }

    /// Mirror the page across its main diagonal.
    ///
    /// Pixel `(x, y)` moves to `(y, x)`; a page of horizontal rules becomes
    /// a page of vertical rules.
    pub fn transpose(&self) -> Pix {
        let mut out = PixMut {
            bits: Bitmap::white_unchecked(self.height(), self.width()),
        };
        for y in 0..self.height() {
            let row = self.row_data(y);
            for x in (0..self.width()).filter(|&x| get_data_bit(row, x) != 0) {
                out.set_pixel_unchecked(y, x, 1);
            }
        }
        out.into()
    }

    /// Take the page back for drawing; fails while it is shared.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        Arc::try_unwrap(self.bits)
            .map(|bits| PixMut { bits })
            .map_err(|bits| Pix { bits })
    }
}

/// Binary page being drawn
#[derive(Debug)]
pub struct PixMut {
    bits: Bitmap,
}

impl PixMut {
    /// A white page to draw on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero width or height.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            bits: Bitmap::white(width, height)?,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.bits.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bits.height
    }

    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        self.bits.row(y)
    }

    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        self.bits.row_mut(y)
    }
}

impl From<PixMut> for Pix {
    fn from(page: PixMut) -> Self {
        Pix {
            bits: Arc::new(page.bits),
        }
    }
}
