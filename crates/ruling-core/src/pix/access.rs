//! Single-pixel reads and writes
//!
//! Column `x` of a row lives in word `x / 32`, bit `31 - x % 32`.

use super::{Pix, PixMut};
use crate::error::{Error, Result};

impl Pix {
    /// 1 for black, 0 for white, `None` off the page.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Unchecked read; `x` past the width reads row padding and `y` past
    /// the height panics.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_data_bit(self.row_data(y), x)
    }
}

impl PixMut {
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(get_data_bit(self.row_data(y), x))
    }

    /// Paint one pixel; any nonzero `val` is black.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] when `(x, y)` is off the page.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::OutOfBounds {
                x: x as i32,
                y: y as i32,
                width: self.width(),
                height: self.height(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Unchecked write; panics past the last row.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let row = self.row_data_mut(y);
        match val {
            0 => clear_data_bit(row, x),
            _ => set_data_bit_val(row, x),
        }
    }
}

#[inline]
pub fn get_data_bit(row: &[u32], x: u32) -> u32 {
    (row[(x / 32) as usize] >> (31 - x % 32)) & 1
}

#[inline]
pub fn set_data_bit_val(row: &mut [u32], x: u32) {
    row[(x / 32) as usize] |= 0x8000_0000 >> (x % 32);
}

#[inline]
pub fn clear_data_bit(row: &mut [u32], x: u32) {
    row[(x / 32) as usize] &= !(0x8000_0000 >> (x % 32));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_packing_msb_first() {
        let mut line = [0u32; 2];
        set_data_bit_val(&mut line, 0);
        set_data_bit_val(&mut line, 33);
        assert_eq!(line[0], 0x8000_0000);
        assert_eq!(line[1], 0x4000_0000);
        assert_eq!(get_data_bit(&line, 33), 1);
        clear_data_bit(&mut line, 33);
        assert_eq!(line[1], 0);
    }

    #[test]
    fn test_set_get_pixel() {
        let mut pm = PixMut::new(50, 20).unwrap();
        pm.set_pixel(49, 19, 1).unwrap();
        assert_eq!(pm.get_pixel(49, 19), Some(1));
        pm.set_pixel(49, 19, 0).unwrap();
        assert_eq!(pm.get_pixel(49, 19), Some(0));
        assert!(pm.set_pixel(50, 0, 1).is_err());

        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(50, 0), None);
    }
}
