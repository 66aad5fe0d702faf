//! Errors raised by pages, rects and oriented lines

use thiserror::Error;

use crate::line_rect::Orientation;

#[derive(Error, Debug)]
pub enum Error {
    /// A page with no pixels
    #[error("page must be at least 1x1, got {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// A pixel outside the page
    #[error("pixel ({x}, {y}) lies outside the {width}x{height} page")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// Two oriented rects of different orientation were mixed
    #[error("orientation mismatch: expected {expected:?}, got {actual:?}")]
    OrientationMismatch {
        expected: Orientation,
        actual: Orientation,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
