//! Ruling Core - Basic data structures for ruled-line detection
//!
//! This crate provides the fundamental types shared by the line finder and
//! the line grouper:
//!
//! - [`Rect`] - Integer rectangle with exclusive right/bottom edges
//! - [`LineRect`] / [`Orientation`] - Oriented line rectangles with
//!   orientation-neutral accessors
//! - [`IdGenerator`] / [`LineId`] - Session-scoped line identifiers
//! - [`Pix`] / [`PixMut`] - Binary page image (immutable / mutable)
//! - [`PixelProbe`] / [`Window`] - Read-only pixel access used by the scanners

pub mod error;
pub mod line_rect;
pub mod pix;
pub mod probe;
pub mod rect;

pub use error::{Error, Result};
pub use line_rect::{IdGenerator, LineId, LineRect, Orientation};
pub use pix::{Pix, PixMut, PixelOp};
pub use probe::{PixelProbe, Window};
pub use rect::Rect;
