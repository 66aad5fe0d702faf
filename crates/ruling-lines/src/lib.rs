//! Ruling Lines - Ruled-line finding
//!
//! This crate turns a binary page into clean horizontal and vertical line
//! rectangles:
//!
//! - [`scan`] - Raw candidate scan ([`RawLineScanner`], [`RunLineScanner`])
//! - [`merge`] - Combining stacked and collinear fragments
//! - [`extend`] - Growing fragments past breaks in the print
//! - [`finder`] - The [`LineFinder`] pipeline, including fat-line correction
//!
//! # Examples
//!
//! ```
//! use ruling_core::{Orientation, PixMut, PixelOp, Pix, Rect};
//! use ruling_lines::{LineFinder, LineFinderOptions};
//!
//! let mut pm = PixMut::new(300, 100).unwrap();
//! pm.render_rect(&Rect::new_unchecked(10, 50, 290, 52), PixelOp::Set).unwrap();
//! let pix: Pix = pm.into();
//!
//! let mut finder = LineFinder::new(LineFinderOptions::default()).unwrap();
//! let lines = finder.find_lines(&pix, Orientation::Horizontal).unwrap();
//! assert_eq!(lines.len(), 1);
//! assert_eq!(lines[0].rect(), Rect::new_unchecked(10, 50, 290, 52));
//! ```

pub mod error;
pub mod extend;
pub mod finder;
pub mod merge;
pub mod options;
pub mod scan;

pub use error::{LineError, LineResult};
pub use extend::{ExtensionRules, ExtensionState, LineEnd, extend_end, extend_line};
pub use finder::{LineFinder, sort_lines};
pub use merge::{MergeRules, merge_lines};
pub use options::LineFinderOptions;
pub use scan::{RawLineScanner, RunLineScanner, ScanSettings};
