//! Ruling - Ruled-line detection and grouping
//!
//! Finds the horizontal and vertical rules printed on a binary page and
//! groups them into table-like areas and ruled boxes.
//!
//! - [`lines`] - Line finding on a [`PixelProbe`]
//! - [`group`] - Columns, areas and boxes from the found lines
//!
//! # Example
//!
//! ```
//! use ruling::group::{GroupSettings, Grouper};
//! use ruling::lines::{LineFinder, LineFinderOptions};
//! use ruling::{Pix, PixMut, PixelOp, Rect};
//!
//! let mut pm = PixMut::new(500, 300).unwrap();
//! pm.render_rect_outline(&Rect::new_unchecked(50, 40, 450, 260), 2, PixelOp::Set)
//!     .unwrap();
//! let pix: Pix = pm.into();
//!
//! let mut finder = LineFinder::new(LineFinderOptions::default()).unwrap();
//! let (horizontal, vertical) = finder.find_all_lines(&pix).unwrap();
//!
//! let grouper = Grouper::new(GroupSettings::default()).unwrap();
//! let search = grouper.find_boxes(&horizontal, &vertical).unwrap();
//! assert_eq!(search.boxes.len(), 1);
//! assert!(search.boxes[0].four_sided);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use ruling_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use ruling_group as group;
pub use ruling_lines as lines;
