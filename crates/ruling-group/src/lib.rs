//! Ruling Group - Grouping ruled lines into tables and boxes
//!
//! Lines found on a page are grouped in three steps:
//!
//! - [`column`] - Stacking evenly spaced, aligned lines into columns
//! - [`area`] - Placing matching columns side by side
//! - [`qualify`] - Size limits and paring of overlapping results
//!
//! [`boxes`] cuts lines at their crossings so the same machinery finds
//! ruled rectangles. [`Grouper`] ties it together.
//!
//! # Examples
//!
//! ```
//! use ruling_core::{IdGenerator, LineRect, Orientation, Rect};
//! use ruling_group::{GroupSettings, Grouper};
//!
//! let mut ids = IdGenerator::new();
//! let lines: Vec<LineRect> = (0..5)
//!     .map(|i| {
//!         let y = 100 + i * 20;
//!         LineRect::new(Rect::new_unchecked(0, y, 300, y + 1), Orientation::Horizontal, &mut ids)
//!     })
//!     .collect();
//!
//! let grouper = Grouper::new(GroupSettings::default()).unwrap();
//! let result = grouper.group_lines(&lines).unwrap();
//! assert_eq!(result.areas, vec![Rect::new_unchecked(0, 90, 300, 190)]);
//! assert_eq!(result.lines[0].len(), 5);
//! ```

pub mod area;
pub mod boxes;
pub mod column;
pub mod error;
pub mod group;
pub mod grouper;
pub mod qualify;
pub mod score;
pub mod settings;

pub use error::{GroupError, GroupResult};
pub use group::{GroupArena, GroupId, LineGroup};
pub use grouper::{BoxSearch, FoundBox, Grouper, GroupingResult};
pub use settings::GroupSettings;
