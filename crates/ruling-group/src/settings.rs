//! Grouping settings

use crate::error::{GroupError, GroupResult};
use ruling_core::Orientation;

/// Settings controlling line grouping and box finding
///
/// Widths are measured along the lines, spacings across them. Scores are
/// percentages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSettings {
    /// Fewest lines per column (default: 2)
    pub line_count_min: u32,
    /// Most lines per column (default: 1000)
    pub line_count_max: u32,
    /// Fewest columns per area (default: 1)
    pub column_count_min: u32,
    /// Most columns per area (default: 100)
    pub column_count_max: u32,
    /// Narrowest column (default: 0)
    pub column_width_min: i32,
    /// Widest column; longer lines never join one (default: 10000)
    pub column_width_max: i32,
    /// Narrowest area (default: 0)
    pub overall_width_min: i32,
    /// Widest area (default: 100000)
    pub overall_width_max: i32,
    /// Smallest line spacing inside an area (default: 0)
    pub spacing_min: i32,
    /// Largest line spacing inside a column (default: 500); box search ignores it
    pub spacing_max: i32,
    /// Largest gap between neighbouring columns (default: 200)
    pub column_spacing_max: i32,
    /// Alignment score needed to join a column (default: 70)
    pub alignment_score_min: u32,
    /// Alignment score counted as exact (default: 95)
    pub alignment_score_exact: u32,
    /// Spacing score needed to join a column (default: 70)
    pub spacing_score_min: u32,
    /// Spacing score counted as exact (default: 90)
    pub spacing_score_exact: u32,
    /// Overlap percentage at which two results are duplicates (default: 90)
    pub combine_percent: u32,
    /// Allowed difference in line count between joined columns (default: 1)
    pub column_line_difference: u32,
    /// Facing-edge tolerance as a percentage of the line spacing (default: 50)
    pub column_edge_percent: u32,
    /// Only accept exact links (default: false)
    pub exact_only: bool,
    /// Slack allowed when deciding whether two lines cross (default: 20)
    pub intersection_tolerance: i32,
    /// Orientation of the grouped lines; the primary seed for boxes (default: Horizontal)
    pub orientation: Orientation,
}

impl Default for GroupSettings {
    fn default() -> Self {
        Self {
            line_count_min: 2,
            line_count_max: 1000,
            column_count_min: 1,
            column_count_max: 100,
            column_width_min: 0,
            column_width_max: 10000,
            overall_width_min: 0,
            overall_width_max: 100000,
            spacing_min: 0,
            spacing_max: 500,
            column_spacing_max: 200,
            alignment_score_min: 70,
            alignment_score_exact: 95,
            spacing_score_min: 70,
            spacing_score_exact: 90,
            combine_percent: 90,
            column_line_difference: 1,
            column_edge_percent: 50,
            exact_only: false,
            intersection_tolerance: 20,
            orientation: Orientation::Horizontal,
        }
    }
}

impl GroupSettings {
    /// Set the line count range per column
    pub fn with_line_count(mut self, min: u32, max: u32) -> Self {
        self.line_count_min = min;
        self.line_count_max = max;
        self
    }

    /// Set the column count range per area
    pub fn with_column_count(mut self, min: u32, max: u32) -> Self {
        self.column_count_min = min;
        self.column_count_max = max;
        self
    }

    /// Set the column width range
    pub fn with_column_width(mut self, min: i32, max: i32) -> Self {
        self.column_width_min = min;
        self.column_width_max = max;
        self
    }

    /// Set the overall width range
    pub fn with_overall_width(mut self, min: i32, max: i32) -> Self {
        self.overall_width_min = min;
        self.overall_width_max = max;
        self
    }

    /// Set the line spacing range
    pub fn with_spacing(mut self, min: i32, max: i32) -> Self {
        self.spacing_min = min;
        self.spacing_max = max;
        self
    }

    /// Set the largest gap between columns
    pub fn with_column_spacing_max(mut self, max: i32) -> Self {
        self.column_spacing_max = max;
        self
    }

    /// Set the alignment score thresholds
    pub fn with_alignment_score(mut self, min: u32, exact: u32) -> Self {
        self.alignment_score_min = min;
        self.alignment_score_exact = exact;
        self
    }

    /// Set the spacing score thresholds
    pub fn with_spacing_score(mut self, min: u32, exact: u32) -> Self {
        self.spacing_score_min = min;
        self.spacing_score_exact = exact;
        self
    }

    /// Set the duplicate overlap percentage
    pub fn with_combine_percent(mut self, percent: u32) -> Self {
        self.combine_percent = percent;
        self
    }

    /// Set the allowed line-count difference between joined columns
    pub fn with_column_line_difference(mut self, difference: u32) -> Self {
        self.column_line_difference = difference;
        self
    }

    /// Set the facing-edge tolerance
    pub fn with_column_edge_percent(mut self, percent: u32) -> Self {
        self.column_edge_percent = percent;
        self
    }

    /// Accept only exact links
    pub fn with_exact_only(mut self, exact_only: bool) -> Self {
        self.exact_only = exact_only;
        self
    }

    /// Set the crossing tolerance
    pub fn with_intersection_tolerance(mut self, tolerance: i32) -> Self {
        self.intersection_tolerance = tolerance;
        self
    }

    /// Set the orientation
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// The same settings restricted to boxes: one column of two lines.
    ///
    /// The two lines are opposite sides of one box, so their spacing is the
    /// box size and has no upper limit.
    pub(crate) fn box_bounds(&self) -> Self {
        self.clone()
            .with_line_count(2, 2)
            .with_column_count(1, 1)
            .with_spacing(self.spacing_min, i32::MAX)
    }

    /// Check that every setting is in range
    pub fn validate(&self) -> GroupResult<()> {
        fn range<T: PartialOrd + std::fmt::Display>(name: &str, min: T, max: T) -> GroupResult<()> {
            if min > max {
                return Err(GroupError::InvalidSetting(format!(
                    "{name}: minimum {min} exceeds maximum {max}"
                )));
            }
            Ok(())
        }

        if self.line_count_min == 0 {
            return Err(GroupError::InvalidSetting(
                "line_count_min must be at least 1".to_string(),
            ));
        }
        range("line_count", self.line_count_min, self.line_count_max)?;
        range("column_count", self.column_count_min, self.column_count_max)?;
        range("column_width", self.column_width_min, self.column_width_max)?;
        range("overall_width", self.overall_width_min, self.overall_width_max)?;
        range("spacing", self.spacing_min, self.spacing_max)?;

        for (name, value) in [
            ("alignment_score_min", self.alignment_score_min),
            ("alignment_score_exact", self.alignment_score_exact),
            ("spacing_score_min", self.spacing_score_min),
            ("spacing_score_exact", self.spacing_score_exact),
            ("combine_percent", self.combine_percent),
            ("column_edge_percent", self.column_edge_percent),
        ] {
            if value > 100 {
                return Err(GroupError::InvalidSetting(format!(
                    "{name} must be 0..=100, got {value}"
                )));
            }
        }
        if self.combine_percent == 0 {
            return Err(GroupError::InvalidSetting(
                "combine_percent must be at least 1".to_string(),
            ));
        }
        if self.intersection_tolerance < 0 || self.column_spacing_max < 0 {
            return Err(GroupError::InvalidSetting(
                "tolerances must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
