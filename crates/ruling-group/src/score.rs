//! Spacing and alignment scores
//!
//! Both scores are percentages. A candidate line is scored against every
//! line already in the column and the worst result counts.

use crate::group::{GroupArena, GroupId, LineGroup};
use ruling_core::LineId;

/// Ratio of two spacings as a percentage
pub fn spacing_ratio(a: i32, b: i32) -> u32 {
    let (min, max) = (a.min(b), a.max(b));
    if max <= 0 {
        return 0;
    }
    (min.max(0) as i64 * 100 / max as i64) as u32
}

/// Worst spacing ratio between `spacing` and the spacings already in the
/// column ending at `head`.
///
/// `None` for a first link; there is nothing to compare against.
pub fn spacing_score(arena: &GroupArena, head: GroupId, spacing: i32) -> Option<u32> {
    arena
        .column_lines(head)
        .filter(|(_, g)| g.prev_line.is_some())
        .map(|(_, g)| spacing_ratio(g.spacing, spacing))
        .min()
}

/// How well two lines line up, 0..=100.
///
/// The shared span is reduced by the offsets of both ends. When both lines
/// know the perpendicular line bounding an end, that end counts as aligned
/// if it is the same line and the score drops to 0 if not.
pub fn pair_alignment(a: &LineGroup, b: &LineGroup) -> u32 {
    fn end_offset(x: i32, y: i32, cross: (Option<LineId>, Option<LineId>)) -> Option<i32> {
        match cross {
            (Some(p), Some(q)) if p == q => Some(0),
            (Some(_), Some(_)) => None,
            _ => Some((x - y).abs()),
        }
    }

    let (a_start, a_end) = (a.line.length_start(), a.line.length_end());
    let (b_start, b_end) = (b.line.length_start(), b.line.length_end());
    let span = a_end.max(b_end) - a_start.min(b_start);
    if span <= 0 {
        return 0;
    }
    let Some(start) = end_offset(a_start, b_start, (a.start_cross, b.start_cross)) else {
        return 0;
    };
    let Some(end) = end_offset(a_end, b_end, (a.end_cross, b.end_cross)) else {
        return 0;
    };
    let aligned = (span - start - end).max(0);
    (aligned as i64 * 100 / span as i64) as u32
}

/// Worst alignment between `candidate` and every line of the column ending
/// at `head`
pub fn alignment_score(arena: &GroupArena, head: GroupId, candidate: &LineGroup) -> u32 {
    arena
        .column_lines(head)
        .map(|(_, g)| pair_alignment(g, candidate))
        .min()
        .unwrap_or(0)
}
