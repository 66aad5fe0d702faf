//! Fragment merging
//!
//! Raw scans report one line as several pieces: stacked slivers of a thick
//! rule, the staircase steps of a skewed one, and collinear fragments split
//! by breaks in the print.
//! [`merge_lines`] folds them together until no kept pair can be combined.

use crate::options::LineFinderOptions;
use ruling_core::{LineRect, Rect};

/// Thresholds used when combining two lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRules {
    pub intersection_allowance: i32,
    pub in_line_tolerance: i32,
    pub bridge_gap: i32,
}

impl From<&LineFinderOptions> for MergeRules {
    fn from(opts: &LineFinderOptions) -> Self {
        Self {
            intersection_allowance: opts.intersection_allowance as i32,
            in_line_tolerance: opts.in_line_tolerance as i32,
            bridge_gap: opts.bridge_gap as i32,
        }
    }
}

impl MergeRules {
    /// The rect of `kept` and `incoming` combined, if they belong together.
    ///
    /// The test is symmetric; only the stacked case looks at which line is
    /// narrower, and ties go to `kept`.
    pub fn combine(&self, kept: &LineRect, incoming: &LineRect) -> Option<Rect> {
        if kept.orientation() != incoming.orientation() {
            return None;
        }
        let orientation = kept.orientation();

        if kept.rect() == incoming.rect() {
            return Some(kept.rect());
        }

        let overlap = kept.length_overlap(incoming);
        let length = (
            kept.length_start().min(incoming.length_start()),
            kept.length_end().max(incoming.length_end()),
        );

        // stacked: side by side across the line, mostly overlapping along it
        let across_gap =
            kept.width_start().max(incoming.width_start()) - kept.width_end().min(incoming.width_end());
        let shorter = kept.length().min(incoming.length());
        if across_gap <= self.intersection_allowance && overlap * 2 > shorter {
            let narrower = if incoming.line_width() < kept.line_width() {
                incoming
            } else {
                kept
            };
            return Some(orientation.make_rect(length, (narrower.width_start(), narrower.width_end())));
        }

        // in line: same position, end to end
        if (kept.position() - incoming.position()).abs() <= self.in_line_tolerance
            && -overlap <= self.bridge_gap
        {
            return Some(kept.rect().union(&incoming.rect()));
        }

        // staircase: consecutive pieces of a skewed rule touch across the
        // line and meet or overlap along it
        if across_gap <= self.intersection_allowance && overlap >= 0 {
            return Some(kept.rect().union(&incoming.rect()));
        }

        None
    }
}

/// First kept line that combines with `line`, and the combined rect
fn find_partner(kept: &[LineRect], line: &LineRect, rules: &MergeRules) -> Option<(usize, Rect)> {
    kept.iter()
        .enumerate()
        .find_map(|(i, k)| rules.combine(k, line).map(|r| (i, r)))
}

/// Merge fragments until no two kept lines combine.
///
/// Candidates are taken from the back. Each one absorbs every kept line it
/// combines with; the absorbed line's id survives. The result is a fixed
/// point: merging it again changes nothing.
pub fn merge_lines(candidates: Vec<LineRect>, rules: &MergeRules) -> Vec<LineRect> {
    let total = candidates.len();
    let mut pending = candidates;
    let mut kept: Vec<LineRect> = Vec::with_capacity(pending.len());

    while let Some(mut current) = pending.pop() {
        while let Some((i, rect)) = find_partner(&kept, &current, rules) {
            let absorbed = kept.remove(i);
            log::trace!(
                "merge {:?} {:?} into {:?} {:?}",
                current.id(),
                current.rect(),
                absorbed.id(),
                absorbed.rect()
            );
            current = LineRect::with_id(rect, absorbed.orientation(), absorbed.id());
        }
        kept.push(current);
    }

    log::debug!("merge: {} fragments -> {} lines", total, kept.len());
    kept
}
