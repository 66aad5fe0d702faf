//! Column assimilation
//!
//! Stacks single lines into columns. Every seed is tried as the start of a
//! column and every accepted link becomes a new group that is itself tried
//! again, so all plausible columns are produced and qualification later
//! decides between them.

use std::collections::HashSet;

use crate::group::{GroupArena, GroupId, LineGroup};
use crate::score::{alignment_score, spacing_score};
use crate::settings::GroupSettings;
use ruling_core::LineId;

/// Most groups alive in one pass before it is cut short
pub const MAX_GROUPS: usize = 500;

/// Most new groups derived from one group per pass
pub const MAX_CHILDREN: usize = 2;

/// What kind of column is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMode {
    /// Columns of any length
    Lines,
    /// Columns of exactly two bounded segments
    Boxes,
}

/// A column pass: the groups it produced, in derivation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pass {
    pub groups: Vec<GroupId>,
    /// `false` when the group cap cut the pass short
    pub complete: bool,
}

/// Line pairs that have already been linked once
#[derive(Debug, Default)]
pub struct PairSet {
    pairs: HashSet<(LineId, LineId)>,
}

impl PairSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pair; `false` if it was already there
    pub fn insert(&mut self, last: LineId, next: LineId) -> bool {
        self.pairs.insert((last, next))
    }

    pub fn contains(&self, last: LineId, next: LineId) -> bool {
        self.pairs.contains(&(last, next))
    }
}

/// Try to add the line of `candidate` to the column ending at `outer`.
///
/// Returns the new group; `outer` is left untouched. `pairs` is consulted
/// and updated only outside exact-only and box searches.
pub fn assimilate_line(
    arena: &GroupArena,
    outer: GroupId,
    candidate: GroupId,
    settings: &GroupSettings,
    mode: ColumnMode,
    pairs: &mut PairSet,
) -> Option<LineGroup> {
    let head = &arena[outer];
    let cand = &arena[candidate];
    let dedupe = !settings.exact_only && mode == ColumnMode::Lines;

    if !cand.is_single_line() || head.column_count != 1 {
        return None;
    }
    if mode == ColumnMode::Boxes && head.line_count != 1 {
        return None;
    }
    if dedupe && pairs.contains(head.line.id(), cand.line.id()) {
        return None;
    }
    if cand.line.length() > settings.column_width_max {
        return None;
    }
    if cand.line.rect().overlaps(&head.line.rect()) {
        return None;
    }
    let spacing = cand.line.position() - head.line.position();
    if spacing <= 0 || spacing > settings.spacing_max {
        return None;
    }

    let spacing_score = spacing_score(arena, outer, spacing);
    if spacing_score.is_some_and(|s| s < settings.spacing_score_min) {
        return None;
    }
    let alignment = alignment_score(arena, outer, cand);
    if alignment < settings.alignment_score_min {
        return None;
    }

    let mut line_minimum = head.line_minimum;
    let spacing_exact = spacing_score.is_some_and(|s| s >= settings.spacing_score_exact);
    let alignment_exact = alignment >= settings.alignment_score_exact;
    if !spacing_exact && !alignment_exact {
        if settings.exact_only {
            return None;
        }
        line_minimum = line_minimum.max(3);
    }

    if dedupe {
        pairs.insert(head.line.id(), cand.line.id());
    }

    let orientation = head.orientation();
    let (start, end) = head.column_length();
    let length = (
        start.min(cand.line.length_start()),
        end.max(cand.line.length_end()),
    );
    let column_rect = orientation.make_rect(length, (head.first_position(), cand.line.position()));
    log::trace!(
        "column {:?} + {:?}: spacing {} score {:?} alignment {}",
        head.line.id(),
        cand.line.id(),
        spacing,
        spacing_score,
        alignment
    );
    Some(LineGroup {
        line: cand.line.clone(),
        rect: column_rect,
        column_rect,
        line_count: head.line_count + 1,
        column_count: 1,
        spacing,
        column_spacing: 0,
        line_minimum,
        four_sided: false,
        start_cross: cand.start_cross,
        end_cross: cand.end_cross,
        prev_line: Some(outer),
        prev_column: None,
    })
}

/// Build every column reachable from `seeds`.
///
/// Seeds are ordered by position. Each group in the working list is tried
/// against every later entry; new groups go right after it so they are
/// tried next. The result holds the seeds and everything derived.
pub fn group_lines_into_columns(
    arena: &mut GroupArena,
    seeds: &[GroupId],
    settings: &GroupSettings,
    mode: ColumnMode,
) -> Pass {
    let mut list: Vec<GroupId> = seeds.to_vec();
    list.sort_by_key(|&id| {
        let line = &arena[id].line;
        (line.position(), line.length_start())
    });
    let mut pairs = PairSet::new();
    let mut complete = true;

    let mut i = 0;
    while i < list.len() {
        let mut children = Vec::new();
        for &candidate in &list[i + 1..] {
            if children.len() == MAX_CHILDREN {
                break;
            }
            if let Some(group) = assimilate_line(arena, list[i], candidate, settings, mode, &mut pairs) {
                children.push(group);
            }
        }
        let ids: Vec<GroupId> = children.into_iter().map(|g| arena.push(g)).collect();
        list.splice(i + 1..i + 1, ids);

        if list.len() > MAX_GROUPS {
            log::warn!(
                "column pass stopped at {} groups; results are incomplete",
                list.len()
            );
            list.truncate(MAX_GROUPS);
            complete = false;
            break;
        }
        i += 1;
    }

    log::debug!(
        "columns ({:?}): {} seeds -> {} groups",
        mode,
        seeds.len(),
        list.len()
    );
    Pass {
        groups: list,
        complete,
    }
}
