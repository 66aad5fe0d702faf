//! Area assimilation
//!
//! Places columns side by side along the lines. Two columns join when they
//! hold about the same number of lines at about the same spacing and one
//! of their facing edges lines up.

use crate::column::{MAX_CHILDREN, MAX_GROUPS, Pass};
use crate::group::{GroupArena, GroupId, LineGroup};
use crate::score::spacing_ratio;
use crate::settings::GroupSettings;

/// Try to place the single column `candidate` after the area ending at
/// `outer`.
pub fn assimilate_column(
    arena: &GroupArena,
    outer: GroupId,
    candidate: GroupId,
    settings: &GroupSettings,
) -> Option<LineGroup> {
    let head = &arena[outer];
    let cand = &arena[candidate];

    if head.line_count < 2 || cand.line_count < 2 || cand.column_count != 1 {
        return None;
    }
    if head.line_count.abs_diff(cand.line_count) > settings.column_line_difference {
        return None;
    }
    let (head_start, head_end) = head.column_length();
    let (cand_start, cand_end) = cand.column_length();
    if head_end - head_start < settings.column_width_min
        || cand_end - cand_start < settings.column_width_min
    {
        return None;
    }
    if head.rect.overlaps(&cand.rect) || cand_start < head_end {
        return None;
    }

    let spacing = head.average_spacing();
    let tolerance = spacing * settings.column_edge_percent as i32 / 100;
    let first_gap = (head.first_position() - cand.first_position()).abs();
    let last_gap = (head.line.position() - cand.line.position()).abs();
    if first_gap > tolerance && last_gap > tolerance {
        return None;
    }

    let gap = cand_start - head_end;
    if gap > settings.column_spacing_max {
        return None;
    }
    if spacing_ratio(spacing, cand.average_spacing()) < settings.spacing_score_exact {
        return None;
    }

    log::trace!(
        "area {:?} + column {:?}: gap {}, {} + {} lines",
        head.line.id(),
        cand.line.id(),
        gap,
        head.line_count,
        cand.line_count
    );
    Some(LineGroup {
        rect: head.rect.union(&cand.rect),
        column_count: head.column_count + 1,
        column_spacing: gap,
        line_minimum: head.line_minimum + cand.line_minimum,
        four_sided: false,
        prev_column: Some(outer),
        ..cand.clone()
    })
}

/// Combine the columns of a column pass into areas.
///
/// Only groups with at least two lines take part. They are tried in order
/// along the lines; the result holds them and every area derived.
pub fn group_columns_into_areas(
    arena: &mut GroupArena,
    columns: &[GroupId],
    settings: &GroupSettings,
) -> Pass {
    let mut list: Vec<GroupId> = columns
        .iter()
        .copied()
        .filter(|&id| arena[id].line_count >= 2)
        .collect();
    list.sort_by_key(|&id| arena[id].length_range().0);
    let mut complete = true;

    let mut i = 0;
    while i < list.len() {
        let mut children = Vec::new();
        for &candidate in &list[i + 1..] {
            if children.len() == MAX_CHILDREN {
                break;
            }
            if let Some(group) = assimilate_column(arena, list[i], candidate, settings) {
                children.push(group);
            }
        }
        let ids: Vec<GroupId> = children.into_iter().map(|g| arena.push(g)).collect();
        list.splice(i + 1..i + 1, ids);

        if list.len() > MAX_GROUPS {
            log::warn!(
                "area pass stopped at {} groups; results are incomplete",
                list.len()
            );
            list.truncate(MAX_GROUPS);
            complete = false;
            break;
        }
        i += 1;
    }

    log::debug!("areas: {} columns -> {} groups", columns.len(), list.len());
    Pass {
        groups: list,
        complete,
    }
}
