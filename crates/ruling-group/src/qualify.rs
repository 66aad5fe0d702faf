//! Qualification and de-duplication
//!
//! Assimilation produces every plausible group, most of them overlapping
//! copies of each other. Qualification keeps the ones that meet the size
//! limits and pares overlapping duplicates down to one.

use crate::group::{GroupArena, GroupId};
use crate::settings::GroupSettings;
use ruling_core::Rect;

/// Measurements of one group used by the qualification checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStats {
    pub total_lines: u32,
    pub line_minimum: u32,
    pub column_count: u32,
    /// Line count of every column
    pub column_lines: Vec<u32>,
    /// Length of every column along the lines
    pub column_widths: Vec<i32>,
    pub overall_width: i32,
    pub spacings: Vec<i32>,
}

impl GroupStats {
    pub fn collect(arena: &GroupArena, head: GroupId) -> Self {
        let group = &arena[head];
        let mut column_lines = Vec::new();
        let mut column_widths = Vec::new();
        for (_, column) in arena.columns(head) {
            let (start, end) = column.column_length();
            column_lines.push(column.line_count);
            column_widths.push(end - start);
        }
        let (start, end) = group.length_range();
        Self {
            total_lines: column_lines.iter().sum(),
            line_minimum: group.line_minimum,
            column_count: group.column_count,
            column_lines,
            column_widths,
            overall_width: end - start,
            spacings: arena.spacings(head),
        }
    }

    /// Lower limits
    pub fn meets_minimums(&self, settings: &GroupSettings) -> bool {
        self.total_lines >= self.line_minimum
            && self.column_lines.iter().all(|&n| n >= settings.line_count_min)
            && self.column_count >= settings.column_count_min
            && self.column_widths.iter().all(|&w| w >= settings.column_width_min)
            && self.overall_width >= settings.overall_width_min
    }

    /// Upper limits, plus the smallest allowed spacing
    pub fn meets_maximums(&self, settings: &GroupSettings) -> bool {
        self.column_lines.iter().all(|&n| n <= settings.line_count_max)
            && self.column_count <= settings.column_count_max
            && self.overall_width <= settings.overall_width_max
            && self.spacings.iter().all(|&s| s >= settings.spacing_min)
    }
}

/// What paring needs to know about one result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PareEntry {
    pub bounds: Rect,
    pub four_sided: bool,
    pub lines: u32,
}

impl PareEntry {
    pub fn from_group(arena: &GroupArena, head: GroupId) -> Self {
        let group = &arena[head];
        Self {
            bounds: group.rect,
            four_sided: group.four_sided,
            lines: arena.columns(head).map(|(_, c)| c.line_count).sum(),
        }
    }

    fn duplicates(&self, other: &PareEntry, combine_percent: u32) -> bool {
        self.bounds.percent_inside(&other.bounds) >= combine_percent
            || other.bounds.percent_inside(&self.bounds) >= combine_percent
    }

    /// Whether `self` should be kept over `other`; ties keep `other`
    fn beats(&self, other: &PareEntry, prefer_larger: bool) -> bool {
        if self.four_sided != other.four_sided {
            return self.four_sided;
        }
        if self.lines != other.lines {
            return self.lines > other.lines;
        }
        let (mine, theirs) = (self.bounds.area(), other.bounds.area());
        if prefer_larger {
            mine > theirs
        } else {
            mine < theirs
        }
    }
}

/// Drop one of every pair of duplicates.
///
/// Returns the indices of the survivors in input order. Of two equal
/// entries the later one goes.
pub fn pare(entries: &[PareEntry], combine_percent: u32, prefer_larger: bool) -> Vec<usize> {
    let mut alive = vec![true; entries.len()];
    for i in 0..entries.len() {
        if !alive[i] {
            continue;
        }
        for j in i + 1..entries.len() {
            if !alive[j] || !entries[i].duplicates(&entries[j], combine_percent) {
                continue;
            }
            if entries[j].beats(&entries[i], prefer_larger) {
                alive[i] = false;
                break;
            }
            alive[j] = false;
        }
    }
    (0..entries.len()).filter(|&i| alive[i]).collect()
}

/// Pare a list of groups, keeping the survivors' order
pub fn pare_groups(
    arena: &GroupArena,
    groups: &[GroupId],
    combine_percent: u32,
    prefer_larger: bool,
) -> Vec<GroupId> {
    let entries: Vec<PareEntry> = groups
        .iter()
        .map(|&g| PareEntry::from_group(arena, g))
        .collect();
    pare(&entries, combine_percent, prefer_larger)
        .into_iter()
        .map(|i| groups[i])
        .collect()
}

/// Minimum checks, then paring, then maximum checks
pub fn qualify_areas(
    arena: &GroupArena,
    candidates: &[GroupId],
    settings: &GroupSettings,
    prefer_larger: bool,
) -> Vec<GroupId> {
    let qualified: Vec<GroupId> = candidates
        .iter()
        .copied()
        .filter(|&g| GroupStats::collect(arena, g).meets_minimums(settings))
        .collect();
    let pared = pare_groups(arena, &qualified, settings.combine_percent, prefer_larger);
    let survivors: Vec<GroupId> = pared
        .into_iter()
        .filter(|&g| GroupStats::collect(arena, g).meets_maximums(settings))
        .collect();
    log::debug!(
        "qualify: {} candidates, {} met minimums, {} survived",
        candidates.len(),
        qualified.len(),
        survivors.len()
    );
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(l: i32, t: i32, r: i32, b: i32, lines: u32, four_sided: bool) -> PareEntry {
        PareEntry {
            bounds: Rect::new_unchecked(l, t, r, b),
            four_sided,
            lines,
        }
    }

    #[test]
    fn test_more_lines_wins() {
        let entries = [
            entry(0, 100, 300, 140, 3, false),
            entry(0, 100, 300, 180, 5, false),
            entry(0, 400, 300, 440, 3, false),
        ];
        assert_eq!(pare(&entries, 90, true), vec![1, 2]);
    }

    #[test]
    fn test_four_sided_wins() {
        let entries = [
            entry(0, 0, 100, 100, 4, false),
            entry(0, 0, 100, 98, 2, true),
        ];
        assert_eq!(pare(&entries, 90, true), vec![1]);
    }

    #[test]
    fn test_region_preference() {
        let outer = entry(0, 0, 200, 200, 2, true);
        let cell = entry(0, 0, 100, 100, 2, true);
        assert_eq!(pare(&[outer, cell], 90, true), vec![0]);
        assert_eq!(pare(&[outer, cell], 90, false), vec![1]);
    }

    #[test]
    fn test_tie_drops_later() {
        let a = entry(0, 0, 100, 100, 2, false);
        assert_eq!(pare(&[a, a, a], 90, true), vec![0]);
    }

    #[test]
    fn test_partial_overlap_kept() {
        let a = entry(0, 0, 100, 100, 2, false);
        let b = entry(50, 0, 150, 100, 2, false);
        assert_eq!(pare(&[a, b], 90, true), vec![0, 1]);
        assert_eq!(pare(&[a, b], 50, true), vec![0]);
    }

    #[test]
    fn test_stats_limits() {
        let stats = GroupStats {
            total_lines: 2,
            line_minimum: 3,
            column_count: 1,
            column_lines: vec![2],
            column_widths: vec![300],
            overall_width: 300,
            spacings: vec![20],
        };
        let settings = GroupSettings::default();
        assert!(!stats.meets_minimums(&settings));
        let enough = GroupStats {
            line_minimum: 2,
            ..stats.clone()
        };
        assert!(enough.meets_minimums(&settings));
        assert!(enough.meets_maximums(&settings));
        assert!(!enough.meets_maximums(&settings.clone().with_spacing(30, 500)));
        assert!(!enough.meets_maximums(&settings.with_overall_width(0, 200)));
    }
}
