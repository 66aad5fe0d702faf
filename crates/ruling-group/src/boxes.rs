//! Box finding support
//!
//! A box is a two-line column whose lines are both bounded by the same two
//! perpendicular lines. Seed lines are first cut into every segment that
//! runs between two crossing perpendicular lines; each segment remembers
//! the ids of the lines it was cut at, which makes alignment exact.

use crate::group::{GroupArena, GroupId, LineGroup};
use ruling_core::{IdGenerator, LineId, LineRect, Orientation, Rect};

/// Whether `a` and `b` cross, allowing `tolerance` pixels of slack at
/// either line's ends
pub fn crosses(a: &LineRect, b: &LineRect, tolerance: i32) -> bool {
    let within = |value: i32, line: &LineRect| {
        value >= line.length_start() - tolerance && value <= line.length_end() + tolerance
    };
    a.orientation() != b.orientation() && within(b.position(), a) && within(a.position(), b)
}

/// Cut `seed` at every line of `perpendicular` that crosses it.
///
/// Every pair of crossings produces one segment running from the first
/// crossing's position to the second's, thick as the seed. Crossings at
/// the same position count once.
pub fn split_at_crossings(
    seed: &LineRect,
    perpendicular: &[LineRect],
    tolerance: i32,
    ids: &mut IdGenerator,
) -> Vec<LineGroup> {
    let mut crossings: Vec<(i32, LineId)> = perpendicular
        .iter()
        .filter(|p| crosses(seed, p, tolerance))
        .map(|p| (p.position(), p.id()))
        .collect();
    crossings.sort();
    crossings.dedup_by_key(|c| c.0);

    let width = (seed.width_start(), seed.width_end());
    let mut segments = Vec::new();
    for (i, &(start, start_id)) in crossings.iter().enumerate() {
        for &(end, end_id) in &crossings[i + 1..] {
            let line = LineRect::from_extents(seed.orientation(), (start, end), width, ids);
            segments.push(LineGroup::bounded_seed(line, Some(start_id), Some(end_id)));
        }
    }
    segments
}

/// Merge the boxes found from the secondary orientation into the primary
/// list.
///
/// A secondary box that matches a primary one both ways by at least
/// `combine_percent` marks that box four-sided; the rest are added.
pub fn append_box_results(
    arena: &mut GroupArena,
    primary: &mut Vec<GroupId>,
    secondary: &[GroupId],
    combine_percent: u32,
) {
    let own = primary.len();
    for &other in secondary {
        let rect = arena[other].rect;
        let matched = primary[..own].iter().copied().find(|&p| {
            let bounds = arena[p].rect;
            bounds.percent_inside(&rect) >= combine_percent && rect.percent_inside(&bounds) >= combine_percent
        });
        match matched {
            Some(p) => arena.set_four_sided(p),
            None => primary.push(other),
        }
    }
}

/// Side of a target rect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
    Left,
    Right,
}

/// The `count` lines nearest to one side of `target`, nearest first.
///
/// A line qualifies when it lies on or beyond that edge and its extent
/// covers the target's center. Lines of the wrong orientation for the side
/// are ignored.
pub fn find_closest_lines(lines: &[LineRect], target: &Rect, side: Side, count: usize) -> Vec<LineRect> {
    let (cx, cy) = (target.center_x(), target.center_y());
    let covers = |line: &LineRect, center: i32| line.length_start() <= center && center <= line.length_end();

    let (orientation, center) = match side {
        Side::Above | Side::Below => (Orientation::Horizontal, cx),
        Side::Left | Side::Right => (Orientation::Vertical, cy),
    };

    let mut found: Vec<(i32, &LineRect)> = lines
        .iter()
        .filter(|line| line.orientation() == orientation && covers(*line, center))
        .filter_map(|line| {
            let pos = line.position();
            let distance = match side {
                Side::Above => target.top - pos,
                Side::Below => pos - target.bottom,
                Side::Left => target.left - pos,
                Side::Right => pos - target.right,
            };
            (distance >= 0).then_some((distance, line))
        })
        .collect();
    found.sort_by_key(|&(distance, line)| (distance, line.id()));
    found.into_iter().take(count).map(|(_, line)| line.clone()).collect()
}

/// Lines kept on each side of a target region
pub const LINES_PER_SIDE: usize = 2;

/// The lines around `target`: the [`LINES_PER_SIDE`] nearest on every side
pub fn find_lines_around_rect(
    horizontal: &[LineRect],
    vertical: &[LineRect],
    target: &Rect,
) -> (Vec<LineRect>, Vec<LineRect>) {
    let mut h = find_closest_lines(horizontal, target, Side::Above, LINES_PER_SIDE);
    h.extend(find_closest_lines(horizontal, target, Side::Below, LINES_PER_SIDE));
    let mut v = find_closest_lines(vertical, target, Side::Left, LINES_PER_SIDE);
    v.extend(find_closest_lines(vertical, target, Side::Right, LINES_PER_SIDE));
    (h, v)
}

/// How many edges of `found` equal the matching edges of `target`
pub fn matching_edges(found: &Rect, target: &Rect) -> usize {
    [
        found.left == target.left,
        found.top == target.top,
        found.right == target.right,
        found.bottom == target.bottom,
    ]
    .iter()
    .filter(|&&m| m)
    .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(ids: &mut IdGenerator, y: i32, l: i32, r: i32) -> LineRect {
        LineRect::new(Rect::new_unchecked(l, y - 1, r, y + 1), Orientation::Horizontal, ids)
    }

    fn v(ids: &mut IdGenerator, x: i32, t: i32, b: i32) -> LineRect {
        LineRect::new(Rect::new_unchecked(x - 1, t, x + 1, b), Orientation::Vertical, ids)
    }

    #[test]
    fn test_crosses_with_tolerance() {
        let mut ids = IdGenerator::new();
        let seed = h(&mut ids, 100, 50, 300);
        assert!(crosses(&seed, &v(&mut ids, 50, 90, 200), 20));
        // ends 15 px short of the seed
        assert!(crosses(&seed, &v(&mut ids, 200, 115, 300), 20));
        assert!(!crosses(&seed, &v(&mut ids, 200, 125, 300), 20));
        assert!(!crosses(&seed, &v(&mut ids, 330, 0, 200), 20));
        assert!(!crosses(&seed, &h(&mut ids, 100, 0, 400), 20));
    }

    #[test]
    fn test_split_every_pair() {
        let mut ids = IdGenerator::new();
        let seed = h(&mut ids, 100, 0, 400);
        let perpendicular = [
            v(&mut ids, 300, 0, 200),
            v(&mut ids, 50, 0, 200),
            v(&mut ids, 200, 0, 200),
            v(&mut ids, 200, 0, 150),
        ];
        let mut seg_ids = IdGenerator::starting_after(ids.last_assigned());
        let segments = split_at_crossings(&seed, &perpendicular, 20, &mut seg_ids);
        let spans: Vec<(i32, i32)> = segments
            .iter()
            .map(|s| (s.line.length_start(), s.line.length_end()))
            .collect();
        assert_eq!(spans, vec![(50, 200), (50, 300), (200, 300)]);
        assert_eq!(segments[0].start_cross, Some(perpendicular[1].id()));
        assert_eq!(segments[2].end_cross, Some(perpendicular[0].id()));
        assert_eq!(segments[0].line.rect(), Rect::new_unchecked(50, 99, 200, 101));
        assert!(segments.iter().all(|s| s.line.id() > perpendicular[3].id()));
    }

    #[test]
    fn test_closest_lines() {
        let mut ids = IdGenerator::new();
        let lines = [
            h(&mut ids, 50, 0, 400),
            h(&mut ids, 100, 0, 400),
            h(&mut ids, 150, 0, 400),
            h(&mut ids, 120, 300, 400),
            h(&mut ids, 300, 0, 400),
        ];
        let target = Rect::new_unchecked(100, 160, 200, 250);
        let above = find_closest_lines(&lines, &target, Side::Above, 2);
        assert_eq!(above, vec![lines[2].clone(), lines[1].clone()]);
        let below = find_closest_lines(&lines, &target, Side::Below, 2);
        assert_eq!(below, vec![lines[4].clone()]);
        assert!(find_closest_lines(&lines, &target, Side::Left, 2).is_empty());
    }

    #[test]
    fn test_lines_around_rect() {
        let mut ids = IdGenerator::new();
        let horizontal: Vec<LineRect> = [20, 50, 100, 150, 200, 250]
            .iter()
            .map(|&y| h(&mut ids, y, 0, 400))
            .collect();
        let vertical: Vec<LineRect> = [10, 60, 110, 300, 350, 390]
            .iter()
            .map(|&x| v(&mut ids, x, 0, 300))
            .collect();
        let target = Rect::new_unchecked(120, 110, 280, 140);
        let (near_h, near_v) = find_lines_around_rect(&horizontal, &vertical, &target);
        let ys: Vec<i32> = near_h.iter().map(LineRect::position).collect();
        let xs: Vec<i32> = near_v.iter().map(LineRect::position).collect();
        assert_eq!(ys, vec![100, 50, 150, 200]);
        assert_eq!(xs, vec![110, 60, 300, 350]);
    }

    #[test]
    fn test_append_marks_four_sided() {
        let mut ids = IdGenerator::new();
        let mut arena = GroupArena::new();
        let mut group = |rect: Rect| {
            let mut g = LineGroup::seed(h(&mut ids, 0, 0, 10));
            g.rect = rect;
            arena.push(g)
        };
        let a = group(Rect::new_unchecked(0, 0, 100, 100));
        let b = group(Rect::new_unchecked(200, 0, 300, 100));
        let same_a = group(Rect::new_unchecked(1, 0, 100, 100));
        let other = group(Rect::new_unchecked(0, 200, 100, 300));
        let mut primary = vec![a, b];
        append_box_results(&mut arena, &mut primary, &[same_a, other], 90);
        assert_eq!(primary, vec![a, b, other]);
        assert!(arena[a].four_sided);
        assert!(!arena[b].four_sided);
        assert!(!arena[other].four_sided);
    }

    #[test]
    fn test_matching_edges() {
        let a = Rect::new_unchecked(0, 0, 100, 100);
        assert_eq!(matching_edges(&a, &a), 4);
        assert_eq!(matching_edges(&a, &Rect::new_unchecked(0, 5, 100, 90)), 2);
    }
}
