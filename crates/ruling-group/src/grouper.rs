//! Grouper
//!
//! Entry points of the crate. [`Grouper::group_lines`] finds table-like
//! areas of evenly spaced parallel lines, [`Grouper::find_boxes`] finds
//! rectangles ruled by crossing lines and
//! [`Grouper::find_box_containing_rect`] picks the box around a region.

use crate::area::group_columns_into_areas;
use crate::boxes::{append_box_results, find_lines_around_rect, matching_edges, split_at_crossings};
use crate::column::{ColumnMode, group_lines_into_columns};
use crate::error::{GroupError, GroupResult};
use crate::group::{GroupArena, GroupId, LineGroup};
use crate::qualify::{pare_groups, qualify_areas};
use crate::settings::GroupSettings;
use ruling_core::{IdGenerator, LineRect, Orientation, Rect};

/// Areas found by [`Grouper::group_lines`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupingResult {
    /// Bounds of every area, widened across the lines by half the line
    /// spacing
    pub areas: Vec<Rect>,
    /// Member lines of every area, column by column
    pub lines: Vec<Vec<LineRect>>,
    /// `false` when a pass hit the group cap
    pub complete: bool,
}

/// One box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoundBox {
    /// Bounds running through the centers of the ruling lines
    pub rect: Rect,
    /// Found from both line orientations
    pub four_sided: bool,
}

/// Boxes found by [`Grouper::find_boxes`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoxSearch {
    pub boxes: Vec<FoundBox>,
    /// `false` when a pass hit the group cap
    pub complete: bool,
}

/// Groups the lines of one page
#[derive(Debug, Clone)]
pub struct Grouper {
    settings: GroupSettings,
}

impl Grouper {
    /// Create a grouper, validating the settings
    pub fn new(settings: GroupSettings) -> GroupResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &GroupSettings {
        &self.settings
    }

    /// Find areas of evenly spaced, aligned lines.
    ///
    /// Every line must have the configured orientation. Overlapping results
    /// are pared in favour of the larger region.
    pub fn group_lines(&self, lines: &[LineRect]) -> GroupResult<GroupingResult> {
        let orientation = self.settings.orientation;
        check_orientation(lines, orientation)?;

        let mut arena = GroupArena::new();
        let seeds: Vec<GroupId> = lines
            .iter()
            .map(|line| arena.push(LineGroup::seed(line.clone())))
            .collect();
        let columns = group_lines_into_columns(&mut arena, &seeds, &self.settings, ColumnMode::Lines);
        let areas = group_columns_into_areas(&mut arena, &columns.groups, &self.settings);

        let mut candidates = seeds;
        candidates.extend_from_slice(&areas.groups);
        let mut survivors = qualify_areas(&arena, &candidates, &self.settings, true);
        survivors.sort_by_key(|&g| {
            let rect = arena[g].rect;
            (orientation.width_range(&rect).0, orientation.length_range(&rect).0)
        });

        let mut result = GroupingResult {
            complete: columns.complete && areas.complete,
            ..GroupingResult::default()
        };
        for g in survivors {
            let spacings = arena.spacings(g);
            let half = match spacings.len() {
                0 => 0,
                n => spacings.iter().sum::<i32>() / n as i32 / 2,
            };
            let rect = arena[g].rect;
            result.areas.push(match orientation {
                Orientation::Horizontal => rect.inflate(0, half),
                Orientation::Vertical => rect.inflate(half, 0),
            });
            result.lines.push(arena.member_lines(g));
        }
        log::debug!(
            "group_lines: {} lines -> {} areas{}",
            lines.len(),
            result.areas.len(),
            if result.complete { "" } else { " (incomplete)" }
        );
        Ok(result)
    }

    /// Find ruled boxes, preferring the smallest of overlapping boxes
    pub fn find_boxes(&self, horizontal: &[LineRect], vertical: &[LineRect]) -> GroupResult<BoxSearch> {
        self.find_boxes_preferring(horizontal, vertical, false)
    }

    /// Find ruled boxes.
    ///
    /// Segments of the configured orientation are grouped first, then the
    /// perpendicular ones; a box found both ways is four-sided. Of
    /// overlapping boxes the larger is kept when `prefer_larger` is set and
    /// the smaller otherwise.
    pub fn find_boxes_preferring(
        &self,
        horizontal: &[LineRect],
        vertical: &[LineRect],
        prefer_larger: bool,
    ) -> GroupResult<BoxSearch> {
        check_orientation(horizontal, Orientation::Horizontal)?;
        check_orientation(vertical, Orientation::Vertical)?;

        let last = horizontal
            .iter()
            .chain(vertical)
            .map(|line| line.id().0)
            .max()
            .unwrap_or(0);
        let mut ids = IdGenerator::starting_after(last);
        let (primary, secondary) = match self.settings.orientation {
            Orientation::Horizontal => (horizontal, vertical),
            Orientation::Vertical => (vertical, horizontal),
        };

        let mut arena = GroupArena::new();
        let (mut boxes, primary_complete) =
            self.box_pass(&mut arena, primary, secondary, &mut ids, prefer_larger);
        let (others, secondary_complete) =
            self.box_pass(&mut arena, secondary, primary, &mut ids, prefer_larger);
        append_box_results(&mut arena, &mut boxes, &others, self.settings.combine_percent);
        let survivors = pare_groups(&arena, &boxes, self.settings.combine_percent, prefer_larger);

        let boxes: Vec<FoundBox> = survivors
            .into_iter()
            .map(|g| FoundBox {
                rect: arena[g].rect,
                four_sided: arena[g].four_sided,
            })
            .collect();
        log::debug!(
            "find_boxes: {} + {} lines -> {} boxes ({} four-sided)",
            horizontal.len(),
            vertical.len(),
            boxes.len(),
            boxes.iter().filter(|b| b.four_sided).count()
        );
        Ok(BoxSearch {
            boxes,
            complete: primary_complete && secondary_complete,
        })
    }

    /// Group the segments of `seeds` cut by `perpendicular` into boxes
    fn box_pass(
        &self,
        arena: &mut GroupArena,
        seeds: &[LineRect],
        perpendicular: &[LineRect],
        ids: &mut IdGenerator,
        prefer_larger: bool,
    ) -> (Vec<GroupId>, bool) {
        let tolerance = self.settings.intersection_tolerance;
        let segments: Vec<GroupId> = seeds
            .iter()
            .flat_map(|seed| split_at_crossings(seed, perpendicular, tolerance, ids))
            .map(|segment| arena.push(segment))
            .collect();
        let pass = group_lines_into_columns(arena, &segments, &self.settings, ColumnMode::Boxes);
        let pairs: Vec<GroupId> = pass
            .groups
            .into_iter()
            .filter(|&g| arena[g].line_count == 2)
            .collect();
        let boxes = qualify_areas(arena, &pairs, &self.settings.box_bounds(), prefer_larger);
        (boxes, pass.complete)
    }

    /// The box around `target`.
    ///
    /// Only the two nearest lines on each side of `target` are used. The
    /// box must contain the target's center and share at least
    /// `min_matching_edges` of its edges; four-sided boxes are chosen over
    /// two-sided ones, then the smallest.
    pub fn find_box_containing_rect(
        &self,
        target: &Rect,
        horizontal: &[LineRect],
        vertical: &[LineRect],
        min_matching_edges: usize,
    ) -> GroupResult<Option<FoundBox>> {
        check_orientation(horizontal, Orientation::Horizontal)?;
        check_orientation(vertical, Orientation::Vertical)?;

        let (h, v) = find_lines_around_rect(horizontal, vertical, target);
        let search = self.find_boxes_preferring(&h, &v, false)?;
        let (cx, cy) = (target.center_x(), target.center_y());
        Ok(search
            .boxes
            .into_iter()
            .filter(|b| b.rect.contains_point(cx, cy))
            .filter(|b| matching_edges(&b.rect, target) >= min_matching_edges)
            .min_by_key(|b| (!b.four_sided, b.rect.area())))
    }
}

fn check_orientation(lines: &[LineRect], expected: Orientation) -> GroupResult<()> {
    match lines.iter().find(|line| line.orientation() != expected) {
        Some(line) => Err(GroupError::OrientationMismatch {
            expected,
            actual: line.orientation(),
        }),
        None => Ok(()),
    }
}
