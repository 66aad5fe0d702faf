//! Line groups
//!
//! A [`LineGroup`] is one node of a chain. Following `prev_line` walks the
//! lines of a column from the newest back to the first; following
//! `prev_column` from a column's head walks the columns of an area. Groups
//! are never mutated once built: assimilation pushes a new node that links
//! back to its predecessor, so every partial chain stays available as a
//! candidate of its own.
//!
//! All nodes live in a [`GroupArena`] and refer to each other by
//! [`GroupId`].

use std::ops::Index;

use ruling_core::{LineId, LineRect, Orientation, Rect};

/// Index of a group in its [`GroupArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

/// One node of a line/column chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGroup {
    /// The most recently added line
    pub line: LineRect,
    /// Bounds of the whole group; across the lines the edges sit on the
    /// first and last line centers
    pub rect: Rect,
    /// Bounds of the current column, clamped like `rect`
    pub column_rect: Rect,
    /// Lines in the current column
    pub line_count: u32,
    /// Columns in the group
    pub column_count: u32,
    /// Distance from the previous line's position; 0 for a first line
    pub spacing: i32,
    /// Gap to the previous column along the lines; 0 for a first column
    pub column_spacing: i32,
    /// Total line count the group needs to qualify
    pub line_minimum: u32,
    /// Confirmed by both line orientations
    pub four_sided: bool,
    /// Perpendicular line bounding the start of `line`
    pub start_cross: Option<LineId>,
    /// Perpendicular line bounding the end of `line`
    pub end_cross: Option<LineId>,
    /// Group holding the previous line of this column
    pub prev_line: Option<GroupId>,
    /// Head of the previous column
    pub prev_column: Option<GroupId>,
}

impl LineGroup {
    /// A single-line group
    pub fn seed(line: LineRect) -> Self {
        Self::bounded_seed(line, None, None)
    }

    /// A single-line group whose ends are bounded by perpendicular lines
    pub fn bounded_seed(line: LineRect, start_cross: Option<LineId>, end_cross: Option<LineId>) -> Self {
        let rect = line.rect();
        Self {
            line,
            rect,
            column_rect: rect,
            line_count: 1,
            column_count: 1,
            spacing: 0,
            column_spacing: 0,
            line_minimum: 0,
            four_sided: false,
            start_cross,
            end_cross,
            prev_line: None,
            prev_column: None,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.line.orientation()
    }

    pub fn is_single_line(&self) -> bool {
        self.line_count == 1 && self.column_count == 1
    }

    /// Extent of the current column along the lines
    pub fn column_length(&self) -> (i32, i32) {
        self.orientation().length_range(&self.column_rect)
    }

    /// Extent of the current column across the lines
    pub fn column_across(&self) -> (i32, i32) {
        self.orientation().width_range(&self.column_rect)
    }

    /// Position of the first line of the current column
    pub fn first_position(&self) -> i32 {
        if self.line_count == 1 {
            self.line.position()
        } else {
            self.column_across().0
        }
    }

    /// Average line spacing of the current column; 0 for a single line
    pub fn average_spacing(&self) -> i32 {
        if self.line_count < 2 {
            return 0;
        }
        (self.line.position() - self.first_position()) / (self.line_count as i32 - 1)
    }

    /// Bounds along the lines of the whole group
    pub fn length_range(&self) -> (i32, i32) {
        self.orientation().length_range(&self.rect)
    }
}

/// Owner of every group built during one grouping pass
#[derive(Debug, Clone, Default)]
pub struct GroupArena {
    groups: Vec<LineGroup>,
}

impl GroupArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a group and return its id
    pub fn push(&mut self, group: LineGroup) -> GroupId {
        self.groups.push(group);
        GroupId(self.groups.len() - 1)
    }

    pub fn get(&self, id: GroupId) -> Option<&LineGroup> {
        self.groups.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Mark a group as confirmed from both orientations
    pub fn set_four_sided(&mut self, id: GroupId) {
        if let Some(group) = self.groups.get_mut(id.0) {
            group.four_sided = true;
        }
    }

    /// Groups of one column, newest line first
    pub fn column_lines(&self, head: GroupId) -> Chain<'_> {
        Chain {
            arena: self,
            next: Some(head),
            link: |g| g.prev_line,
        }
    }

    /// Column heads of one area, last column first
    pub fn columns(&self, head: GroupId) -> Chain<'_> {
        Chain {
            arena: self,
            next: Some(head),
            link: |g| g.prev_column,
        }
    }

    /// Every line of a group, columns in order, each column by position
    pub fn member_lines(&self, head: GroupId) -> Vec<LineRect> {
        let mut columns: Vec<GroupId> = self.columns(head).map(|(id, _)| id).collect();
        columns.reverse();
        let mut lines = Vec::new();
        for column in columns {
            let start = lines.len();
            lines.extend(self.column_lines(column).map(|(_, g)| g.line.clone()));
            lines[start..].reverse();
        }
        lines
    }

    /// Every line spacing recorded in a group
    pub fn spacings(&self, head: GroupId) -> Vec<i32> {
        self.columns(head)
            .flat_map(|(column, _)| self.column_lines(column))
            .filter(|(_, g)| g.prev_line.is_some())
            .map(|(_, g)| g.spacing)
            .collect()
    }
}

impl Index<GroupId> for GroupArena {
    type Output = LineGroup;

    fn index(&self, id: GroupId) -> &LineGroup {
        &self.groups[id.0]
    }
}

/// Iterator following one kind of link through the arena
pub struct Chain<'a> {
    arena: &'a GroupArena,
    next: Option<GroupId>,
    link: fn(&LineGroup) -> Option<GroupId>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (GroupId, &'a LineGroup);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let group = self.arena.get(id)?;
        self.next = (self.link)(group);
        Some((id, group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruling_core::IdGenerator;

    fn line(ids: &mut IdGenerator, y: i32) -> LineRect {
        LineRect::new(Rect::new_unchecked(0, y, 300, y + 1), Orientation::Horizontal, ids)
    }

    fn linked(arena: &GroupArena, prev: GroupId, line: LineRect) -> LineGroup {
        let outer = &arena[prev];
        let across = (outer.first_position(), line.position());
        let column_rect = Orientation::Horizontal.make_rect((0, 300), across);
        LineGroup {
            spacing: line.position() - outer.line.position(),
            line_count: outer.line_count + 1,
            prev_line: Some(prev),
            rect: column_rect,
            column_rect,
            ..LineGroup::seed(line)
        }
    }

    #[test]
    fn test_seed() {
        let mut ids = IdGenerator::new();
        let g = LineGroup::seed(line(&mut ids, 100));
        assert!(g.is_single_line());
        assert_eq!(g.first_position(), 100);
        assert_eq!(g.average_spacing(), 0);
        assert_eq!(g.rect, Rect::new_unchecked(0, 100, 300, 101));
    }

    #[test]
    fn test_chain_walks() {
        let mut ids = IdGenerator::new();
        let mut arena = GroupArena::new();
        let a = arena.push(LineGroup::seed(line(&mut ids, 100)));
        let b = arena.push(linked(&arena, a, line(&mut ids, 120)));
        let c = arena.push(linked(&arena, b, line(&mut ids, 140)));

        let walked: Vec<GroupId> = arena.column_lines(c).map(|(id, _)| id).collect();
        assert_eq!(walked, vec![c, b, a]);
        assert_eq!(arena[c].average_spacing(), 20);
        assert_eq!(arena.spacings(c), vec![20, 20]);

        let positions: Vec<i32> = arena.member_lines(c).iter().map(LineRect::position).collect();
        assert_eq!(positions, vec![100, 120, 140]);
        assert_eq!(arena.columns(c).count(), 1);
    }

    #[test]
    fn test_set_four_sided() {
        let mut ids = IdGenerator::new();
        let mut arena = GroupArena::new();
        let a = arena.push(LineGroup::seed(line(&mut ids, 10)));
        arena.set_four_sided(a);
        assert!(arena[a].four_sided);
        arena.set_four_sided(GroupId(7));
        assert_eq!(arena.len(), 1);
    }
}
