use crate::state::Position;

use super::dimensions::GridShape;
use super::fov::compute_fov;
use super::grid::TileGrid;

/// Currently-visible and previously-explored flags for every grid cell.
///
/// `visible` is rebuilt by each [`VisibilityTracker::recompute`]; `explored`
/// only ever gains cells (`explored |= visible`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityTracker {
    shape: GridShape,
    visible: Vec<bool>,
    explored: Vec<bool>,
}

impl VisibilityTracker {
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            visible: vec![false; shape.len()],
            explored: vec![false; shape.len()],
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Recomputes the visible set from `observer` and merges it into the
    /// explored set.
    ///
    /// Without an observer inside the logical map this is a no-op and both
    /// sets keep their previous contents. Returns whether a recompute happened.
    pub fn recompute(&mut self, grid: &TileGrid, observer: Option<Position>, radius: u32) -> bool {
        let Some(observer) = observer.filter(|position| grid.in_bounds(*position)) else {
            tracing::debug!(?observer, "visibility recompute skipped: no valid observer");
            return false;
        };
        debug_assert_eq!(grid.shape(), self.shape, "visibility shape must match tile grid");

        self.visible.fill(false);

        let shape = self.shape;
        let visible = &mut self.visible;
        compute_fov(
            observer,
            radius,
            |position| !grid.is_transparent(position),
            |position| {
                if let Some(index) = shape.index(position) {
                    visible[index] = true;
                }
            },
        );

        for (explored, visible) in self.explored.iter_mut().zip(&self.visible) {
            *explored |= *visible;
        }

        tracing::debug!(
            %observer,
            radius,
            visible = self.visible_count(),
            explored = self.explored_count(),
            "visibility recomputed"
        );
        true
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.shape
            .index(position)
            .is_some_and(|index| self.visible[index])
    }

    pub fn is_explored(&self, position: Position) -> bool {
        self.shape
            .index(position)
            .is_some_and(|index| self.explored[index])
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|flag| **flag).count()
    }

    pub fn explored_count(&self) -> usize {
        self.explored.iter().filter(|flag| **flag).count()
    }

    /// Grid positions currently in view.
    pub fn visible_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.shape
            .positions()
            .filter(|position| self.is_visible(*position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Margin, MapDimensions, TileKind};

    fn open_grid(width: u32, height: u32, margin: Margin) -> TileGrid {
        let mut grid = TileGrid::filled(
            MapDimensions::new(width, height),
            margin,
            TileKind::Wall.tile(),
        );
        for position in grid.game_area().collect::<Vec<_>>() {
            grid.set(position, TileKind::Floor.tile());
        }
        grid
    }

    #[test]
    fn open_ten_by_ten_is_fully_visible_and_explored() {
        let grid = open_grid(10, 10, Margin::NONE);
        let mut tracker = VisibilityTracker::new(grid.shape());

        assert!(tracker.recompute(&grid, Some(Position::new(5, 5)), 8));

        assert_eq!(tracker.visible_count(), 100);
        assert_eq!(tracker.explored_count(), 100);
        for position in grid.game_area() {
            assert!(tracker.is_visible(position), "{position}");
            assert!(tracker.is_explored(position), "{position}");
        }
    }

    #[test]
    fn margin_walls_are_seen_but_not_past() {
        let margin = Margin::new(3, 3);
        let grid = open_grid(10, 10, margin);
        let mut tracker = VisibilityTracker::new(grid.shape());
        tracker.recompute(&grid, Some(margin.to_grid(Position::new(5, 5))), 8);

        for position in grid.game_area() {
            assert!(tracker.is_visible(position));
        }
        // Wall ring directly outside the map is lit, the ring beyond it is not.
        assert!(tracker.is_visible(margin.to_grid(Position::new(-1, 5))));
        assert!(!tracker.is_visible(margin.to_grid(Position::new(-2, 5))));
    }

    #[test]
    fn observer_cell_is_always_visible() {
        let grid = open_grid(5, 5, Margin::new(1, 1));
        let mut tracker = VisibilityTracker::new(grid.shape());
        let observer = Position::new(1, 1);
        tracker.recompute(&grid, Some(observer), 0);
        assert!(tracker.is_visible(observer));
        assert_eq!(tracker.visible_count(), 1);
    }

    #[test]
    fn missing_or_invalid_observer_keeps_previous_state() {
        let grid = open_grid(6, 6, Margin::new(1, 1));
        let mut tracker = VisibilityTracker::new(grid.shape());
        tracker.recompute(&grid, Some(Position::new(2, 2)), 2);
        let snapshot = tracker.clone();

        assert!(!tracker.recompute(&grid, None, 8));
        assert_eq!(tracker, snapshot);

        // Margin cell: addressable but outside the logical map.
        assert!(!tracker.recompute(&grid, Some(Position::new(0, 0)), 8));
        assert_eq!(tracker, snapshot);
    }

    #[test]
    fn explored_accumulates_while_visible_is_replaced() {
        let grid = open_grid(30, 3, Margin::NONE);
        let mut tracker = VisibilityTracker::new(grid.shape());

        let west = Position::new(2, 1);
        let east = Position::new(27, 1);
        tracker.recompute(&grid, Some(west), 3);
        assert!(tracker.is_visible(west));

        tracker.recompute(&grid, Some(east), 3);
        assert!(!tracker.is_visible(west));
        assert!(tracker.is_explored(west));
        assert!(tracker.is_visible(east));
    }

    #[test]
    fn walls_block_sight_between_rooms() {
        let mut grid = open_grid(11, 5, Margin::NONE);
        for y in 0..5 {
            grid.set(Position::new(5, y), TileKind::Wall.tile());
        }
        let mut tracker = VisibilityTracker::new(grid.shape());
        tracker.recompute(&grid, Some(Position::new(2, 2)), 20);

        assert!(tracker.is_visible(Position::new(5, 2)));
        for y in 0..5 {
            for x in 6..11 {
                assert!(!tracker.is_visible(Position::new(x, y)), "({x}, {y})");
            }
        }
    }
}
