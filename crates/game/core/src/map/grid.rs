use crate::state::Position;

use super::dimensions::{GridShape, Margin, MapDimensions};
use super::tile::Tile;

/// Rectangular tile storage with a guard margin around the logical map.
///
/// The backing array is `size + 2 * margin` on each axis. All coordinates are
/// grid space; use [`TileGrid::to_grid`] to convert authored (game-space)
/// coordinates first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    size: MapDimensions,
    margin: Margin,
    shape: GridShape,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates a grid where every cell, margin included, holds `fill`.
    pub fn filled(size: MapDimensions, margin: Margin, fill: Tile) -> Self {
        let shape = GridShape::with_margin(size, margin);
        Self {
            size,
            margin,
            shape,
            tiles: vec![fill; shape.len()],
        }
    }

    /// Logical map size (margin excluded).
    pub fn size(&self) -> MapDimensions {
        self.size
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    /// Dimensions of the backing array.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Converts a game-space coordinate into the grid space used by every accessor.
    pub fn to_grid(&self, local: Position) -> Position {
        self.margin.to_grid(local)
    }

    /// Returns true if `position` lies inside the logical map.
    ///
    /// Valid iff `margin.x <= x < margin.x + width` and
    /// `margin.y <= y < margin.y + height`. Margin cells are addressable but
    /// never in bounds.
    pub fn in_bounds(&self, position: Position) -> bool {
        let local = self.margin.to_local(position);
        local.x >= 0
            && local.y >= 0
            && local.x < self.size.width as i32
            && local.y < self.size.height as i32
    }

    /// Returns true if `position` addresses the backing array (margin included).
    pub fn contains(&self, position: Position) -> bool {
        self.shape.contains(position)
    }

    pub fn get(&self, position: Position) -> Option<Tile> {
        self.shape.index(position).map(|index| self.tiles[index])
    }

    /// Writes a tile. Positions outside the backing array are ignored.
    pub fn set(&mut self, position: Position, tile: Tile) -> bool {
        match self.shape.index(position) {
            Some(index) => {
                self.tiles[index] = tile;
                true
            }
            None => false,
        }
    }

    /// Fills the inclusive rectangle spanned by two corners.
    pub fn fill_rect(&mut self, from: Position, to: Position, tile: Tile) {
        for y in from.y.min(to.y)..=from.y.max(to.y) {
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                self.set(Position::new(x, y), tile);
            }
        }
    }

    /// Transparency lookup; cells outside the backing array are opaque.
    pub fn is_transparent(&self, position: Position) -> bool {
        self.get(position).is_some_and(|tile| tile.transparent())
    }

    /// Movement lookup; cells outside the logical map always block.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.in_bounds(position) && self.get(position).is_some_and(|tile| !tile.blocks_movement())
    }

    /// Iterates the grid-space positions of the logical map.
    pub fn game_area(&self) -> impl Iterator<Item = Position> + use<> {
        let margin = self.margin;
        let (width, height) = (self.size.width as i32, self.size.height as i32);
        (0..height)
            .flat_map(move |y| (0..width).map(move |x| margin.to_grid(Position::new(x, y))))
    }
}
