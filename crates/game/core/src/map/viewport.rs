use crate::state::Position;

use super::dimensions::ViewSize;

/// Movable window over the tile grid.
///
/// The viewport owns no tile data. Every per-cell lookup maps a view
/// coordinate to a grid position through [`Viewport::unproject`] at the
/// current origin, so tiles, visibility, and explored state are always read
/// through the same transform and can never disagree after a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    origin: Position,
    size: ViewSize,
    bias: i32,
}

impl Viewport {
    pub fn new(size: ViewSize, bias: i32) -> Self {
        Self {
            origin: Position::ORIGIN,
            size,
            bias,
        }
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn size(&self) -> ViewSize {
        self.size
    }

    pub fn bias(&self) -> i32 {
        self.bias
    }

    /// Moves the origin so that `focus` sits at the center column and
    /// `bias` rows below the center row (floor division on both axes).
    pub fn recenter_on(&mut self, focus: Position) {
        let half_width = i32::from(self.size.width) / 2;
        let half_height = i32::from(self.size.height) / 2;
        self.origin = Position::new(focus.x - half_width, focus.y - half_height + self.bias);
    }

    /// Shifts the origin without regard to any focus point.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.origin = self.origin.offset(dx, dy);
    }

    /// Returns true if `position` falls inside the current window.
    pub fn contains(&self, position: Position) -> bool {
        self.project(position).is_some()
    }

    /// Maps a grid position to view coordinates, or `None` when it is not
    /// visible in the current frame.
    pub fn project(&self, position: Position) -> Option<(u16, u16)> {
        let view_x = position.x - self.origin.x;
        let view_y = position.y - self.origin.y;
        let inside = (0..i32::from(self.size.width)).contains(&view_x)
            && (0..i32::from(self.size.height)).contains(&view_y);
        inside.then(|| (view_x as u16, view_y as u16))
    }

    /// Maps view coordinates back to the grid position under them.
    pub fn unproject(&self, view_x: u16, view_y: u16) -> Position {
        self.origin.offset(i32::from(view_x), i32::from(view_y))
    }

    /// Iterates `(view_x, view_y, grid_position)` for every cell of the window.
    pub fn cells(&self) -> impl Iterator<Item = (u16, u16, Position)> + use<> {
        let viewport = *self;
        (0..viewport.size.height).flat_map(move |view_y| {
            (0..viewport.size.width)
                .map(move |view_x| (view_x, view_y, viewport.unproject(view_x, view_y)))
        })
    }
}
