use crate::state::Position;

/// Logical size of a map, excluding the margin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Size of the viewport window in terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewSize {
    pub width: u16,
    pub height: u16,
}

impl ViewSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Guard band of extra tiles surrounding the logical map.
///
/// Game-space coordinates (as authored by a generator) start at `(0, 0)`;
/// grid-space coordinates start at `(-x, -y)` relative to them. Use
/// [`Margin::to_grid`] for that conversion; nothing else offsets by the margin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margin {
    pub x: u32,
    pub y: u32,
}

impl Margin {
    pub const NONE: Self = Self { x: 0, y: 0 };

    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Margin wide enough that a viewport recentered on any in-bounds cell
    /// stays inside the physical grid.
    ///
    /// Half the view (rounded up) on each axis, plus the recentering bias on
    /// the vertical axis.
    pub fn for_view(view: ViewSize, bias: i32) -> Self {
        Self {
            x: u32::from(view.width).div_ceil(2),
            y: u32::from(view.height).div_ceil(2) + bias.unsigned_abs(),
        }
    }

    /// Converts a game-space coordinate into grid space.
    pub const fn to_grid(self, local: Position) -> Position {
        Position::new(local.x + self.x as i32, local.y + self.y as i32)
    }

    /// Converts a grid-space coordinate back into game space.
    pub const fn to_local(self, grid: Position) -> Position {
        Position::new(grid.x - self.x as i32, grid.y - self.y as i32)
    }
}

/// Physical dimensions of a backing array (logical size plus margin on both sides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridShape {
    pub width: u32,
    pub height: u32,
}

impl GridShape {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn with_margin(size: MapDimensions, margin: Margin) -> Self {
        Self {
            width: size.width + 2 * margin.x,
            height: size.height + 2 * margin.y,
        }
    }

    pub const fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// Row-major backing index of a grid-space position.
    #[inline]
    pub const fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.y as usize * self.width as usize + position.x as usize)
        } else {
            None
        }
    }

    /// Iterates every position of the backing array in index order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}
