//! Symmetric shadowcasting.
//!
//! Scans the four quadrants around the origin row by row, narrowing the lit
//! sector at every opaque cell. Slopes are kept as exact fractions so that a
//! transparent cell is lit iff its center lies inside the sector, which makes
//! sight between transparent cells symmetric.
use std::ops::RangeInclusive;

use crate::state::Position;

/// Marks every cell in line of sight of `origin` within `radius`.
///
/// `is_opaque` decides whether a cell blocks sight; callers should report
/// cells outside their storage as opaque. `mark_visible` is called for the
/// origin itself and for every lit cell (possibly more than once per cell).
pub fn compute_fov<F, M>(origin: Position, radius: u32, is_opaque: F, mut mark_visible: M)
where
    F: Fn(Position) -> bool,
    M: FnMut(Position),
{
    mark_visible(origin);

    let max_depth = i32::try_from(radius).unwrap_or(i32::MAX);
    let radius_squared = i64::from(radius) * i64::from(radius);

    for quadrant in Quadrant::ALL {
        let mut rows = vec![Row::first()];

        while let Some(mut row) = rows.pop() {
            if row.depth > max_depth {
                continue;
            }

            let mut previous_opaque: Option<bool> = None;
            for col in row.columns() {
                let position = quadrant.transform(origin, row.depth, col);
                let opaque = is_opaque(position);

                if (opaque || row.is_symmetric(col))
                    && origin.distance_squared(position) <= radius_squared
                {
                    mark_visible(position);
                }

                match previous_opaque {
                    Some(true) if !opaque => row.start = Slope::of_tile(row.depth, col),
                    Some(false) if opaque => {
                        let mut next = row.next();
                        next.end = Slope::of_tile(row.depth, col);
                        rows.push(next);
                    }
                    _ => {}
                }
                previous_opaque = Some(opaque);
            }

            if previous_opaque == Some(false) {
                rows.push(row.next());
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Quadrant {
    North,
    East,
    South,
    West,
}

impl Quadrant {
    const ALL: [Quadrant; 4] = [
        Quadrant::North,
        Quadrant::East,
        Quadrant::South,
        Quadrant::West,
    ];

    fn transform(self, origin: Position, depth: i32, col: i32) -> Position {
        match self {
            Quadrant::North => Position::new(origin.x + col, origin.y - depth),
            Quadrant::South => Position::new(origin.x + col, origin.y + depth),
            Quadrant::East => Position::new(origin.x + depth, origin.y + col),
            Quadrant::West => Position::new(origin.x - depth, origin.y + col),
        }
    }
}

/// Exact fraction `num / den` with `den > 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slope {
    num: i32,
    den: i32,
}

impl Slope {
    const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Slope through the leading edge of the tile at `(depth, col)`.
    const fn of_tile(depth: i32, col: i32) -> Self {
        Self::new(2 * col - 1, 2 * depth)
    }
}

#[derive(Clone, Copy, Debug)]
struct Row {
    depth: i32,
    start: Slope,
    end: Slope,
}

impl Row {
    const fn first() -> Self {
        Self {
            depth: 1,
            start: Slope::new(-1, 1),
            end: Slope::new(1, 1),
        }
    }

    const fn next(&self) -> Self {
        Self {
            depth: self.depth + 1,
            start: self.start,
            end: self.end,
        }
    }

    fn columns(&self) -> RangeInclusive<i32> {
        // floor(depth * start + 1/2) ..= ceil(depth * end - 1/2)
        let min = (2 * self.depth * self.start.num + self.start.den).div_euclid(2 * self.start.den);
        let max = -((self.end.den - 2 * self.depth * self.end.num).div_euclid(2 * self.end.den));
        min..=max
    }

    /// True if the center of column `col` lies within the row's sector.
    fn is_symmetric(&self, col: i32) -> bool {
        col * self.start.den >= self.depth * self.start.num
            && col * self.end.den <= self.depth * self.end.num
    }
}
