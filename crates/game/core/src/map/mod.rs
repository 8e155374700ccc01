//! Tile grid, viewport, and visibility tracking.
//!
//! Every grid in this module (tiles, visible, explored) shares one
//! [`GridShape`], and every coordinate passes through [`GridShape::index`]
//! before touching backing storage. The viewport never holds slices of these
//! grids; it is a pure coordinate transform evaluated on each access.
mod dimensions;
mod fov;
mod grid;
mod tile;
mod viewport;
mod visibility;

pub use dimensions::{GridShape, Margin, MapDimensions, ViewSize};
pub use fov::compute_fov;
pub use grid::TileGrid;
pub use tile::{Appearance, Rgb, SHROUD, Tile, TileFlags, TileKind};
pub use viewport::Viewport;
pub use visibility::VisibilityTracker;
