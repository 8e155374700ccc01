//! Identity and coordinate primitives shared by every module.
//!
//! Positions are always expressed in grid space: the margin around the
//! logical map is part of the coordinate system, so a position can be used to
//! index the tile grid, the visibility grids, and the viewport without any
//! further conversion.
mod common;

pub use common::{EntityId, MapId, Position, ResourceMeter};
