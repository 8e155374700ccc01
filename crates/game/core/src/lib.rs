//! Spatial and world-state core of a turn-based grid game.
//!
//! `game-core` owns the tile grid, the viewport, field-of-view tracking, and
//! the entity registries, plus the synchronous [`engine::Engine`] that ties
//! them to a host's input and render backends. Hosts provide an
//! [`EventHandler`], an [`EventSource`], and a [`RenderSurface`]; level
//! generators implement [`LevelGenerator`].
//!
//! All positions are grid-space (margin included); see [`map::Margin`].
pub mod action;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod generate;
pub mod map;
pub mod render;
pub mod state;
pub mod world;

pub use action::{
    Action, ActionOutcome, Direction, EventHandler, EventSource, MoveAction, MoveRejection,
};
pub use config::GameConfig;
pub use engine::{Engine, EngineError, TurnPhase};
pub use entity::{Actor, ActorState, Entity, EntityKind, EntityRegistry, Glyph, RenderOrder};
pub use error::{ErrorSeverity, GameError};
pub use generate::{GeneratedLevel, LevelGenerator, LevelRequest};
pub use map::{
    Appearance, GridShape, MapDimensions, Margin, Rgb, SHROUD, Tile, TileFlags, TileGrid,
    TileKind, ViewSize, Viewport, VisibilityTracker,
};
pub use render::{Compositor, FrameBuffer, RenderSurface};
pub use state::{EntityId, MapId, Position, ResourceMeter};
pub use world::{World, WorldError, WorldMap};
