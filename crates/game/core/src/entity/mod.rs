//! Mobile game objects and the per-map registry that owns them.
//!
//! An [`Entity`] is plain data: cloning one yields a fully independent copy.
//! The link from an entity to its map is a [`MapId`] handle stamped by the
//! registry on insert, never a reference.
mod registry;

pub use registry::EntityRegistry;

use std::ops::Deref;

use crate::map::Rgb;
use crate::state::{EntityId, MapId, Position, ResourceMeter};

/// Draw priority among entities sharing a cell; lower orders are drawn first.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RenderOrder {
    Corpse,
    #[default]
    Item,
    Actor,
}

/// Symbol and foreground color an entity is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    pub symbol: char,
    pub color: Rgb,
}

impl Glyph {
    pub const fn new(symbol: char, color: Rgb) -> Self {
        Self { symbol, color }
    }
}

/// Behavior state carried by actors.
///
/// Only the counters the spatial core needs live here; combat formulas and
/// AI belong to other layers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub hp: ResourceMeter,
}

impl ActorState {
    pub fn new(max_hp: u32) -> Self {
        Self {
            hp: ResourceMeter::full(max_hp),
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    /// Lowers hp, saturating at zero. Returns the amount actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.hp.current);
        self.hp.current -= removed;
        removed
    }

    /// Raises hp up to the maximum. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.hp.maximum - self.hp.current);
        self.hp.current += restored;
        restored
    }
}

/// What an entity is, beyond its spatial data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Prop,
    Item,
    Actor(ActorState),
}

/// A generic object on the map: players, monsters, items, props.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) id: EntityId,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) owner: Option<MapId>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) position: Position,
    pub name: String,
    pub glyph: Glyph,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub kind: EntityKind,
}

impl Entity {
    fn new(
        name: impl Into<String>,
        glyph: Glyph,
        blocks_movement: bool,
        render_order: RenderOrder,
        kind: EntityKind,
    ) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            owner: None,
            position: Position::ORIGIN,
            name: name.into(),
            glyph,
            blocks_movement,
            render_order,
            kind,
        }
    }

    /// Blocking actor template with full hp.
    pub fn actor(name: impl Into<String>, glyph: Glyph, max_hp: u32) -> Self {
        Self::new(
            name,
            glyph,
            true,
            RenderOrder::Actor,
            EntityKind::Actor(ActorState::new(max_hp)),
        )
    }

    /// Non-blocking item template.
    pub fn item(name: impl Into<String>, glyph: Glyph) -> Self {
        Self::new(name, glyph, false, RenderOrder::Item, EntityKind::Item)
    }

    /// Scenery template drawn beneath items and actors.
    pub fn prop(name: impl Into<String>, glyph: Glyph) -> Self {
        Self::new(name, glyph, false, RenderOrder::Corpse, EntityKind::Prop)
    }

    #[must_use]
    pub fn with_blocks_movement(mut self, blocks_movement: bool) -> Self {
        self.blocks_movement = blocks_movement;
        self
    }

    #[must_use]
    pub fn with_render_order(mut self, render_order: RenderOrder) -> Self {
        self.render_order = render_order;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Map currently holding this entity, `None` for templates and detached entities.
    pub fn owner(&self) -> Option<MapId> {
        self.owner
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Shifts the entity within its current map.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.position = self.position.offset(dx, dy);
    }

    pub fn actor_state(&self) -> Option<&ActorState> {
        match &self.kind {
            EntityKind::Actor(state) => Some(state),
            _ => None,
        }
    }

    pub fn actor_state_mut(&mut self) -> Option<&mut ActorState> {
        match &mut self.kind {
            EntityKind::Actor(state) => Some(state),
            _ => None,
        }
    }

    /// Borrowed actor view, if this entity is an actor.
    pub fn as_actor(&self) -> Option<Actor<'_>> {
        self.actor_state().map(|state| Actor {
            entity: self,
            state,
        })
    }

    /// Living actors satisfy this; everything else does not.
    pub fn is_alive(&self) -> bool {
        self.actor_state().is_some_and(ActorState::is_alive)
    }
}

/// Borrowed view of an entity known to be an actor.
#[derive(Clone, Copy, Debug)]
pub struct Actor<'a> {
    entity: &'a Entity,
    state: &'a ActorState,
}

impl<'a> Actor<'a> {
    pub fn entity(&self) -> &'a Entity {
        self.entity
    }

    pub fn state(&self) -> &'a ActorState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }
}

impl Deref for Actor<'_> {
    type Target = Entity;

    fn deref(&self) -> &Entity {
        self.entity
    }
}
