//! Player intents and the input boundary.
//!
//! Raw host events are translated into [`Action`] values by an
//! [`EventHandler`]; the engine resolves each action against the active map
//! through [`perform`].
mod input;
mod movement;

pub use input::{EventHandler, EventSource};
pub use movement::{MoveAction, MoveRejection};

use crate::state::{EntityId, MapId};
use crate::world::{World, WorldError};

/// Eight-way step direction in screen orientation (`y` grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }
}

/// A single resolved intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Step the acting entity by a delta.
    Move { dx: i32, dy: i32 },
    /// Pass the turn in place.
    Wait,
    /// Shift the viewport without moving anything.
    Scroll { dx: i32, dy: i32 },
    /// Ask the host to leave the loop.
    Quit,
}

impl Action {
    pub const fn step(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Action::Move { dx, dy }
    }

    /// True for actions that consume a turn and therefore require the
    /// visible set to be recomputed afterwards.
    pub const fn ends_turn(&self) -> bool {
        matches!(self, Action::Move { .. } | Action::Wait)
    }
}

/// Result of resolving one [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// The move was refused; nothing changed.
    Rejected(MoveRejection),
    Quit,
}

impl ActionOutcome {
    pub const fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied)
    }
}

/// Resolves `action` for `actor` on `map`.
///
/// Rejections are ordinary outcomes. Errors mean the actor or map handle was
/// stale.
pub fn perform(
    world: &mut World,
    map: MapId,
    actor: EntityId,
    action: Action,
) -> Result<ActionOutcome, WorldError> {
    match action {
        Action::Move { dx, dy } => {
            let map = world.map_mut(map).ok_or(WorldError::MapNotFound(map))?;
            let origin = map
                .entities()
                .get(actor)
                .ok_or(WorldError::EntityNotFound(actor))?
                .position();
            let step = MoveAction::new(actor, dx, dy);
            let destination = match step.pre_validate(map, origin) {
                Ok(destination) => destination,
                Err(rejection) => {
                    tracing::debug!(%actor, %rejection, "move rejected");
                    return Ok(ActionOutcome::Rejected(rejection));
                }
            };
            step.apply(map, destination);
            Ok(ActionOutcome::Applied)
        }
        Action::Wait => {
            if world.map(map).is_none() {
                return Err(WorldError::MapNotFound(map));
            }
            tracing::trace!(%actor, "wait");
            Ok(ActionOutcome::Applied)
        }
        Action::Scroll { dx, dy } => {
            world
                .map_mut(map)
                .ok_or(WorldError::MapNotFound(map))?
                .scroll_viewport(dx, dy);
            Ok(ActionOutcome::Applied)
        }
        Action::Quit => Ok(ActionOutcome::Quit),
    }
}
