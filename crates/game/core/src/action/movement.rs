use crate::state::{EntityId, Position};
use crate::world::WorldMap;

/// Why a move was refused. The mover stays where it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveRejection {
    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is blocked by terrain")]
    Blocked { destination: Position },

    #[error("destination {destination} is occupied by {blocker}")]
    Occupied {
        destination: Position,
        blocker: EntityId,
    },
}

/// One step of an entity on its own map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub dx: i32,
    pub dy: i32,
}

impl MoveAction {
    pub fn new(actor: EntityId, dx: i32, dy: i32) -> Self {
        Self { actor, dx, dy }
    }

    pub fn destination_from(&self, origin: Position) -> Position {
        origin.offset(self.dx, self.dy)
    }

    /// Checks bounds, terrain, then blocking entities, in that order.
    ///
    /// Bumping into a blocker is only reported here; what it means (attack,
    /// swap, nothing) is up to the caller.
    pub fn pre_validate(&self, map: &WorldMap, origin: Position) -> Result<Position, MoveRejection> {
        let destination = self.destination_from(origin);
        if !map.in_bounds(destination) {
            return Err(MoveRejection::OutOfBounds { destination });
        }
        if !map.grid().is_walkable(destination) {
            return Err(MoveRejection::Blocked { destination });
        }
        if let Some(blocker) = map
            .blocking_entity_at(destination)
            .filter(|blocker| blocker.id() != self.actor)
        {
            return Err(MoveRejection::Occupied {
                destination,
                blocker: blocker.id(),
            });
        }
        Ok(destination)
    }

    /// Moves the actor to a validated destination and refocuses the viewport.
    pub fn apply(&self, map: &mut WorldMap, destination: Position) {
        if map.entities_mut().set_position(self.actor, destination) {
            map.focus_viewport(destination);
        }
    }
}
