//! Error types for world-level entity and map operations.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, MapId};

/// Errors surfaced by [`crate::World`] when a request names something that
/// does not exist or the registries disagree with an entity's back-reference.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("map {0} not found")]
    MapNotFound(MapId),

    #[error("entity {0} is not registered on any map")]
    EntityNotFound(EntityId),

    #[error("entity {0} is already registered")]
    DuplicateEntity(EntityId),

    #[error("entity {entity} is already owned by {owner}")]
    AlreadyOwned { entity: EntityId, owner: MapId },

    #[error("entity {entity} is held by {holder} but its back-reference names {claimed:?}")]
    OwnerMismatch {
        entity: EntityId,
        holder: MapId,
        claimed: Option<MapId>,
    },
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OwnerMismatch { .. } => ErrorSeverity::Internal,
            Self::MapNotFound(_)
            | Self::EntityNotFound(_)
            | Self::DuplicateEntity(_)
            | Self::AlreadyOwned { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MapNotFound(_) => "MAP_NOT_FOUND",
            Self::EntityNotFound(_) => "ENTITY_NOT_FOUND",
            Self::DuplicateEntity(_) => "DUPLICATE_ENTITY",
            Self::AlreadyOwned { .. } => "ALREADY_OWNED",
            Self::OwnerMismatch { .. } => "OWNER_MISMATCH",
        }
    }
}
