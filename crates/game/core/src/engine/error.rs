use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;
use crate::world::WorldError;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the turn loop.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    World(#[from] WorldError),

    /// The player entity is no longer registered on any map.
    #[error("player {0} is not located on any map")]
    PlayerMissing(EntityId),

    #[error("render surface failed: {0}")]
    Surface(#[source] BoxedError),

    #[error("event source failed: {0}")]
    Input(#[source] BoxedError),
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::World(error) => error.severity(),
            EngineError::PlayerMissing(_) | EngineError::Surface(_) | EngineError::Input(_) => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EngineError::World(error) => error.error_code(),
            EngineError::PlayerMissing(_) => "PLAYER_MISSING",
            EngineError::Surface(_) => "SURFACE_FAILED",
            EngineError::Input(_) => "INPUT_FAILED",
        }
    }
}
