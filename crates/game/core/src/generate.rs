//! Level generator boundary.
//!
//! Core only defines the request and result shapes; concrete generators live
//! in content crates.
use std::collections::BTreeMap;

use crate::map::{MapDimensions, ViewSize};
use crate::state::{EntityId, MapId};
use crate::world::World;

/// Everything a generator needs to lay out one map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelRequest {
    pub map_size: MapDimensions,
    pub view_size: ViewSize,
    pub viewport_bias: i32,
    /// Generator-specific tuning knobs (room counts, monster density, ...).
    pub params: BTreeMap<String, String>,
}

impl LevelRequest {
    pub fn new(map_size: MapDimensions, view_size: ViewSize) -> Self {
        Self {
            map_size,
            view_size,
            viewport_bias: crate::GameConfig::DEFAULT_VIEWPORT_BIAS,
            params: BTreeMap::new(),
        }
    }

    pub fn with_viewport_bias(mut self, viewport_bias: i32) -> Self {
        self.viewport_bias = viewport_bias;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Handles to what a generator created inside the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratedLevel {
    pub map: MapId,
    pub player: EntityId,
}

/// Populates `world` with a new map and places the player on it.
pub trait LevelGenerator {
    type Error;

    fn generate(&self, world: &mut World, request: &LevelRequest)
    -> Result<GeneratedLevel, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_params() {
        let request = LevelRequest::new(MapDimensions::new(80, 43), ViewSize::new(80, 45))
            .with_param("max_rooms", "30");
        assert_eq!(request.viewport_bias, 1);
        assert_eq!(request.param("max_rooms"), Some("30"));
        assert_eq!(request.param("seed"), None);
    }
}
