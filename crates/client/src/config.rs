//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use game_core::{GameConfig, LevelRequest, MapDimensions, ViewSize};

/// Startup settings for the terminal client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub map_size: MapDimensions,
    pub view_size: ViewSize,
    pub fov_radius: u32,
    pub viewport_bias: i32,
    /// RON layout to play instead of the built-in one.
    pub layout: Option<PathBuf>,
    /// RON template catalog replacing the built-in monsters and items.
    pub templates: Option<PathBuf>,
    /// Overrides the platform log directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            map_size: MapDimensions::new(80, 45),
            view_size: ViewSize::new(80, 45),
            fov_radius: GameConfig::DEFAULT_FOV_RADIUS,
            viewport_bias: GameConfig::DEFAULT_VIEWPORT_BIAS,
            layout: None,
            templates: None,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_MAP_WIDTH`, `DUNGEON_MAP_HEIGHT` - logical map size (default: 80x45)
    /// - `DUNGEON_VIEW_WIDTH`, `DUNGEON_VIEW_HEIGHT` - viewport size in cells (default: 80x45)
    /// - `DUNGEON_FOV_RADIUS` - field of view radius (default: 8)
    /// - `DUNGEON_LAYOUT` - path to a RON layout file
    /// - `DUNGEON_TEMPLATES` - path to a RON template catalog
    /// - `DUNGEON_LOG_DIR` - log directory
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable lookup.
    ///
    /// Unparseable or zero sizes fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(width) = parse::<u32>(read("DUNGEON_MAP_WIDTH")) {
            config.map_size.width = width;
        }
        if let Some(height) = parse::<u32>(read("DUNGEON_MAP_HEIGHT")) {
            config.map_size.height = height;
        }
        if let Some(width) = parse::<u16>(read("DUNGEON_VIEW_WIDTH")) {
            config.view_size.width = width;
        }
        if let Some(height) = parse::<u16>(read("DUNGEON_VIEW_HEIGHT")) {
            config.view_size.height = height;
        }
        if let Some(radius) = read("DUNGEON_FOV_RADIUS").and_then(|value| value.trim().parse().ok()) {
            config.fov_radius = radius;
        }
        config.layout = read("DUNGEON_LAYOUT").map(PathBuf::from);
        config.templates = read("DUNGEON_TEMPLATES").map(PathBuf::from);
        config.log_dir = read("DUNGEON_LOG_DIR").map(PathBuf::from);

        config
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new()
            .with_fov_radius(self.fov_radius)
            .with_viewport_bias(self.viewport_bias)
    }

    pub fn level_request(&self) -> LevelRequest {
        LevelRequest::new(self.map_size, self.view_size).with_viewport_bias(self.viewport_bias)
    }
}

/// Parses a positive size.
fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr + Default + PartialEq,
{
    value?.trim().parse().ok().filter(|parsed| *parsed != T::default())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(config(&[]), ClientConfig::default());
        assert_eq!(config(&[]).game_config(), GameConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("DUNGEON_MAP_WIDTH", "120"),
            ("DUNGEON_VIEW_HEIGHT", " 30 "),
            ("DUNGEON_FOV_RADIUS", "0"),
            ("DUNGEON_LAYOUT", "data/cellar.ron"),
            ("DUNGEON_TEMPLATES", "data/monsters.ron"),
        ]);
        assert_eq!(config.map_size, MapDimensions::new(120, 45));
        assert_eq!(config.view_size, ViewSize::new(80, 30));
        assert_eq!(config.fov_radius, 0);
        assert_eq!(config.layout, Some(PathBuf::from("data/cellar.ron")));
        assert_eq!(config.templates, Some(PathBuf::from("data/monsters.ron")));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn invalid_sizes_fall_back() {
        let config = config(&[
            ("DUNGEON_MAP_WIDTH", "wide"),
            ("DUNGEON_MAP_HEIGHT", "0"),
            ("DUNGEON_VIEW_WIDTH", "-3"),
            ("DUNGEON_LOG_DIR", ""),
        ]);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn level_request_carries_sizes_and_bias() {
        let request = config(&[("DUNGEON_MAP_HEIGHT", "50")]).level_request();
        assert_eq!(request.map_size, MapDimensions::new(80, 50));
        assert_eq!(request.view_size, ViewSize::new(80, 45));
        assert_eq!(request.viewport_bias, 1);
    }
}
