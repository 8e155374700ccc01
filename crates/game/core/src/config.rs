/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Radius (euclidean, in tiles) of the player's field of view.
    pub fov_radius: u32,
    /// Rows the focus point sits below the viewport's visual center.
    ///
    /// Recentering places the origin at `focus.y - height / 2 + viewport_bias`.
    pub viewport_bias: i32,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FOV_RADIUS: u32 = 8;
    pub const DEFAULT_VIEWPORT_BIAS: i32 = 1;

    pub fn new() -> Self {
        Self {
            fov_radius: Self::DEFAULT_FOV_RADIUS,
            viewport_bias: Self::DEFAULT_VIEWPORT_BIAS,
        }
    }

    pub fn with_fov_radius(mut self, fov_radius: u32) -> Self {
        self.fov_radius = fov_radius;
        self
    }

    pub fn with_viewport_bias(mut self, viewport_bias: i32) -> Self {
        self.viewport_bias = viewport_bias;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
