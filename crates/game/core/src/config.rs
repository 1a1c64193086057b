/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Multiplier applied to endurance-sensitive damage against fatigued targets.
    pub fatigue_multiplier: u32,

    /// Floor applied to each damage component after mitigation.
    pub minimum_damage: u32,

    /// Global switch for counter-responses to damage.
    pub retaliation_enabled: bool,

    /// Board width used when a scenario does not specify one.
    pub grid_width: u32,

    /// Board height used when a scenario does not specify one.
    pub grid_height: u32,
}

impl EngineConfig {
    // ===== compile-time constants used as type parameters =====
    /// Largest creature footprint in hexes.
    pub const MAX_FOOTPRINT: usize = 3;
    pub const MAX_ABILITIES: usize = 4;
    pub const MAX_EFFECTS: usize = 16;
    /// Retaliations raised while resolving a retaliation are not dispatched.
    pub const MAX_RETALIATION_DEPTH: usize = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FATIGUE_MULTIPLIER: u32 = 2;
    pub const DEFAULT_GRID_WIDTH: u32 = 16;
    pub const DEFAULT_GRID_HEIGHT: u32 = 9;

    pub fn new() -> Self {
        Self {
            fatigue_multiplier: Self::DEFAULT_FATIGUE_MULTIPLIER,
            minimum_damage: 0,
            retaliation_enabled: true,
            grid_width: Self::DEFAULT_GRID_WIDTH,
            grid_height: Self::DEFAULT_GRID_HEIGHT,
        }
    }

    pub fn without_retaliation(mut self) -> Self {
        self.retaliation_enabled = false;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
