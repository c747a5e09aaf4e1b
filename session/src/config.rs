//! Session configuration loaded by hosts.

use glam::Vec2;
use lane_defence_core::{ConfigError, WaveScript};
use lane_defence_system_spawning::Config as SpawningConfig;
use lane_defence_world::WorldConfig;
use serde::Deserialize;

/// Seed used when a configuration does not name one.
pub const DEFAULT_SEED: u64 = 0x1a2e_d3f3_4ce0;

/// Parameters a [`crate::Session`] is built from.
///
/// Every field is optional when deserialized; missing fields fall back to
/// [`SessionConfig::default`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Play-area width in world units.
    pub width: f32,
    /// Play-area height in world units.
    pub height: f32,
    /// Currency available before the first wave.
    pub starting_currency: u32,
    /// Lives available before the first wave.
    pub starting_lives: u32,
    /// Seed for hazard placement randomness.
    pub seed: u64,
    /// Wave scripts replacing the authored campaign.
    pub waves: Option<Vec<WaveScript>>,
    /// Normalized waypoints replacing the default lane.
    pub path: Option<Vec<Vec2>>,
}

impl SessionConfig {
    /// Default configuration with the provided seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub(crate) fn world_config(&self) -> WorldConfig {
        WorldConfig {
            width: self.width,
            height: self.height,
            path: self.path.clone(),
            starting_currency: self.starting_currency,
            starting_lives: self.starting_lives,
        }
    }

    pub(crate) fn spawning_config(&self) -> Result<SpawningConfig, ConfigError> {
        match &self.waves {
            Some(waves) => SpawningConfig::new(waves.clone()),
            None => Ok(SpawningConfig::authored()),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        let world = WorldConfig::default();
        Self {
            width: world.width,
            height: world.height,
            starting_currency: world.starting_currency,
            starting_lives: world.starting_lives,
            seed: DEFAULT_SEED,
            waves: None,
            path: None,
        }
    }
}
