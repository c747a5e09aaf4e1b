//! Static wave-script data.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, UnitKind};

/// Single step of a wave script.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BurstDirective {
    /// Spawn `count` units spaced `interval` seconds apart.
    Burst {
        /// Number of units to spawn.
        count: u32,
        /// Seconds between consecutive spawns.
        interval: f32,
        /// Kind of unit to spawn.
        #[serde(default = "default_unit_kind")]
        kind: UnitKind,
    },
    /// Pause for `delay` seconds before the next directive.
    Delay {
        /// Seconds to wait.
        delay: f32,
    },
}

fn default_unit_kind() -> UnitKind {
    UnitKind::Normal
}

impl BurstDirective {
    /// Creates a burst of ordinary units.
    #[must_use]
    pub const fn burst(count: u32, interval: f32) -> Self {
        Self::Burst {
            count,
            interval,
            kind: UnitKind::Normal,
        }
    }

    /// Creates a burst of the provided unit kind.
    #[must_use]
    pub const fn burst_of(kind: UnitKind, count: u32, interval: f32) -> Self {
        Self::Burst {
            count,
            interval,
            kind,
        }
    }

    /// Creates a pause.
    #[must_use]
    pub const fn delay(delay: f32) -> Self {
        Self::Delay { delay }
    }

    fn is_valid(&self) -> bool {
        let seconds = match *self {
            Self::Burst { interval, .. } => interval,
            Self::Delay { delay } => delay,
        };
        seconds.is_finite() && seconds >= 0.0
    }
}

/// Ordered list of directives making up one wave.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveScript {
    directives: Vec<BurstDirective>,
}

impl WaveScript {
    /// Creates a wave from its directives.
    #[must_use]
    pub fn new(directives: Vec<BurstDirective>) -> Self {
        Self { directives }
    }

    /// Directives in execution order.
    #[must_use]
    pub fn directives(&self) -> &[BurstDirective] {
        &self.directives
    }

    /// Total number of units the wave spawns.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.directives
            .iter()
            .map(|directive| match directive {
                BurstDirective::Burst { count, .. } => *count,
                BurstDirective::Delay { .. } => 0,
            })
            .sum()
    }

    /// Checks that every directive carries a usable duration.
    ///
    /// `wave` is the one-based wave number reported in the error.
    pub fn validate(&self, wave: usize) -> Result<(), ConfigError> {
        match self
            .directives
            .iter()
            .position(|directive| !directive.is_valid())
        {
            Some(directive) => Err(ConfigError::InvalidDirective { wave, directive }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BurstDirective, WaveScript};
    use crate::{ConfigError, UnitKind};

    #[test]
    fn unit_count_ignores_delays() {
        let script = WaveScript::new(vec![
            BurstDirective::burst(10, 1.0),
            BurstDirective::delay(3.0),
            BurstDirective::burst_of(UnitKind::Boss, 1, 1.0),
        ]);
        assert_eq!(script.unit_count(), 11);
    }

    #[test]
    fn negative_delay_is_rejected() {
        let script = WaveScript::new(vec![
            BurstDirective::burst(1, 1.0),
            BurstDirective::delay(-2.0),
        ]);
        assert_eq!(
            script.validate(4),
            Err(ConfigError::InvalidDirective {
                wave: 4,
                directive: 1
            })
        );
    }
}
