#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave scheduler responsible for emitting unit spawn commands.
//!
//! The scheduler walks the active wave's directives as simulated time
//! advances. It never touches the world directly: it reacts to
//! [`Event::WaveStarted`] and [`Event::TimeAdvanced`], emits
//! [`Command::SpawnUnit`], and asks for [`Command::CompleteWave`] once the
//! script is exhausted and the lane is empty.

use std::time::Duration;

use lane_defence_core::{seconds, BurstDirective, Command, ConfigError, Event, WaveScript};

mod campaign;

pub use campaign::authored_waves;

/// Extra speed and health granted per wave number.
const MULTIPLIER_STEP: f32 = 0.1;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    waves: Vec<WaveScript>,
}

impl Config {
    /// Creates a configuration from wave scripts, validating every directive.
    pub fn new(waves: Vec<WaveScript>) -> Result<Self, ConfigError> {
        if waves.is_empty() {
            return Err(ConfigError::NoWaveScripts);
        }
        for (index, wave) in waves.iter().enumerate() {
            wave.validate(index + 1)?;
        }
        Ok(Self { waves })
    }

    /// Configuration running the authored campaign.
    #[must_use]
    pub fn authored() -> Self {
        Self {
            waves: authored_waves(),
        }
    }

    /// Number of scripted waves.
    #[must_use]
    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::authored()
    }
}

/// Progress of the scheduler through the active wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No wave is running.
    Idle,
    /// Spawning units for the directive at `directive`.
    Bursting {
        /// Index of the active directive.
        directive: usize,
        /// Units spawned for the directive so far.
        spawned: u32,
    },
    /// Waiting out the pause at `directive`.
    Delaying {
        /// Index of the active directive.
        directive: usize,
        /// Time left before the next directive.
        remaining: Duration,
    },
    /// Every directive ran; waiting for the lane to clear.
    Draining,
}

/// Pure system that walks wave scripts and emits spawn commands.
#[derive(Debug)]
pub struct Spawning {
    waves: Vec<WaveScript>,
    script: usize,
    multiplier: f32,
    phase: Phase,
    burst_timer: Duration,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            waves: config.waves,
            script: 0,
            multiplier: 1.0,
            phase: Phase::Idle,
            burst_timer: Duration::ZERO,
        }
    }

    /// Current scheduler phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Consumes world events, emitting spawn commands as burst timers expire.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::WaveStarted { wave } => self.begin(*wave),
                Event::TimeAdvanced { dt } => self.advance(*dt, out),
                Event::GameWon | Event::GameLost => self.phase = Phase::Idle,
                _ => {}
            }
        }
    }

    /// Requests wave completion once the script is exhausted and no unit remains.
    ///
    /// The request is emitted at most once per wave.
    pub fn reconcile(&mut self, live_units: usize, out: &mut Vec<Command>) {
        if self.phase == Phase::Draining && live_units == 0 {
            out.push(Command::CompleteWave);
            self.phase = Phase::Idle;
        }
    }

    fn begin(&mut self, wave: u32) {
        let last = self.waves.len().saturating_sub(1);
        let index = usize::try_from(wave.saturating_sub(1)).unwrap_or(usize::MAX);
        self.script = index.min(last);
        self.multiplier = 1.0 + MULTIPLIER_STEP * wave as f32;
        self.burst_timer = Duration::ZERO;
        self.enter(0);
    }

    fn directive(&self, index: usize) -> Option<BurstDirective> {
        self.waves
            .get(self.script)
            .and_then(|script| script.directives().get(index))
            .copied()
    }

    fn enter(&mut self, directive: usize) {
        self.phase = match self.directive(directive) {
            Some(BurstDirective::Burst { .. }) => Phase::Bursting {
                directive,
                spawned: 0,
            },
            Some(BurstDirective::Delay { delay }) => Phase::Delaying {
                directive,
                remaining: seconds(delay),
            },
            None => Phase::Draining,
        };
    }

    fn advance(&mut self, dt: Duration, out: &mut Vec<Command>) {
        match self.phase {
            Phase::Bursting { directive, spawned } => {
                let Some(BurstDirective::Burst {
                    count,
                    interval,
                    kind,
                }) = self.directive(directive)
                else {
                    self.phase = Phase::Draining;
                    return;
                };
                self.burst_timer = self.burst_timer.saturating_sub(dt);
                if !self.burst_timer.is_zero() {
                    return;
                }
                if spawned < count {
                    out.push(Command::SpawnUnit {
                        kind,
                        multiplier: self.multiplier,
                    });
                    self.burst_timer = seconds(interval);
                    self.phase = Phase::Bursting {
                        directive,
                        spawned: spawned + 1,
                    };
                } else {
                    self.enter(directive + 1);
                }
            }
            Phase::Delaying {
                directive,
                remaining,
            } => {
                let remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    self.enter(directive + 1);
                } else {
                    self.phase = Phase::Delaying {
                        directive,
                        remaining,
                    };
                }
            }
            Phase::Idle | Phase::Draining => {}
        }
    }
}
