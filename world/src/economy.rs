//! Currency, lives, wave progression and the terminal outcome.

use lane_defence_core::{GameSpeed, GameStats, Outcome};

pub(crate) const STARTING_CURRENCY: u32 = 300;
pub(crate) const STARTING_LIVES: u32 = 50;

/// Currency granted for finishing `wave`.
pub(crate) const fn wave_reward(wave: u32) -> u32 {
    100u32.saturating_add(20u32.saturating_mul(wave))
}

#[derive(Clone, Debug)]
pub(crate) struct Ledger {
    pub(crate) currency: u32,
    pub(crate) lives: u32,
    pub(crate) wave: u32,
    pub(crate) wave_active: bool,
    /// Set once the running wave paid out, so a wave never pays twice.
    pub(crate) wave_completed: bool,
    pub(crate) speed: GameSpeed,
    pub(crate) outcome: Option<Outcome>,
}

impl Ledger {
    pub(crate) fn new(currency: u32, lives: u32) -> Self {
        Self {
            currency,
            lives,
            wave: 1,
            wave_active: false,
            wave_completed: false,
            speed: GameSpeed::Normal,
            outcome: None,
        }
    }

    pub(crate) fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Deducts `amount` when affordable.
    pub(crate) fn try_spend(&mut self, amount: u32) -> bool {
        match self.currency.checked_sub(amount) {
            Some(remaining) => {
                self.currency = remaining;
                true
            }
            None => false,
        }
    }

    pub(crate) fn earn(&mut self, amount: u32) {
        self.currency = self.currency.saturating_add(amount);
    }

    /// Removes one life and returns how many remain.
    pub(crate) fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Records the terminal outcome unless one was already reached.
    pub(crate) fn conclude(&mut self, outcome: Outcome) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(outcome);
        true
    }

    pub(crate) fn stats(&self) -> GameStats {
        GameStats {
            wave: self.wave,
            currency: self.currency,
            lives: self.lives,
            wave_active: self.wave_active,
            speed_multiplier: self.speed.factor(),
            game_over: self.outcome == Some(Outcome::Lost),
            game_won: self.outcome == Some(Outcome::Won),
        }
    }
}
