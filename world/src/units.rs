//! Attacking unit state.

use glam::Vec2;
use lane_defence_core::{UnitId, UnitKind, UnitSnapshot};

#[derive(Clone, Debug)]
pub(crate) struct Unit {
    pub(crate) id: UnitId,
    pub(crate) kind: UnitKind,
    pub(crate) position: Vec2,
    pub(crate) waypoint_index: usize,
    pub(crate) health: f32,
    pub(crate) max_health: f32,
    pub(crate) speed: f32,
    pub(crate) slow_factor: f32,
    pub(crate) reached_end: bool,
}

impl Unit {
    /// Creates a unit on the first waypoint heading for the second.
    ///
    /// `multiplier` scales both speed and maximum health; non-positive or
    /// non-finite values fall back to 1.0.
    pub(crate) fn spawn(id: UnitId, kind: UnitKind, multiplier: f32, origin: Vec2) -> Self {
        let multiplier = if multiplier.is_finite() && multiplier > 0.0 {
            multiplier
        } else {
            1.0
        };
        let max_health = kind.base_health() * multiplier;
        Self {
            id,
            kind,
            position: origin,
            waypoint_index: 1,
            health: max_health,
            max_health,
            speed: kind.base_speed() * multiplier,
            slow_factor: 1.0,
            reached_end: false,
        }
    }

    /// Subtracts damage and returns the remaining health.
    ///
    /// Negative amounts are ignored so health never increases.
    pub(crate) fn take_damage(&mut self, amount: f32) -> f32 {
        if amount > 0.0 {
            self.health -= amount;
        }
        self.health
    }

    pub(crate) fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Units that died or escaped no longer move, get targeted, or take hits.
    pub(crate) fn is_terminal(&self) -> bool {
        self.is_dead() || self.reached_end
    }

    pub(crate) fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            radius: self.kind.radius(),
            health: self.health,
            max_health: self.max_health,
            speed: self.speed,
            slow_factor: self.slow_factor,
            waypoint_index: self.waypoint_index,
            reached_end: self.reached_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_scales_speed_and_health() {
        let unit = Unit::spawn(UnitId::new(0), UnitKind::Normal, 1.5, Vec2::ZERO);
        assert!((unit.speed - 90.0).abs() < 1e-4);
        assert!((unit.max_health - 150.0).abs() < 1e-4);
        assert_eq!(unit.health, unit.max_health);
        assert_eq!(unit.waypoint_index, 1);
    }

    #[test]
    fn invalid_multiplier_falls_back_to_unity() {
        let unit = Unit::spawn(UnitId::new(0), UnitKind::Boss, f32::NAN, Vec2::ZERO);
        assert_eq!(unit.max_health, UnitKind::Boss.base_health());
    }

    #[test]
    fn negative_damage_never_heals() {
        let mut unit = Unit::spawn(UnitId::new(0), UnitKind::Normal, 1.0, Vec2::ZERO);
        let _ = unit.take_damage(30.0);
        assert_eq!(unit.take_damage(-50.0), 70.0);
    }

    #[test]
    fn overkill_leaves_negative_health() {
        let mut unit = Unit::spawn(UnitId::new(0), UnitKind::Normal, 1.0, Vec2::ZERO);
        assert!(unit.take_damage(99_999.0) < 0.0);
        assert!(unit.is_dead());
        assert!(unit.is_terminal());
    }
}
