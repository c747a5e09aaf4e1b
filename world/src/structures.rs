//! Authoritative structure state management utilities.

use std::{collections::BTreeMap, time::Duration};

use glam::Vec2;
use lane_defence_core::{
    seconds, HazardId, StructureId, StructureKind, StructureRole, StructureSnapshot, UpgradeError,
    UpgradeOffer, UpgradePath, UPGRADE_LEVEL_CAP,
};

/// Snapshot of a structure stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct StructureState {
    /// Identifier allocated by the world for the structure.
    pub(crate) id: StructureId,
    /// Kind of structure that was constructed.
    pub(crate) kind: StructureKind,
    /// Centre of the footprint.
    pub(crate) position: Vec2,
    range: f32,
    damage: f32,
    fire_rate: f32,
    hazard_capacity: u32,
    cooldown: Duration,
    /// Hazards this structure deployed that are still on the path.
    ///
    /// The world's shared hazard collection owns their lifetime; this list
    /// only backs the capacity check.
    live_hazards: Vec<HazardId>,
    levels: [u8; 3],
    committed_path: Option<UpgradePath>,
    invested: u32,
}

impl StructureState {
    pub(crate) fn new(id: StructureId, kind: StructureKind, position: Vec2) -> Self {
        Self {
            id,
            kind,
            position,
            range: kind.base_range(),
            damage: kind.base_damage(),
            fire_rate: kind.base_fire_rate(),
            hazard_capacity: kind.base_hazard_capacity(),
            cooldown: Duration::ZERO,
            live_hazards: Vec::new(),
            levels: [0; 3],
            committed_path: None,
            invested: kind.cost(),
        }
    }

    pub(crate) fn radius(&self) -> f32 {
        self.kind.footprint_radius()
    }

    pub(crate) fn contains(&self, point: Vec2) -> bool {
        self.position.distance_squared(point) < self.radius() * self.radius()
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.cooldown.is_zero()
    }

    pub(crate) fn cool_down(&mut self, dt: Duration) {
        self.cooldown = self.cooldown.saturating_sub(dt);
    }

    /// Restarts the cooldown at `1 / fire_rate` seconds.
    pub(crate) fn reset_cooldown(&mut self) {
        self.cooldown = if self.fire_rate > 0.0 {
            seconds(1.0 / self.fire_rate)
        } else {
            Duration::MAX
        };
    }

    pub(crate) fn fires_projectiles(&self) -> bool {
        matches!(
            self.kind.role(),
            StructureRole::DamageDealer | StructureRole::LongRange
        )
    }

    pub(crate) fn damage(&self) -> f32 {
        self.damage
    }

    pub(crate) fn can_deploy_hazard(&self) -> bool {
        self.kind.role() == StructureRole::HazardDeployer
            && (self.live_hazards.len() as u64) < u64::from(self.hazard_capacity)
    }

    pub(crate) fn track_hazard(&mut self, hazard: HazardId) {
        self.live_hazards.push(hazard);
    }

    pub(crate) fn forget_hazard(&mut self, hazard: HazardId) {
        self.live_hazards.retain(|live| *live != hazard);
    }

    pub(crate) fn sell_value(&self) -> u32 {
        self.invested / 2
    }

    /// Price of the next level on `path`: the kind's unit cost times the level about to be reached.
    pub(crate) fn upgrade_cost(&self, path: UpgradePath) -> u32 {
        let next_level = u32::from(self.levels[path.index()]) + 1;
        self.kind.upgrade_unit_cost(path).saturating_mul(next_level)
    }

    /// Checks the specialisation lock and level cap, returning the price on success.
    pub(crate) fn quote_upgrade(&self, path: UpgradePath) -> Result<u32, UpgradeError> {
        if self
            .committed_path
            .is_some_and(|committed| committed != path)
        {
            return Err(UpgradeError::PathLocked);
        }
        if self.levels[path.index()] >= UPGRADE_LEVEL_CAP {
            return Err(UpgradeError::MaxLevel);
        }
        Ok(self.upgrade_cost(path))
    }

    /// Records a paid upgrade and grows the matching stat. Returns the new level.
    pub(crate) fn apply_upgrade(&mut self, path: UpgradePath, cost: u32) -> u8 {
        self.invested = self.invested.saturating_add(cost);
        if self.committed_path.is_none() {
            self.committed_path = Some(path);
        }
        let level = &mut self.levels[path.index()];
        *level = level.saturating_add(1);

        match path {
            UpgradePath::FireRate => self.fire_rate *= path.growth_factor(),
            UpgradePath::Secondary => {
                if self.kind.role() == StructureRole::HazardDeployer {
                    self.hazard_capacity = self.hazard_capacity.saturating_add(1);
                } else {
                    self.damage *= path.growth_factor();
                }
            }
            UpgradePath::Range => self.range *= path.growth_factor(),
        }

        self.levels[path.index()]
    }

    pub(crate) fn offers(&self) -> [UpgradeOffer; 3] {
        UpgradePath::ALL.map(|path| {
            let level = self.levels[path.index()];
            UpgradeOffer {
                path,
                level,
                cost: self.upgrade_cost(path),
                locked: self
                    .committed_path
                    .is_some_and(|committed| committed != path),
                maxed: level >= UPGRADE_LEVEL_CAP,
            }
        })
    }

    pub(crate) fn snapshot(&self) -> StructureSnapshot {
        StructureSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            radius: self.radius(),
            range: self.range,
            damage: self.damage,
            fire_rate: self.fire_rate,
            ready_in: self.cooldown,
            live_hazards: self.live_hazards.len(),
            hazard_capacity: self.hazard_capacity,
            levels: self.levels,
            committed_path: self.committed_path,
            invested: self.invested,
        }
    }
}

/// Registry that stores structures and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct StructureRegistry {
    entries: BTreeMap<StructureId, StructureState>,
    next_structure_id: StructureId,
}

impl StructureRegistry {
    /// Creates an empty registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_structure_id: StructureId::new(0),
        }
    }

    pub(crate) fn insert(&mut self, kind: StructureKind, position: Vec2) -> StructureId {
        let id = self.next_structure_id;
        self.next_structure_id = StructureId::new(id.get().wrapping_add(1));
        let _ = self
            .entries
            .insert(id, StructureState::new(id, kind, position));
        id
    }

    pub(crate) fn remove(&mut self, id: StructureId) -> Option<StructureState> {
        self.entries.remove(&id)
    }

    pub(crate) fn get(&self, id: StructureId) -> Option<&StructureState> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: StructureId) -> Option<&mut StructureState> {
        self.entries.get_mut(&id)
    }

    /// Structures in placement order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &StructureState> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut StructureState> {
        self.entries.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cane() -> StructureState {
        StructureState::new(StructureId::new(7), StructureKind::Cane, Vec2::new(1.0, 2.0))
    }

    #[test]
    fn registry_allocates_sequential_identifiers() {
        let mut registry = StructureRegistry::new();
        let first = registry.insert(StructureKind::Cane, Vec2::ZERO);
        let second = registry.insert(StructureKind::Trap, Vec2::ONE);
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
        assert!(registry.remove(first).is_some());
        let third = registry.insert(StructureKind::Snowman, Vec2::ONE);
        assert_eq!(third.get(), 2, "identifiers are never reused");
    }

    #[test]
    fn upgrade_cost_scales_with_level() {
        let mut state = cane();
        assert_eq!(state.upgrade_cost(UpgradePath::FireRate), 50);
        let _ = state.apply_upgrade(UpgradePath::FireRate, 50);
        assert_eq!(state.upgrade_cost(UpgradePath::FireRate), 100);
        assert_eq!(state.snapshot().invested, 100);
    }

    #[test]
    fn first_upgrade_commits_the_path() {
        let mut state = cane();
        let _ = state.apply_upgrade(UpgradePath::Range, 50);
        assert_eq!(state.committed_path, Some(UpgradePath::Range));
        assert_eq!(
            state.quote_upgrade(UpgradePath::FireRate),
            Err(UpgradeError::PathLocked)
        );
        assert_eq!(state.quote_upgrade(UpgradePath::Range), Ok(100));
    }

    #[test]
    fn level_cap_blocks_eleventh_purchase() {
        let mut state = cane();
        for _ in 0..UPGRADE_LEVEL_CAP {
            let cost = state.quote_upgrade(UpgradePath::Secondary).expect("below cap");
            let _ = state.apply_upgrade(UpgradePath::Secondary, cost);
        }
        assert_eq!(
            state.quote_upgrade(UpgradePath::Secondary),
            Err(UpgradeError::MaxLevel)
        );
        assert!(state.offers()[UpgradePath::Secondary.index()].maxed);
    }

    #[test]
    fn trap_secondary_path_adds_capacity() {
        let mut trap = StructureState::new(StructureId::new(1), StructureKind::Trap, Vec2::ZERO);
        let _ = trap.apply_upgrade(UpgradePath::Secondary, 100);
        assert_eq!(trap.snapshot().hazard_capacity, 4);
        assert_eq!(trap.damage(), 0.0);
    }

    #[test]
    fn hazard_capacity_counts_live_hazards() {
        let mut trap = StructureState::new(StructureId::new(1), StructureKind::Trap, Vec2::ZERO);
        for id in 0..3 {
            assert!(trap.can_deploy_hazard());
            trap.track_hazard(HazardId::new(id));
        }
        assert!(!trap.can_deploy_hazard());
        trap.forget_hazard(HazardId::new(1));
        assert!(trap.can_deploy_hazard());
    }

    #[test]
    fn cooldown_resets_to_inverse_fire_rate() {
        let mut state = cane();
        state.reset_cooldown();
        assert_eq!(state.snapshot().ready_in, Duration::from_secs(1));
        state.cool_down(Duration::from_millis(400));
        assert!(!state.is_ready());
        state.cool_down(Duration::from_millis(700));
        assert!(state.is_ready());
    }

    #[test]
    fn footprint_contains_points_inside_radius() {
        let state = cane();
        assert!(state.contains(Vec2::new(10.0, 10.0)));
        assert!(!state.contains(Vec2::new(30.0, 2.0)));
    }
}
