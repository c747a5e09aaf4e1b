#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lane Defence.
//!
//! Every mutation flows through [`apply`]; read access goes through the
//! [`query`] module. Rejected requests never change state: the world answers
//! them with a `*Rejected` event carrying the reason.

mod economy;
mod ordnance;
mod path;
mod structures;
mod units;

use glam::Vec2;
use lane_defence_core::{
    Command, ConfigError, Event, GameSpeed, HazardId, Outcome, PlacementError, ProjectileId,
    SaleError, UnitId, UnitKind, UpgradeError, WELCOME_BANNER,
};

use economy::Ledger;
use ordnance::{Hazard, Projectile};
use path::Path;
use structures::StructureRegistry;
use units::Unit;

const DEFAULT_PLAY_AREA_WIDTH: f32 = 1280.0;
const DEFAULT_PLAY_AREA_HEIGHT: f32 = 720.0;

/// Half-width of the corridor kept free around the path.
const PATH_CORRIDOR_HALF_WIDTH: f32 = 40.0;

/// Static parameters the world is constructed from.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Play-area width in world units.
    pub width: f32,
    /// Play-area height in world units.
    pub height: f32,
    /// Normalized waypoints; the default lane is used when absent.
    pub path: Option<Vec<Vec2>>,
    /// Currency available before the first wave.
    pub starting_currency: u32,
    /// Lives available before the first wave.
    pub starting_lives: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLAY_AREA_WIDTH,
            height: DEFAULT_PLAY_AREA_HEIGHT,
            path: None,
            starting_currency: economy::STARTING_CURRENCY,
            starting_lives: economy::STARTING_LIVES,
        }
    }
}

/// Represents the authoritative Lane Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    play_area: Vec2,
    path: Path,
    units: Vec<Unit>,
    structures: StructureRegistry,
    projectiles: Vec<Projectile>,
    hazards: Vec<Hazard>,
    ledger: Ledger,
    next_unit_id: UnitId,
    next_projectile_id: ProjectileId,
    next_hazard_id: HazardId,
}

impl World {
    /// Creates a world with the default play area, lane and economy.
    #[must_use]
    pub fn new() -> Self {
        let config = WorldConfig::default();
        Self::assemble(
            &config,
            Path::default_lane(config.width, config.height),
        )
    }

    /// Creates a world from validated configuration.
    pub fn from_config(config: &WorldConfig) -> Result<Self, ConfigError> {
        if !is_valid_play_area(config.width, config.height) {
            return Err(ConfigError::InvalidPlayArea {
                width: config.width,
                height: config.height,
            });
        }
        let path = match &config.path {
            Some(waypoints) => Path::new(waypoints.clone(), config.width, config.height)?,
            None => Path::default_lane(config.width, config.height),
        };
        Ok(Self::assemble(config, path))
    }

    fn assemble(config: &WorldConfig, path: Path) -> Self {
        Self {
            banner: WELCOME_BANNER,
            play_area: Vec2::new(config.width, config.height),
            path,
            units: Vec::new(),
            structures: StructureRegistry::new(),
            projectiles: Vec::new(),
            hazards: Vec::new(),
            ledger: Ledger::new(config.starting_currency, config.starting_lives),
            next_unit_id: UnitId::new(0),
            next_projectile_id: ProjectileId::new(0),
            next_hazard_id: HazardId::new(0),
        }
    }

    fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units
            .binary_search_by_key(&id, |unit| unit.id)
            .ok()
            .map(|index| &mut self.units[index])
    }

    fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units
            .binary_search_by_key(&id, |unit| unit.id)
            .ok()
            .map(|index| &self.units[index])
    }

    fn allocate_unit_id(&mut self) -> UnitId {
        let id = self.next_unit_id;
        self.next_unit_id = UnitId::new(id.get().wrapping_add(1));
        id
    }

    fn allocate_projectile_id(&mut self) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().wrapping_add(1));
        id
    }

    fn allocate_hazard_id(&mut self) -> HazardId {
        let id = self.next_hazard_id;
        self.next_hazard_id = HazardId::new(id.get().wrapping_add(1));
        id
    }

    fn take_projectile(&mut self, id: ProjectileId) -> Option<Projectile> {
        let index = self
            .projectiles
            .iter()
            .position(|projectile| projectile.id == id)?;
        Some(self.projectiles.remove(index))
    }

    fn take_hazard(&mut self, id: HazardId) -> Option<Hazard> {
        let index = self.hazards.iter().position(|hazard| hazard.id == id)?;
        let hazard = self.hazards.remove(index);
        if let Some(owner) = self.structures.get_mut(hazard.owner) {
            owner.forget_hazard(hazard.id);
        }
        Some(hazard)
    }

    /// Applies damage to a unit that has not escaped, reporting the hit.
    ///
    /// Units killed earlier in the same frame still absorb the hit; they are
    /// only removed during casualty resolution.
    fn damage_unit(&mut self, id: UnitId, amount: f32, out_events: &mut Vec<Event>) {
        let Some(unit) = self.unit_mut(id) else {
            return;
        };
        if unit.reached_end {
            return;
        }
        let health = unit.take_damage(amount);
        out_events.push(Event::UnitDamaged {
            unit: id,
            amount,
            health,
        });
    }

    fn resolve_casualties(&mut self, out_events: &mut Vec<Event>) {
        let (removed, survivors): (Vec<Unit>, Vec<Unit>) = std::mem::take(&mut self.units)
            .into_iter()
            .partition(Unit::is_terminal);
        self.units = survivors;

        for unit in removed {
            if unit.is_dead() {
                let reward = unit.kind.reward();
                self.ledger.earn(reward);
                out_events.push(Event::UnitKilled {
                    unit: unit.id,
                    kind: unit.kind,
                    reward,
                });
                if unit.kind == UnitKind::Boss && self.ledger.conclude(Outcome::Won) {
                    log::info!("boss defeated on wave {}", self.ledger.wave);
                    out_events.push(Event::GameWon);
                }
            } else {
                let lives = self.ledger.lose_life();
                out_events.push(Event::UnitLeaked {
                    unit: unit.id,
                    lives,
                });
                if lives == 0 && self.ledger.conclude(Outcome::Lost) {
                    log::info!("life pool exhausted on wave {}", self.ledger.wave);
                    out_events.push(Event::GameLost);
                }
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the session reached an outcome only play-area changes still apply.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    let layout = matches!(command, Command::ConfigurePlayArea { .. });
    if world.ledger.is_over() && !layout {
        reject_after_outcome(command, out_events);
        return;
    }

    match command {
        Command::ConfigurePlayArea { width, height } => {
            if !is_valid_play_area(width, height) {
                log::debug!("ignoring play area {width}x{height}");
                return;
            }
            world.play_area = Vec2::new(width, height);
            world.path.resolve(width, height);
            out_events.push(Event::PlayAreaConfigured { width, height });
        }
        Command::Tick { dt } => {
            let factor = world.ledger.speed.factor() as u32;
            let scaled = dt.saturating_mul(factor);
            for structure in world.structures.iter_mut() {
                structure.cool_down(scaled);
            }
            out_events.push(Event::TimeAdvanced { dt: scaled });
        }
        Command::StartWave => {
            if world.ledger.wave_active {
                world.ledger.speed = world.ledger.speed.toggled();
                out_events.push(Event::SpeedChanged {
                    speed: world.ledger.speed,
                });
            } else {
                world.ledger.wave_active = true;
                world.ledger.wave_completed = false;
                world.ledger.speed = GameSpeed::Normal;
                log::info!("wave {} started", world.ledger.wave);
                out_events.push(Event::WaveStarted {
                    wave: world.ledger.wave,
                });
            }
        }
        Command::SpawnUnit { kind, multiplier } => {
            let id = world.allocate_unit_id();
            let origin = world.path.start();
            world.units.push(Unit::spawn(id, kind, multiplier, origin));
            out_events.push(Event::UnitSpawned { unit: id, kind });
        }
        Command::MoveUnit {
            unit,
            position,
            waypoint_index,
            reached_end,
        } => {
            if !position.is_finite() {
                return;
            }
            let Some(state) = world.unit_mut(unit) else {
                return;
            };
            if state.is_terminal() || waypoint_index < state.waypoint_index {
                return;
            }
            state.position = position;
            state.waypoint_index = waypoint_index;
            state.reached_end = reached_end;
        }
        Command::PlaceStructure { kind, position } => {
            if let Some(reason) = query::placement_error(world, kind, position) {
                log::debug!("placement of {kind:?} at {position} rejected: {reason}");
                out_events.push(Event::StructurePlacementRejected {
                    kind,
                    position,
                    reason,
                });
                return;
            }
            if !world.ledger.try_spend(kind.cost()) {
                out_events.push(Event::StructurePlacementRejected {
                    kind,
                    position,
                    reason: PlacementError::InsufficientFunds,
                });
                return;
            }
            let structure = world.structures.insert(kind, position);
            out_events.push(Event::StructurePlaced {
                structure,
                kind,
                position,
            });
        }
        Command::SellStructure { structure } => {
            let Some(state) = world.structures.remove(structure) else {
                log::debug!("sale of {structure:?} rejected: missing");
                out_events.push(Event::StructureSaleRejected {
                    structure,
                    reason: SaleError::MissingStructure,
                });
                return;
            };
            let refund = state.sell_value();
            world.ledger.earn(refund);
            out_events.push(Event::StructureSold { structure, refund });
        }
        Command::PurchaseUpgrade { structure, path } => {
            let Some(state) = world.structures.get_mut(structure) else {
                out_events.push(Event::UpgradeRejected {
                    structure,
                    path,
                    reason: UpgradeError::MissingStructure,
                });
                return;
            };
            let cost = match state.quote_upgrade(path) {
                Ok(cost) => cost,
                Err(reason) => {
                    log::debug!("upgrade of {structure:?} on {path:?} rejected: {reason}");
                    out_events.push(Event::UpgradeRejected {
                        structure,
                        path,
                        reason,
                    });
                    return;
                }
            };
            if !world.ledger.try_spend(cost) {
                out_events.push(Event::UpgradeRejected {
                    structure,
                    path,
                    reason: UpgradeError::InsufficientFunds,
                });
                return;
            }
            let level = state.apply_upgrade(path, cost);
            out_events.push(Event::UpgradePurchased {
                structure,
                path,
                level,
                cost,
            });
        }
        Command::FireProjectile { structure, target } => {
            if !world.unit(target).is_some_and(|unit| !unit.is_terminal()) {
                return;
            }
            let Some(state) = world.structures.get(structure) else {
                return;
            };
            if !state.fires_projectiles() || !state.is_ready() {
                return;
            }
            let origin = state.position;
            let damage = state.damage();
            let projectile = world.allocate_projectile_id();
            world
                .projectiles
                .push(Projectile::launch(projectile, origin, target, damage));
            if let Some(state) = world.structures.get_mut(structure) {
                state.reset_cooldown();
            }
            out_events.push(Event::ProjectileFired {
                projectile,
                structure,
                target,
            });
        }
        Command::DeployHazard {
            structure,
            position,
        } => {
            if !position.is_finite() {
                return;
            }
            let ready = world
                .structures
                .get(structure)
                .is_some_and(|state| state.is_ready() && state.can_deploy_hazard());
            if !ready {
                return;
            }
            let hazard = world.allocate_hazard_id();
            world
                .hazards
                .push(Hazard::deploy(hazard, structure, position));
            if let Some(state) = world.structures.get_mut(structure) {
                state.track_hazard(hazard);
                state.reset_cooldown();
            }
            log::debug!("{structure:?} deployed {hazard:?} at {position}");
            out_events.push(Event::HazardDeployed {
                hazard,
                structure,
                position,
            });
        }
        Command::AdvanceProjectile {
            projectile,
            position,
        } => {
            if let Some(state) = world
                .projectiles
                .iter_mut()
                .find(|state| state.id == projectile)
            {
                state.position = position;
            }
        }
        Command::ImpactProjectile { projectile } => {
            let Some(state) = world.take_projectile(projectile) else {
                return;
            };
            world.damage_unit(state.target, state.damage, out_events);
        }
        Command::DiscardProjectile { projectile } => {
            if world.take_projectile(projectile).is_some() {
                out_events.push(Event::ProjectileDiscarded { projectile });
            }
        }
        Command::AgeHazard { hazard, remaining } => {
            if let Some(state) = world.hazards.iter_mut().find(|state| state.id == hazard) {
                state.remaining = state.remaining.min(remaining);
            }
        }
        Command::ExpireHazard { hazard } => {
            if world.take_hazard(hazard).is_some() {
                out_events.push(Event::HazardExpired { hazard });
            }
        }
        Command::TriggerHazard { hazard, unit } => {
            if world.take_hazard(hazard).is_none() {
                return;
            }
            out_events.push(Event::HazardTriggered { hazard, unit });
            if let Some(kind) = world.unit(unit).map(|state| state.kind) {
                world.damage_unit(unit, kind.hazard_damage(), out_events);
            }
        }
        Command::ResolveCasualties => world.resolve_casualties(out_events),
        Command::CompleteWave => {
            let ledger = &mut world.ledger;
            if !ledger.wave_active || ledger.wave_completed || !world.units.is_empty() {
                return;
            }
            let wave = ledger.wave;
            let reward = economy::wave_reward(wave);
            ledger.earn(reward);
            ledger.wave_completed = true;
            ledger.wave_active = false;
            ledger.speed = GameSpeed::Normal;
            ledger.wave = wave.saturating_add(1);
            log::info!("wave {wave} complete, granted {reward}");
            out_events.push(Event::WaveCompleted { wave, reward });
        }
    }
}

/// Answers player requests that arrive after the session ended.
fn reject_after_outcome(command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlaceStructure { kind, position } => {
            out_events.push(Event::StructurePlacementRejected {
                kind,
                position,
                reason: PlacementError::SessionOver,
            });
        }
        Command::SellStructure { structure } => {
            out_events.push(Event::StructureSaleRejected {
                structure,
                reason: SaleError::SessionOver,
            });
        }
        Command::PurchaseUpgrade { structure, path } => {
            out_events.push(Event::UpgradeRejected {
                structure,
                path,
                reason: UpgradeError::SessionOver,
            });
        }
        _ => {}
    }
}

fn is_valid_play_area(width: f32, height: f32) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glam::Vec2;
    use lane_defence_core::{
        GameStats, HazardView, Outcome, PathView, PlacementError, ProjectileView, StructureId,
        StructureKind, StructureSnapshot, StructureView, UnitView, UpgradeOffer,
    };

    use super::{World, PATH_CORRIDOR_HALF_WIDTH};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Current play-area dimensions as `(width, height)`.
    #[must_use]
    pub fn play_area(world: &World) -> Vec2 {
        world.play_area
    }

    /// Economy and progression figures for a UI layer.
    #[must_use]
    pub fn stats(world: &World) -> GameStats {
        world.ledger.stats()
    }

    /// Terminal outcome, once reached.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        world.ledger.outcome
    }

    /// Reports whether the session reached a terminal outcome.
    #[must_use]
    pub fn is_over(world: &World) -> bool {
        world.ledger.is_over()
    }

    /// Reports whether the running wave already paid out.
    #[must_use]
    pub fn wave_completed(world: &World) -> bool {
        world.ledger.wave_completed
    }

    /// Resolved path waypoints.
    #[must_use]
    pub fn path_view(world: &World) -> PathView<'_> {
        world.path.view()
    }

    /// Captures a read-only view of the units on the path.
    #[must_use]
    pub fn unit_view(world: &World) -> UnitView {
        UnitView::from_snapshots(world.units.iter().map(|unit| unit.snapshot()).collect())
    }

    /// Number of units still present, including ones awaiting removal.
    #[must_use]
    pub fn live_unit_count(world: &World) -> usize {
        world.units.len()
    }

    /// Captures a read-only view of the placed structures.
    #[must_use]
    pub fn structure_view(world: &World) -> StructureView {
        StructureView::from_snapshots(world.structures.iter().map(|s| s.snapshot()).collect())
    }

    /// Snapshot of a single structure.
    #[must_use]
    pub fn structure(world: &World, id: StructureId) -> Option<StructureSnapshot> {
        world.structures.get(id).map(|state| state.snapshot())
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the hazards waiting on the path.
    #[must_use]
    pub fn hazard_view(world: &World) -> HazardView {
        HazardView::from_snapshots(world.hazards.iter().map(|hazard| hazard.snapshot()).collect())
    }

    /// Finds the structure whose footprint contains `point`.
    #[must_use]
    pub fn structure_at(world: &World, point: Vec2) -> Option<StructureId> {
        world
            .structures
            .iter()
            .find(|state| state.contains(point))
            .map(|state| state.id)
    }

    /// Upgrade menu for a structure: one entry per path.
    #[must_use]
    pub fn upgrade_offers(world: &World, id: StructureId) -> Option<[UpgradeOffer; 3]> {
        world.structures.get(id).map(|state| state.offers())
    }

    /// Reports why placing `kind` at `position` would be rejected, if it would.
    #[must_use]
    pub fn placement_error(
        world: &World,
        kind: StructureKind,
        position: Vec2,
    ) -> Option<PlacementError> {
        if world.ledger.is_over() {
            return Some(PlacementError::SessionOver);
        }
        if !position.is_finite() {
            return Some(PlacementError::InvalidPosition);
        }
        if world.ledger.currency < kind.cost() {
            return Some(PlacementError::InsufficientFunds);
        }
        let clearance = kind.footprint_radius() + PATH_CORRIDOR_HALF_WIDTH;
        if world.path.view().distance_to(position) < clearance {
            return Some(PlacementError::PathClearance);
        }
        let overlaps = world.structures.iter().any(|existing| {
            existing.position.distance(position) < existing.radius() + kind.footprint_radius()
        });
        if overlaps {
            return Some(PlacementError::Overlap);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use lane_defence_core::{StructureId, StructureKind, UpgradePath};

    const OPEN_GROUND: Vec2 = Vec2::new(100.0, 600.0);

    fn place(world: &mut World, kind: StructureKind, position: Vec2) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::PlaceStructure { kind, position },
            &mut events,
        );
        events
    }

    fn spawn(world: &mut World, kind: UnitKind) -> UnitId {
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnUnit {
                kind,
                multiplier: 1.0,
            },
            &mut events,
        );
        match events.as_slice() {
            [Event::UnitSpawned { unit, .. }] => *unit,
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn placement_deducts_cost() {
        let mut world = World::new();
        let events = place(&mut world, StructureKind::Cane, OPEN_GROUND);
        assert!(matches!(
            events.as_slice(),
            [Event::StructurePlaced { kind: StructureKind::Cane, .. }]
        ));
        assert_eq!(query::stats(&world).currency, 250);
    }

    #[test]
    fn placement_on_path_is_rejected_without_charge() {
        let mut world = World::new();
        let on_path = Vec2::new(100.0, 360.0);
        let events = place(&mut world, StructureKind::Cane, on_path);
        assert_eq!(
            events,
            vec![Event::StructurePlacementRejected {
                kind: StructureKind::Cane,
                position: on_path,
                reason: PlacementError::PathClearance,
            }]
        );
        assert_eq!(query::stats(&world).currency, 300);
    }

    #[test]
    fn overlapping_placement_is_rejected() {
        let mut world = World::new();
        let _ = place(&mut world, StructureKind::Cane, OPEN_GROUND);
        let events = place(
            &mut world,
            StructureKind::Cane,
            OPEN_GROUND + Vec2::new(30.0, 0.0),
        );
        assert!(matches!(
            events.as_slice(),
            [Event::StructurePlacementRejected {
                reason: PlacementError::Overlap,
                ..
            }]
        ));
    }

    #[test]
    fn unaffordable_placement_is_rejected() {
        let config = WorldConfig {
            starting_currency: 40,
            ..WorldConfig::default()
        };
        let mut world = World::from_config(&config).expect("valid config");
        let events = place(&mut world, StructureKind::Cane, OPEN_GROUND);
        assert!(matches!(
            events.as_slice(),
            [Event::StructurePlacementRejected {
                reason: PlacementError::InsufficientFunds,
                ..
            }]
        ));
        assert_eq!(query::stats(&world).currency, 40);
    }

    #[test]
    fn selling_refunds_half_of_investment() {
        let mut world = World::new();
        let _ = place(&mut world, StructureKind::Trap, OPEN_GROUND);
        let structure = StructureId::new(0);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PurchaseUpgrade {
                structure,
                path: UpgradePath::Secondary,
            },
            &mut events,
        );
        apply(&mut world, Command::SellStructure { structure }, &mut events);
        assert!(events.contains(&Event::StructureSold {
            structure,
            refund: 125,
        }));
        assert_eq!(query::stats(&world).currency, 300 - 150 - 100 + 125);
        assert!(query::structure(&world, structure).is_none());
    }

    #[test]
    fn start_wave_twice_toggles_speed() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::StartWave, &mut events);
        apply(&mut world, Command::StartWave, &mut events);
        assert_eq!(
            events,
            vec![
                Event::WaveStarted { wave: 1 },
                Event::SpeedChanged {
                    speed: GameSpeed::Fast
                },
            ]
        );
        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(100),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::TimeAdvanced {
                dt: Duration::from_millis(300)
            }]
        );
    }

    #[test]
    fn move_unit_never_decreases_waypoint_index() {
        let mut world = World::new();
        let unit = spawn(&mut world, UnitKind::Normal);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MoveUnit {
                unit,
                position: Vec2::new(256.0, 360.0),
                waypoint_index: 2,
                reached_end: false,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::MoveUnit {
                unit,
                position: Vec2::new(0.0, 0.0),
                waypoint_index: 1,
                reached_end: false,
            },
            &mut events,
        );
        let view = query::unit_view(&world);
        let snapshot = view.get(unit).expect("unit present");
        assert_eq!(snapshot.waypoint_index, 2);
        assert_eq!(snapshot.position, Vec2::new(256.0, 360.0));
    }

    #[test]
    fn escaped_units_ignore_late_damage() {
        let mut world = World::new();
        let unit = spawn(&mut world, UnitKind::Normal);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MoveUnit {
                unit,
                position: Vec2::new(1280.0, 288.0),
                waypoint_index: 8,
                reached_end: true,
            },
            &mut events,
        );
        world.damage_unit(unit, 500.0, &mut events);
        assert!(events.is_empty());
        apply(&mut world, Command::ResolveCasualties, &mut events);
        assert_eq!(events, vec![Event::UnitLeaked { unit, lives: 49 }]);
    }

    #[test]
    fn dead_units_are_killed_rather_than_leaked() {
        let mut world = World::new();
        let unit = spawn(&mut world, UnitKind::Normal);
        let mut events = Vec::new();
        world.damage_unit(unit, 99_999.0, &mut events);
        apply(
            &mut world,
            Command::MoveUnit {
                unit,
                position: Vec2::new(1280.0, 288.0),
                waypoint_index: 8,
                reached_end: true,
            },
            &mut events,
        );
        events.clear();
        apply(&mut world, Command::ResolveCasualties, &mut events);
        assert_eq!(
            events,
            vec![Event::UnitKilled {
                unit,
                kind: UnitKind::Normal,
                reward: 10,
            }]
        );
        assert_eq!(query::stats(&world).lives, 50);
    }

    #[test]
    fn boss_kill_wins_exactly_once() {
        let mut world = World::new();
        let boss = spawn(&mut world, UnitKind::Boss);
        let mut events = Vec::new();
        world.damage_unit(boss, 10_000.0, &mut events);
        events.clear();
        apply(&mut world, Command::ResolveCasualties, &mut events);
        assert_eq!(
            events,
            vec![
                Event::UnitKilled {
                    unit: boss,
                    kind: UnitKind::Boss,
                    reward: 1_000,
                },
                Event::GameWon,
            ]
        );
        assert_eq!(query::outcome(&world), Some(Outcome::Won));
        assert_eq!(query::stats(&world).currency, 1_300);
    }

    #[test]
    fn requests_after_outcome_are_rejected() {
        let config = WorldConfig {
            starting_lives: 1,
            ..WorldConfig::default()
        };
        let mut world = World::from_config(&config).expect("valid config");
        let unit = spawn(&mut world, UnitKind::Normal);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MoveUnit {
                unit,
                position: Vec2::new(1280.0, 288.0),
                waypoint_index: 8,
                reached_end: true,
            },
            &mut events,
        );
        apply(&mut world, Command::ResolveCasualties, &mut events);
        assert_eq!(events.last(), Some(&Event::GameLost));

        events.clear();
        let _ = place(&mut world, StructureKind::Cane, OPEN_GROUND);
        apply(&mut world, Command::StartWave, &mut events);
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(1),
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::stats(&world).currency, 300);
        assert!(query::stats(&world).game_over);
        assert_eq!(
            query::placement_error(&world, StructureKind::Cane, OPEN_GROUND),
            Some(PlacementError::SessionOver)
        );

        apply(
            &mut world,
            Command::ConfigurePlayArea {
                width: 640.0,
                height: 360.0,
            },
            &mut events,
        );
        assert_eq!(query::play_area(&world), Vec2::new(640.0, 360.0));
    }

    #[test]
    fn wave_completion_pays_once() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::StartWave, &mut events);
        apply(&mut world, Command::CompleteWave, &mut events);
        apply(&mut world, Command::CompleteWave, &mut events);
        let completions = events
            .iter()
            .filter(|event| matches!(event, Event::WaveCompleted { .. }))
            .count();
        assert_eq!(completions, 1);
        let stats = query::stats(&world);
        assert_eq!(stats.currency, 300 + 120);
        assert_eq!(stats.wave, 2);
        assert!(!stats.wave_active);
    }

    #[test]
    fn wave_completion_waits_for_empty_lane() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::StartWave, &mut events);
        let _ = spawn(&mut world, UnitKind::Normal);
        events.clear();
        apply(&mut world, Command::CompleteWave, &mut events);
        assert!(events.is_empty());
        assert!(query::stats(&world).wave_active);
    }

    #[test]
    fn resize_rescales_path() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigurePlayArea {
                width: 640.0,
                height: 360.0,
            },
            &mut events,
        );
        assert_eq!(
            query::path_view(&world).waypoint(1),
            Some(Vec2::new(128.0, 180.0))
        );
        assert_eq!(query::play_area(&world), Vec2::new(640.0, 360.0));
    }

    #[test]
    fn invalid_play_area_is_a_config_error() {
        let config = WorldConfig {
            width: f32::NAN,
            ..WorldConfig::default()
        };
        assert!(matches!(
            World::from_config(&config),
            Err(ConfigError::InvalidPlayArea { .. })
        ));
    }

    #[test]
    fn structure_at_uses_footprint() {
        let mut world = World::new();
        let _ = place(&mut world, StructureKind::Snowman, OPEN_GROUND);
        assert_eq!(
            query::structure_at(&world, OPEN_GROUND + Vec2::new(10.0, 10.0)),
            Some(StructureId::new(0))
        );
        assert_eq!(
            query::structure_at(&world, OPEN_GROUND + Vec2::new(25.0, 0.0)),
            None
        );
    }
}
