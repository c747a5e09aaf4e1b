#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session driver that owns one game and advances it frame by frame.
//!
//! Each [`Session::tick`] runs a fixed five-stage pipeline against the
//! authoritative world:
//!
//! 1. the wave scheduler spawns units,
//! 2. units walk the path,
//! 3. structures pick targets, fire projectiles and deploy hazards,
//! 4. projectiles and hazards resolve,
//! 5. casualties are settled and wave completion is checked.
//!
//! Player requests (`start_wave`, placement, selling, upgrades) go through the
//! same world entry point, and every resulting [`Event`] is buffered until the
//! host calls [`Session::drain_events`].

mod config;
mod random;
mod render;

use std::{ops::Range, time::Duration};

use glam::Vec2;
use lane_defence_core::{
    Command, ConfigError, Event, GameStats, Outcome, RandomSource, SaleError, StructureId,
    StructureKind, TowerTarget, UpgradeError, UpgradeOffer, UpgradePath,
};
use lane_defence_system_builder::{Builder, BuilderInput, PlacementPreview};
use lane_defence_system_hazard_placement::HazardPlacement;
use lane_defence_system_movement::Movement;
use lane_defence_system_ordnance::Ordnance;
use lane_defence_system_spawning::Spawning;
use lane_defence_system_tower_combat::TowerCombat;
use lane_defence_system_tower_targeting::TowerTargeting;
use lane_defence_world::{self as world, query, World};

pub use config::{SessionConfig, DEFAULT_SEED};
pub use random::SeededRandom;
pub use render::{RenderState, StructureSprite, UnitSprite};

/// One running game: the world plus every system that drives it.
#[derive(Debug)]
pub struct Session<R = SeededRandom> {
    world: World,
    spawning: Spawning,
    movement: Movement,
    targeting: TowerTargeting,
    combat: TowerCombat,
    hazard_placement: HazardPlacement,
    ordnance: Ordnance,
    builder: Builder,
    random: R,
    selected: Option<StructureId>,
    commands: Vec<Command>,
    targets: Vec<TowerTarget>,
    events: Vec<Event>,
}

impl Session<SeededRandom> {
    /// Builds a session whose hazard placement draws from a generator seeded by `config.seed`.
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        Self::with_random(config, SeededRandom::new(config.seed))
    }
}

impl<R: RandomSource> Session<R> {
    /// Builds a session drawing hazard placement randomness from `random`.
    pub fn with_random(config: &SessionConfig, random: R) -> Result<Self, ConfigError> {
        let world = World::from_config(&config.world_config())?;
        let spawning = Spawning::new(config.spawning_config()?);
        log::info!(
            "session ready: {}x{} play area, seed {}",
            config.width,
            config.height,
            config.seed
        );
        Ok(Self {
            world,
            spawning,
            movement: Movement::new(),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            hazard_placement: HazardPlacement::new(),
            ordnance: Ordnance::new(),
            builder: Builder::new(),
            random,
            selected: None,
            commands: Vec::new(),
            targets: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Advances the game by `dt` of real time.
    ///
    /// The world scales `dt` by the active game speed. Nothing happens once the
    /// session reached an outcome.
    pub fn tick(&mut self, dt: Duration) {
        if query::is_over(&self.world) {
            return;
        }

        self.commands.push(Command::Tick { dt });
        let clock = self.flush();

        self.spawning.handle(&self.events[clock.clone()], &mut self.commands);
        let _ = self.flush();

        let units = query::unit_view(&self.world);
        self.movement.handle(
            &self.events[clock.clone()],
            &units,
            query::path_view(&self.world),
            &mut self.commands,
        );
        let _ = self.flush();

        let structures = query::structure_view(&self.world);
        let units = query::unit_view(&self.world);
        self.targeting.handle(&structures, &units, &mut self.targets);
        self.combat.handle(&structures, &self.targets, &mut self.commands);
        self.hazard_placement.handle(
            &structures,
            query::path_view(&self.world),
            &mut self.random,
            &mut self.commands,
        );
        let _ = self.flush();

        self.ordnance.handle(
            &self.events[clock],
            &query::projectile_view(&self.world),
            &query::hazard_view(&self.world),
            &query::unit_view(&self.world),
            &mut self.commands,
        );
        let _ = self.flush();

        self.commands.push(Command::ResolveCasualties);
        let cleanup = self.flush();
        self.spawning.handle(&self.events[cleanup.clone()], &mut self.commands);
        self.spawning
            .reconcile(query::live_unit_count(&self.world), &mut self.commands);
        let completion = self.flush();
        self.observe(cleanup.start..completion.end);
    }

    /// Starts the next wave, or toggles time acceleration while one runs.
    pub fn start_wave(&mut self) {
        self.commands.push(Command::StartWave);
        let range = self.flush();
        self.spawning.handle(&self.events[range], &mut self.commands);
        let _ = self.flush();
    }

    /// Stages `kind` for the next [`Session::place_structure_at`] call.
    pub fn begin_placement(&mut self, kind: StructureKind) {
        self.builder.begin_placement(kind);
    }

    /// Drops the staged structure kind.
    pub fn cancel_placement(&mut self) {
        self.builder.cancel();
    }

    /// Kind currently staged for placement.
    #[must_use]
    pub fn pending_placement(&self) -> Option<StructureKind> {
        self.builder.pending()
    }

    /// Previews the staged kind at `cursor`, including why placement would fail.
    #[must_use]
    pub fn placement_preview(&self, cursor: Vec2) -> Option<PlacementPreview> {
        let world = &self.world;
        self.builder
            .preview(cursor, |kind, spot| query::placement_error(world, kind, spot))
    }

    /// Places the staged kind at `position`.
    ///
    /// Returns the new structure, or `None` when nothing is staged or the spot
    /// is rejected. A rejected attempt keeps the kind staged.
    pub fn place_structure_at(&mut self, position: Vec2) -> Option<StructureId> {
        let world = &self.world;
        self.builder.handle(
            &[],
            BuilderInput::confirm_at(position),
            |kind, spot| query::placement_error(world, kind, spot),
            &mut self.commands,
        );
        let range = self.flush();
        self.builder.handle(
            &self.events[range.clone()],
            BuilderInput::default(),
            |_, _| None,
            &mut self.commands,
        );
        self.events[range].iter().find_map(|event| match event {
            Event::StructurePlaced { structure, .. } => Some(*structure),
            _ => None,
        })
    }

    /// Selects the structure whose footprint contains `point`, clearing the
    /// selection when there is none.
    pub fn select_structure_at(&mut self, point: Vec2) -> Option<StructureId> {
        self.selected = query::structure_at(&self.world, point);
        self.selected
    }

    /// Currently selected structure.
    #[must_use]
    pub fn selected_structure(&self) -> Option<StructureId> {
        self.selected
    }

    /// Sells `structure`, returning the refund.
    pub fn sell_structure(&mut self, structure: StructureId) -> Result<u32, SaleError> {
        self.commands.push(Command::SellStructure { structure });
        let range = self.flush();
        self.observe(range.clone());
        self.events[range]
            .iter()
            .find_map(|event| match event {
                Event::StructureSold { refund, .. } => Some(Ok(*refund)),
                Event::StructureSaleRejected { reason, .. } => Some(Err(*reason)),
                _ => None,
            })
            .unwrap_or(Err(SaleError::MissingStructure))
    }

    /// Buys the next level on upgrade path `path_index` (0, 1 or 2), returning the level reached.
    pub fn purchase_upgrade(
        &mut self,
        structure: StructureId,
        path_index: usize,
    ) -> Result<u8, UpgradeError> {
        let path = UpgradePath::from_index(path_index).ok_or(UpgradeError::UnknownPath)?;
        self.commands.push(Command::PurchaseUpgrade { structure, path });
        let range = self.flush();
        self.events[range]
            .iter()
            .find_map(|event| match event {
                Event::UpgradePurchased { level, .. } => Some(Ok(*level)),
                Event::UpgradeRejected { reason, .. } => Some(Err(*reason)),
                _ => None,
            })
            .unwrap_or(Err(UpgradeError::MissingStructure))
    }

    /// Resizes the play area and re-resolves the path.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        self.commands.push(Command::ConfigurePlayArea { width, height });
        let range = self.flush();
        let applied = self.events[range]
            .iter()
            .any(|event| matches!(event, Event::PlayAreaConfigured { .. }));
        if applied {
            Ok(())
        } else {
            Err(ConfigError::InvalidPlayArea { width, height })
        }
    }

    /// Economy and progression figures.
    #[must_use]
    pub fn stats(&self) -> GameStats {
        query::stats(&self.world)
    }

    /// Terminal outcome, once reached.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        query::outcome(&self.world)
    }

    /// Upgrade menu for `structure`, one entry per path.
    #[must_use]
    pub fn upgrade_offers(&self, structure: StructureId) -> Option<[UpgradeOffer; 3]> {
        query::upgrade_offers(&self.world, structure)
    }

    /// Describes the current frame for a renderer.
    #[must_use]
    pub fn render_state(&self) -> RenderState {
        let world = &self.world;
        RenderState {
            play_area: query::play_area(world),
            path: query::path_view(world).waypoints().to_vec(),
            units: query::unit_view(world)
                .iter()
                .map(|unit| UnitSprite {
                    kind: unit.kind,
                    position: unit.position,
                    radius: unit.radius,
                    health_fraction: unit.health_fraction(),
                })
                .collect(),
            structures: query::structure_view(world)
                .iter()
                .map(|structure| StructureSprite {
                    id: structure.id,
                    kind: structure.kind,
                    position: structure.position,
                    radius: structure.radius,
                    range: structure.range,
                    selected: self.selected == Some(structure.id),
                })
                .collect(),
            projectiles: query::projectile_view(world)
                .iter()
                .map(|projectile| projectile.position)
                .collect(),
            hazards: query::hazard_view(world)
                .iter()
                .map(|hazard| hazard.position)
                .collect(),
        }
    }

    /// Hands over every event buffered since the previous call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Applies pending commands, returning the range of events they produced.
    fn flush(&mut self) -> Range<usize> {
        let start = self.events.len();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
        start..self.events.len()
    }

    fn observe(&mut self, range: Range<usize>) {
        for event in &self.events[range.clone()] {
            if let Event::StructureSold { structure, .. } = event {
                if self.selected == Some(*structure) {
                    self.selected = None;
                }
            }
        }
        self.builder.handle(
            &self.events[range],
            BuilderInput::default(),
            |_, _| None,
            &mut self.commands,
        );
    }
}
