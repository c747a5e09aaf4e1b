#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod geometry;
mod waves;

pub use geometry::{PathView, Segment};
pub use waves::{BurstDirective, WaveScript};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lane Defence.";

/// Highest level any single upgrade path can reach.
pub const UPGRADE_LEVEL_CAP: u8 = 10;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resizes the play area and re-resolves the path against the new bounds.
    ConfigurePlayArea {
        /// Width of the play area measured in world units.
        width: f32,
        /// Height of the play area measured in world units.
        height: f32,
    },
    /// Advances the simulation clock by the provided real delta time.
    ///
    /// The world scales the delta by the active [`GameSpeed`] before
    /// broadcasting it.
    Tick {
        /// Real time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Starts the next wave, or toggles time acceleration while one is running.
    StartWave,
    /// Requests that a unit enter the path at its first waypoint.
    SpawnUnit {
        /// Kind of unit to create.
        kind: UnitKind,
        /// Wave-indexed multiplier applied to speed and maximum health.
        multiplier: f32,
    },
    /// Moves a unit along the path.
    MoveUnit {
        /// Identifier of the unit that moved.
        unit: UnitId,
        /// Position occupied after the move.
        position: Vec2,
        /// Index of the waypoint the unit is now heading towards.
        waypoint_index: usize,
        /// Whether the unit passed the final waypoint.
        reached_end: bool,
    },
    /// Requests placement of a structure at the provided position.
    PlaceStructure {
        /// Kind of structure to construct.
        kind: StructureKind,
        /// Centre of the structure footprint.
        position: Vec2,
    },
    /// Requests that a structure be sold for half of its invested currency.
    SellStructure {
        /// Identifier of the structure to sell.
        structure: StructureId,
    },
    /// Requests the next level on one of a structure's upgrade paths.
    PurchaseUpgrade {
        /// Identifier of the structure being upgraded.
        structure: StructureId,
        /// Upgrade path to advance.
        path: UpgradePath,
    },
    /// Requests that a ready structure launch a projectile at a unit.
    FireProjectile {
        /// Structure that fires.
        structure: StructureId,
        /// Unit the projectile homes in on.
        target: UnitId,
    },
    /// Requests that a ready hazard deployer drop a hazard at a position.
    DeployHazard {
        /// Structure that deploys the hazard.
        structure: StructureId,
        /// Resting position of the hazard.
        position: Vec2,
    },
    /// Moves an in-flight projectile.
    AdvanceProjectile {
        /// Identifier of the projectile.
        projectile: ProjectileId,
        /// Position reached this frame.
        position: Vec2,
    },
    /// Resolves a projectile hit against its target and removes the projectile.
    ImpactProjectile {
        /// Identifier of the projectile that reached its target.
        projectile: ProjectileId,
    },
    /// Removes a projectile whose target no longer exists.
    DiscardProjectile {
        /// Identifier of the projectile to discard.
        projectile: ProjectileId,
    },
    /// Updates the remaining lifetime of a hazard.
    AgeHazard {
        /// Identifier of the hazard.
        hazard: HazardId,
        /// Lifetime left after this frame.
        remaining: Duration,
    },
    /// Removes a hazard whose lifetime ran out unused.
    ExpireHazard {
        /// Identifier of the hazard.
        hazard: HazardId,
    },
    /// Fires a single-use hazard against a unit and removes the hazard.
    TriggerHazard {
        /// Identifier of the hazard that triggered.
        hazard: HazardId,
        /// Unit that stepped on the hazard.
        unit: UnitId,
    },
    /// Removes dead and escaped units, settling currency, lives and outcome.
    ResolveCasualties,
    /// Grants the wave reward and advances the wave counter.
    CompleteWave,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the play area was resized and the path re-resolved.
    PlayAreaConfigured {
        /// Width of the play area measured in world units.
        width: f32,
        /// Height of the play area measured in world units.
        height: f32,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Simulated time that elapsed, already scaled by the game speed.
        dt: Duration,
    },
    /// Announces that a wave began.
    WaveStarted {
        /// One-based number of the wave.
        wave: u32,
    },
    /// Announces that time acceleration was toggled.
    SpeedChanged {
        /// Speed that is now active.
        speed: GameSpeed,
    },
    /// Announces that the wave's directives are consumed and the lane is clear.
    WaveCompleted {
        /// Number of the wave that finished.
        wave: u32,
        /// Currency granted for finishing the wave.
        reward: u32,
    },
    /// Confirms that a unit entered the path.
    UnitSpawned {
        /// Identifier assigned to the unit.
        unit: UnitId,
        /// Kind of unit that spawned.
        kind: UnitKind,
    },
    /// Reports damage dealt to a unit.
    UnitDamaged {
        /// Identifier of the unit that was hit.
        unit: UnitId,
        /// Damage dealt.
        amount: f32,
        /// Health left after the hit; may be negative.
        health: f32,
    },
    /// Reports that a unit died and paid out its reward.
    UnitKilled {
        /// Identifier of the unit.
        unit: UnitId,
        /// Kind of unit that died.
        kind: UnitKind,
        /// Currency granted for the kill.
        reward: u32,
    },
    /// Reports that a unit passed the last waypoint and cost a life.
    UnitLeaked {
        /// Identifier of the unit.
        unit: UnitId,
        /// Lives left after the leak.
        lives: u32,
    },
    /// Confirms that a structure was placed into the world.
    StructurePlaced {
        /// Identifier assigned to the structure by the world.
        structure: StructureId,
        /// Kind of structure that was placed.
        kind: StructureKind,
        /// Centre of the structure footprint.
        position: Vec2,
    },
    /// Reports that a placement request was rejected.
    StructurePlacementRejected {
        /// Kind of structure requested for placement.
        kind: StructureKind,
        /// Position provided in the placement request.
        position: Vec2,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a structure was sold.
    StructureSold {
        /// Identifier of the sold structure.
        structure: StructureId,
        /// Currency refunded to the player.
        refund: u32,
    },
    /// Reports that a sale request was rejected.
    StructureSaleRejected {
        /// Identifier named in the request.
        structure: StructureId,
        /// Specific reason the sale failed.
        reason: SaleError,
    },
    /// Confirms that an upgrade was purchased.
    UpgradePurchased {
        /// Identifier of the upgraded structure.
        structure: StructureId,
        /// Path that advanced.
        path: UpgradePath,
        /// Level reached on the path.
        level: u8,
        /// Currency spent.
        cost: u32,
    },
    /// Reports that an upgrade request was rejected.
    UpgradeRejected {
        /// Identifier named in the request.
        structure: StructureId,
        /// Path named in the request.
        path: UpgradePath,
        /// Specific reason the purchase failed.
        reason: UpgradeError,
    },
    /// Confirms that a projectile was launched.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Structure that fired.
        structure: StructureId,
        /// Unit the projectile homes in on.
        target: UnitId,
    },
    /// Reports that a projectile lost its target and was discarded.
    ProjectileDiscarded {
        /// Identifier of the discarded projectile.
        projectile: ProjectileId,
    },
    /// Confirms that a hazard was deployed.
    HazardDeployed {
        /// Identifier assigned to the hazard.
        hazard: HazardId,
        /// Structure that deployed it.
        structure: StructureId,
        /// Resting position of the hazard.
        position: Vec2,
    },
    /// Reports that a hazard fired against a unit.
    HazardTriggered {
        /// Identifier of the hazard.
        hazard: HazardId,
        /// Unit that triggered it.
        unit: UnitId,
    },
    /// Reports that a hazard expired unused.
    HazardExpired {
        /// Identifier of the hazard.
        hazard: HazardId,
    },
    /// The boss fell; the session is won and frozen.
    GameWon,
    /// The life pool ran out; the session is lost and frozen.
    GameLost,
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(u32);

        impl $name {
            /// Creates a new identifier with the provided numeric value.
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Retrieves the numeric representation of the identifier.
            #[must_use]
            pub const fn get(&self) -> u32 {
                self.0
            }
        }
    };
}

entity_id!(
    /// Unique identifier assigned to a unit. Identifiers are never reused
    /// within a session, so a stale identifier can never alias a newer unit.
    UnitId
);
entity_id!(
    /// Unique identifier assigned to a structure.
    StructureId
);
entity_id!(
    /// Unique identifier assigned to a projectile.
    ProjectileId
);
entity_id!(
    /// Unique identifier assigned to a hazard.
    HazardId
);

/// Kinds of attacking units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Ordinary attacker.
    Normal,
    /// Final-wave boss; defeating it wins the session.
    Boss,
}

impl UnitKind {
    /// Movement speed in world units per second before wave scaling.
    #[must_use]
    pub const fn base_speed(self) -> f32 {
        match self {
            Self::Normal => 60.0,
            Self::Boss => 30.0,
        }
    }

    /// Maximum health before wave scaling.
    #[must_use]
    pub const fn base_health(self) -> f32 {
        match self {
            Self::Normal => 100.0,
            Self::Boss => 5_000.0,
        }
    }

    /// Collision radius in world units.
    #[must_use]
    pub const fn radius(self) -> f32 {
        match self {
            Self::Normal => 15.0,
            Self::Boss => 30.0,
        }
    }

    /// Currency granted when the unit dies.
    #[must_use]
    pub const fn reward(self) -> u32 {
        match self {
            Self::Normal => 10,
            Self::Boss => 1_000,
        }
    }

    /// Damage a hazard deals to this kind of unit.
    ///
    /// Ordinary units are killed outright; the boss loses a large chunk but
    /// survives.
    #[must_use]
    pub const fn hazard_damage(self) -> f32 {
        match self {
            Self::Normal => 99_999.0,
            Self::Boss => 500.0,
        }
    }
}

/// Behavioural role of a structure kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureRole {
    /// Fires homing projectiles at the first unit in range.
    DamageDealer,
    /// Drops single-use hazards onto nearby path segments.
    HazardDeployer,
    /// Fires slower, harder-hitting projectiles from far away.
    LongRange,
}

/// Types of structures that can be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// Cheap damage dealer.
    Cane,
    /// Hazard deployer that seeds the path with traps.
    Trap,
    /// Long-range damage dealer.
    Snowman,
}

impl StructureKind {
    /// Every placeable structure kind.
    pub const ALL: [StructureKind; 3] = [Self::Cane, Self::Trap, Self::Snowman];

    /// Behaviour the structure exhibits each frame.
    #[must_use]
    pub const fn role(self) -> StructureRole {
        match self {
            Self::Cane => StructureRole::DamageDealer,
            Self::Trap => StructureRole::HazardDeployer,
            Self::Snowman => StructureRole::LongRange,
        }
    }

    /// Currency required to place the structure.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Cane => 50,
            Self::Trap => 150,
            Self::Snowman => 100,
        }
    }

    /// Targeting or deployment range before upgrades.
    #[must_use]
    pub const fn base_range(self) -> f32 {
        match self {
            Self::Cane => 150.0,
            Self::Trap => 100.0,
            Self::Snowman => 250.0,
        }
    }

    /// Projectile damage before upgrades.
    #[must_use]
    pub const fn base_damage(self) -> f32 {
        match self {
            Self::Cane => 20.0,
            Self::Trap => 0.0,
            Self::Snowman => 40.0,
        }
    }

    /// Actions per second before upgrades.
    #[must_use]
    pub const fn base_fire_rate(self) -> f32 {
        match self {
            Self::Cane => 1.0,
            Self::Trap => 0.2,
            Self::Snowman => 0.5,
        }
    }

    /// Number of live hazards the structure may keep on the path.
    ///
    /// Zero for every kind that does not deploy hazards.
    #[must_use]
    pub const fn base_hazard_capacity(self) -> u32 {
        match self {
            Self::Trap => 3,
            Self::Cane | Self::Snowman => 0,
        }
    }

    /// Radius of the circular footprint used for selection and overlap checks.
    #[must_use]
    pub const fn footprint_radius(self) -> f32 {
        25.0
    }

    /// Per-level cost unit of an upgrade path.
    ///
    /// The purchase price for the next level is this unit multiplied by the
    /// level about to be reached.
    #[must_use]
    pub const fn upgrade_unit_cost(self, path: UpgradePath) -> u32 {
        match (self, path) {
            (Self::Cane, _) => 50,
            (Self::Trap, UpgradePath::Secondary) => 100,
            (Self::Trap, _) => 50,
            (Self::Snowman, _) => 100,
        }
    }
}

/// One of the three independent upgrade paths every structure offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradePath {
    /// Path 0: multiplies the fire rate.
    FireRate,
    /// Path 1: multiplies damage, or adds hazard capacity for deployers.
    Secondary,
    /// Path 2: multiplies range.
    Range,
}

impl UpgradePath {
    /// All paths in index order.
    pub const ALL: [UpgradePath; 3] = [Self::FireRate, Self::Secondary, Self::Range];

    /// Resolves the zero-based path index used by the UI.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::FireRate),
            1 => Some(Self::Secondary),
            2 => Some(Self::Range),
            _ => None,
        }
    }

    /// Zero-based index of the path.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::FireRate => 0,
            Self::Secondary => 1,
            Self::Range => 2,
        }
    }

    /// Multiplicative growth applied to the path's stat per purchased level.
    #[must_use]
    pub const fn growth_factor(self) -> f32 {
        match self {
            Self::FireRate | Self::Secondary => 1.2,
            Self::Range => 1.15,
        }
    }
}

/// Time-acceleration setting of the simulation loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameSpeed {
    /// Real time.
    #[default]
    Normal,
    /// Three times real time.
    Fast,
}

impl GameSpeed {
    /// Multiplier applied to the elapsed time of each tick.
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::Fast => 3.0,
        }
    }

    /// Returns the other speed setting.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Fast,
            Self::Fast => Self::Normal,
        }
    }
}

/// Effect carried by a projectile in addition to its damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectilePayload {
    /// Plain damage.
    #[default]
    None,
    /// Reserved for slowing shots; currently behaves like [`ProjectilePayload::None`].
    Slowing,
}

/// Terminal state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The boss was defeated.
    Won,
    /// The life pool was exhausted.
    Lost,
}

/// Immutable representation of a single unit's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitSnapshot {
    /// Unique identifier assigned to the unit.
    pub id: UnitId,
    /// Kind of unit.
    pub kind: UnitKind,
    /// Current position in world units.
    pub position: Vec2,
    /// Collision radius.
    pub radius: f32,
    /// Current health; may be negative after an overkill hit.
    pub health: f32,
    /// Health the unit spawned with.
    pub max_health: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Multiplier applied to speed; 1.0 unless an effect slows the unit.
    pub slow_factor: f32,
    /// Index of the waypoint the unit is heading towards.
    pub waypoint_index: usize,
    /// Whether the unit passed the final waypoint this frame.
    pub reached_end: bool,
}

impl UnitSnapshot {
    /// Fraction of health remaining, clamped to `0.0..=1.0` for presentation.
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Reports whether the unit can still be targeted or damaged.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0 && !self.reached_end
    }
}

/// Read-only snapshot describing all units on the path.
#[derive(Clone, Debug, Default)]
pub struct UnitView {
    snapshots: Vec<UnitSnapshot>,
}

impl UnitView {
    /// Creates a new unit view from the provided snapshots.
    ///
    /// Snapshots are ordered by identifier, which matches spawn order.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<UnitSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured unit snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a unit by identifier.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&UnitSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of units captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<UnitSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single structure's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StructureSnapshot {
    /// Identifier allocated to the structure by the world.
    pub id: StructureId,
    /// Kind of structure.
    pub kind: StructureKind,
    /// Centre of the footprint.
    pub position: Vec2,
    /// Footprint radius.
    pub radius: f32,
    /// Current targeting or deployment range.
    pub range: f32,
    /// Current projectile damage.
    pub damage: f32,
    /// Current actions per second.
    pub fire_rate: f32,
    /// Time left before the structure may act again.
    pub ready_in: Duration,
    /// Hazards deployed by this structure that are still on the path.
    pub live_hazards: usize,
    /// Maximum number of live hazards.
    pub hazard_capacity: u32,
    /// Purchased level per upgrade path, indexed by [`UpgradePath::index`].
    pub levels: [u8; 3],
    /// Path the structure specialised into with its first upgrade.
    pub committed_path: Option<UpgradePath>,
    /// Base cost plus every upgrade cost paid.
    pub invested: u32,
}

impl StructureSnapshot {
    /// Reports whether the cooldown has elapsed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready_in.is_zero()
    }

    /// Currency refunded when the structure is sold.
    #[must_use]
    pub const fn sell_value(&self) -> u32 {
        self.invested / 2
    }

    /// Reports whether another hazard may be deployed.
    #[must_use]
    pub fn has_hazard_capacity(&self) -> bool {
        (self.live_hazards as u64) < u64::from(self.hazard_capacity)
    }
}

/// Read-only snapshot describing all placed structures.
#[derive(Clone, Debug, Default)]
pub struct StructureView {
    snapshots: Vec<StructureSnapshot>,
}

impl StructureView {
    /// Creates a new structure view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<StructureSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured structure snapshots in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &StructureSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a structure by identifier.
    #[must_use]
    pub fn get(&self, id: StructureId) -> Option<&StructureSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<StructureSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of an in-flight projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Current position.
    pub position: Vec2,
    /// Unit the projectile homes in on. The projectile never keeps it alive.
    pub target: UnitId,
    /// Damage dealt on impact.
    pub damage: f32,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Extra effect carried by the projectile.
    pub payload: ProjectilePayload,
}

/// Read-only snapshot describing all in-flight projectiles.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectiles in launch order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a stationary hazard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HazardSnapshot {
    /// Identifier allocated to the hazard.
    pub id: HazardId,
    /// Structure that deployed the hazard.
    pub owner: StructureId,
    /// Resting position.
    pub position: Vec2,
    /// Trigger radius.
    pub radius: f32,
    /// Lifetime left before the hazard expires unused.
    pub remaining: Duration,
}

/// Read-only snapshot describing all live hazards.
#[derive(Clone, Debug, Default)]
pub struct HazardView {
    snapshots: Vec<HazardSnapshot>,
}

impl HazardView {
    /// Creates a new hazard view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<HazardSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured hazards in deployment order.
    pub fn iter(&self) -> impl Iterator<Item = &HazardSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<HazardSnapshot> {
        self.snapshots
    }
}

/// Target assignment computed for a firing structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerTarget {
    /// Structure that would fire.
    pub structure: StructureId,
    /// Unit selected as the target.
    pub unit: UnitId,
}

/// Upgrade menu entry describing the next purchase on one path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpgradeOffer {
    /// Path described by the entry.
    pub path: UpgradePath,
    /// Level already purchased.
    pub level: u8,
    /// Price of the next level.
    pub cost: u32,
    /// Whether the structure committed to a different path.
    pub locked: bool,
    /// Whether the path reached [`UPGRADE_LEVEL_CAP`].
    pub maxed: bool,
}

impl UpgradeOffer {
    /// Reports whether the entry can be bought given enough currency.
    #[must_use]
    pub const fn available(&self) -> bool {
        !self.locked && !self.maxed
    }
}

/// Read-only economy and progression figures for a UI layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameStats {
    /// Number of the next or currently running wave.
    pub wave: u32,
    /// Currency balance.
    pub currency: u32,
    /// Lives left.
    pub lives: u32,
    /// Whether a wave is currently running.
    pub wave_active: bool,
    /// Multiplier applied to elapsed time.
    pub speed_multiplier: f32,
    /// Whether the session was lost.
    pub game_over: bool,
    /// Whether the session was won.
    pub game_won: bool,
}

/// Source of uniformly distributed random numbers.
///
/// Hazard placement draws from this seam so tests can supply deterministic
/// sequences.
pub trait RandomSource {
    /// Returns a value in `[0.0, 1.0)`.
    fn next_unit(&mut self) -> f32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Reasons a structure placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The session already ended.
    #[error("the session has ended")]
    SessionOver,
    /// The balance does not cover the structure's cost.
    #[error("not enough currency")]
    InsufficientFunds,
    /// The footprint would intrude on the path corridor.
    #[error("too close to the path")]
    PathClearance,
    /// The footprint would overlap an existing structure.
    #[error("overlaps an existing structure")]
    Overlap,
    /// The requested position is not a finite point.
    #[error("position is not a finite point")]
    InvalidPosition,
}

/// Reasons a sale request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum SaleError {
    /// The session already ended.
    #[error("the session has ended")]
    SessionOver,
    /// No structure with the provided identifier exists.
    #[error("no such structure")]
    MissingStructure,
}

/// Reasons an upgrade purchase may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum UpgradeError {
    /// The session already ended.
    #[error("the session has ended")]
    SessionOver,
    /// No structure with the provided identifier exists.
    #[error("no such structure")]
    MissingStructure,
    /// The path index does not name one of the three upgrade paths.
    #[error("no such upgrade path")]
    UnknownPath,
    /// The structure is committed to a different path.
    #[error("structure is committed to another upgrade path")]
    PathLocked,
    /// The path already reached the level cap.
    #[error("upgrade path is maxed out")]
    MaxLevel,
    /// The balance does not cover the upgrade's cost.
    #[error("not enough currency")]
    InsufficientFunds,
}

/// Errors raised while validating static configuration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A path needs at least two waypoints.
    #[error("path needs at least two waypoints, got {count}")]
    TooFewWaypoints {
        /// Number of waypoints supplied.
        count: usize,
    },
    /// A waypoint coordinate is NaN or infinite.
    #[error("waypoint {index} is not a finite point")]
    NonFiniteWaypoint {
        /// Position of the offending waypoint.
        index: usize,
    },
    /// The play area must have finite, positive dimensions.
    #[error("play area {width}x{height} is not a finite positive size")]
    InvalidPlayArea {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
    /// At least one wave script is required.
    #[error("at least one wave script is required")]
    NoWaveScripts,
    /// A directive carries a negative or non-finite duration.
    #[error("wave {wave} directive {directive} has an invalid duration")]
    InvalidDirective {
        /// One-based wave number.
        wave: usize,
        /// Zero-based directive index.
        directive: usize,
    },
}

/// Converts a non-negative number of seconds into a [`Duration`].
///
/// Negative, NaN, or overflowing inputs collapse to zero.
#[must_use]
pub fn seconds(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}
