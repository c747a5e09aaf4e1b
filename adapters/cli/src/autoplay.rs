//! Scripted player that builds defences between waves and plays them out.

use std::{fmt, time::Duration};

use glam::Vec2;
use lane_defence_core::{Event, GameStats, Outcome, StructureKind, StructureRole, UpgradePath};
use lane_defence_session::Session;
use lane_defence_world::query;

/// Kinds built in rotation while currency allows.
const BUILD_ORDER: [StructureKind; 4] = [
    StructureKind::Cane,
    StructureKind::Cane,
    StructureKind::Snowman,
    StructureKind::Trap,
];

/// Spacing of the grid searched for build spots.
const SPOT_SPACING: f32 = 50.0;

/// Build spots sit this far from the path centre line, inclusive.
const SPOT_BAND: (f32, f32) = (70.0, 110.0);

/// Simulated time after which a wave is abandoned.
const WAVE_TIME_LIMIT: Duration = Duration::from_secs(15 * 60);

/// Final figures printed after a run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Summary {
    pub(crate) waves_played: u32,
    pub(crate) outcome: Option<Outcome>,
    pub(crate) stats: GameStats,
    pub(crate) kills: u32,
    pub(crate) leaks: u32,
    pub(crate) structures: usize,
    pub(crate) upgrades: u32,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.outcome {
            Some(Outcome::Won) => "won",
            Some(Outcome::Lost) => "lost",
            None => "in progress",
        };
        writeln!(f, "waves played: {}", self.waves_played)?;
        writeln!(f, "outcome:      {outcome}")?;
        writeln!(
            f,
            "next wave:    {}  currency: {}  lives: {}",
            self.stats.wave, self.stats.currency, self.stats.lives
        )?;
        writeln!(f, "kills:        {}  leaks: {}", self.kills, self.leaks)?;
        write!(
            f,
            "structures:   {}  upgrades: {}",
            self.structures, self.upgrades
        )
    }
}

/// Greedy player: spends everything on structures, then on upgrades.
#[derive(Debug)]
pub(crate) struct Autoplay {
    frame: Duration,
    fast: bool,
    spots: Vec<Vec2>,
    next_kind: usize,
    kills: u32,
    leaks: u32,
    upgrades: u32,
}

impl Autoplay {
    pub(crate) fn new(frame: Duration, fast: bool) -> Self {
        Self {
            frame,
            fast,
            spots: Vec::new(),
            next_kind: 0,
            kills: 0,
            leaks: 0,
            upgrades: 0,
        }
    }

    /// Plays up to `waves` waves, stopping early once the session ends.
    pub(crate) fn play(&mut self, session: &mut Session, waves: u32) -> Summary {
        self.spots = build_spots(session);
        log::debug!("found {} build spots", self.spots.len());

        let mut waves_played = 0;
        for _ in 0..waves {
            if session.outcome().is_some() {
                break;
            }
            self.invest(session);
            if !self.play_wave(session) {
                break;
            }
            waves_played += 1;
        }

        Summary {
            waves_played,
            outcome: session.outcome(),
            stats: session.stats(),
            kills: self.kills,
            leaks: self.leaks,
            structures: query::structure_view(session.world()).iter().count(),
            upgrades: self.upgrades,
        }
    }

    fn invest(&mut self, session: &mut Session) {
        loop {
            let kind = BUILD_ORDER[self.next_kind % BUILD_ORDER.len()];
            if session.stats().currency >= kind.cost() && self.build(session, kind) {
                self.next_kind += 1;
                continue;
            }
            if self.upgrade(session) {
                continue;
            }
            break;
        }
    }

    fn build(&self, session: &mut Session, kind: StructureKind) -> bool {
        session.begin_placement(kind);
        for spot in &self.spots {
            let placeable = session
                .placement_preview(*spot)
                .is_some_and(|preview| preview.placeable());
            if placeable {
                if let Some(structure) = session.place_structure_at(*spot) {
                    log::debug!("built {kind:?} as {structure:?} at {spot}");
                    return true;
                }
            }
        }
        session.cancel_placement();
        false
    }

    fn upgrade(&mut self, session: &mut Session) -> bool {
        let currency = session.stats().currency;
        let structures = query::structure_view(session.world()).into_vec();
        for structure in structures {
            let path = structure
                .committed_path
                .unwrap_or(match structure.kind.role() {
                    StructureRole::HazardDeployer => UpgradePath::Secondary,
                    _ => UpgradePath::FireRate,
                });
            let affordable = session
                .upgrade_offers(structure.id)
                .map(|offers| offers[path.index()])
                .is_some_and(|offer| offer.available() && offer.cost <= currency);
            if affordable && session.purchase_upgrade(structure.id, path.index()).is_ok() {
                self.upgrades += 1;
                return true;
            }
        }
        false
    }

    /// Runs one wave to completion; returns `false` when it had to be abandoned.
    fn play_wave(&mut self, session: &mut Session) -> bool {
        let wave = session.stats().wave;
        session.start_wave();
        if self.fast {
            session.start_wave();
        }

        let mut elapsed = Duration::ZERO;
        while session.stats().wave_active && session.outcome().is_none() {
            if elapsed >= WAVE_TIME_LIMIT {
                log::warn!("wave {wave} still running after {WAVE_TIME_LIMIT:?}; giving up");
                return false;
            }
            session.tick(self.frame);
            elapsed += self.frame;
        }

        let (mut kills, mut leaks) = (0, 0);
        for event in session.drain_events() {
            match event {
                Event::UnitKilled { .. } => kills += 1,
                Event::UnitLeaked { .. } => leaks += 1,
                _ => {}
            }
        }
        self.kills += kills;
        self.leaks += leaks;
        log::info!("wave {wave}: {kills} kills, {leaks} leaks");
        true
    }
}

/// Grid points near enough to the path for a structure to reach it.
fn build_spots(session: &Session) -> Vec<Vec2> {
    let world = session.world();
    let area = query::play_area(world);
    let path = query::path_view(world);
    let (near, far) = SPOT_BAND;

    let columns = (area.x / SPOT_SPACING) as u32;
    let rows = (area.y / SPOT_SPACING) as u32;
    let mut spots = Vec::new();
    for column in 1..columns {
        for row in 1..rows {
            let spot = Vec2::new(column as f32, row as f32) * SPOT_SPACING;
            let distance = path.distance_to(spot);
            if (near..=far).contains(&distance) {
                spots.push(spot);
            }
        }
    }
    spots
}
