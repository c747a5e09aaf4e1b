#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks resting spots for hazards dropped by trap-class structures.
//!
//! A ready deployer with spare capacity looks at every path segment whose
//! closest point lies within its range, picks one uniformly, and emits a
//! [`Command::DeployHazard`] near that closest point. Randomness flows through
//! the [`RandomSource`] seam; each placement consumes exactly three draws in
//! a fixed order (segment, along-path spread, perpendicular jitter).

use glam::Vec2;
use lane_defence_core::{
    Command, PathView, RandomSource, Segment, StructureRole, StructureSnapshot, StructureView,
};

/// Maximum shift along the chosen segment, in world units either way.
pub const ALONG_SPREAD: f32 = 40.0;

/// Maximum sideways jitter off the path centre line, in world units either way.
pub const PERPENDICULAR_JITTER: f32 = 6.0;

/// Hazard placement system with a reusable buffer of candidate segments.
#[derive(Debug, Default)]
pub struct HazardPlacement {
    candidates: Vec<Segment>,
}

impl HazardPlacement {
    /// Creates the system with an empty candidate buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one [`Command::DeployHazard`] for each hazard deployer that may act.
    ///
    /// Deployers that are cooling down, at capacity, or out of reach of every
    /// segment emit nothing and consume no random draws.
    pub fn handle<R: RandomSource + ?Sized>(
        &mut self,
        structures: &StructureView,
        path: PathView<'_>,
        random: &mut R,
        out: &mut Vec<Command>,
    ) {
        for structure in structures.iter() {
            if !is_deployable(structure) {
                continue;
            }
            if let Some(position) = self.choose_position(structure, path, random) {
                out.push(Command::DeployHazard {
                    structure: structure.id,
                    position,
                });
            }
        }
    }

    fn choose_position<R: RandomSource + ?Sized>(
        &mut self,
        structure: &StructureSnapshot,
        path: PathView<'_>,
        random: &mut R,
    ) -> Option<Vec2> {
        self.candidates.clear();
        self.candidates.extend(
            path.segments()
                .filter(|segment| segment.distance_to(structure.position) <= structure.range),
        );
        if self.candidates.is_empty() {
            return None;
        }

        let count = self.candidates.len();
        let index = ((unit_draw(random) * count as f32) as usize).min(count - 1);
        let segment = self.candidates[index];

        let mut t = segment.projection(structure.position);
        let spread = signed_draw(random) * ALONG_SPREAD;
        let length = segment.length();
        if length > 0.0 {
            t += spread / length;
        }

        let jitter = signed_draw(random) * PERPENDICULAR_JITTER;
        let sideways = segment
            .direction()
            .map_or(Vec2::ZERO, |direction| direction.perp() * jitter);

        Some(segment.point_at(t) + sideways)
    }
}

fn is_deployable(structure: &StructureSnapshot) -> bool {
    structure.kind.role() == StructureRole::HazardDeployer
        && structure.is_ready()
        && structure.has_hazard_capacity()
}

/// Draw clamped into `[0, 1]` so a misbehaving source cannot escape the bounds.
fn unit_draw<R: RandomSource + ?Sized>(random: &mut R) -> f32 {
    let value = random.next_unit();
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn signed_draw<R: RandomSource + ?Sized>(random: &mut R) -> f32 {
    unit_draw(random) * 2.0 - 1.0
}
