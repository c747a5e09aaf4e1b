#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use glam::Vec2;
use lane_defence_core::{StructureId, StructureRole, StructureView, TowerTarget, UnitId, UnitView};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    tower_workspace: Vec<TowerWorkspace>,
    unit_workspace: Vec<UnitCandidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes tower targets for the provided world snapshot.
    ///
    /// Each projectile-firing structure targets the first live unit, in spawn
    /// order, whose distance is within its range. Nearer units later in the
    /// order never win. Hazard deployers are skipped. The output buffer is
    /// cleared before populating it with the latest assignments.
    pub fn handle(
        &mut self,
        structures: &StructureView,
        units: &UnitView,
        out: &mut Vec<TowerTarget>,
    ) {
        out.clear();

        self.prepare_tower_workspace(structures);
        if self.tower_workspace.is_empty() {
            return;
        }

        self.prepare_unit_workspace(units);
        if self.unit_workspace.is_empty() {
            return;
        }

        for tower in &self.tower_workspace {
            let range_sq = tower.range * tower.range;
            let first = self.unit_workspace.iter().find(|candidate| {
                candidate.position.distance_squared(tower.position) <= range_sq
            });

            if let Some(candidate) = first {
                out.push(TowerTarget {
                    structure: tower.id,
                    unit: candidate.id,
                });
            }
        }
    }

    fn prepare_tower_workspace(&mut self, structures: &StructureView) {
        self.tower_workspace.clear();
        let (lower, _) = structures.iter().size_hint();
        self.tower_workspace.reserve(lower);

        for snapshot in structures.iter() {
            if snapshot.kind.role() == StructureRole::HazardDeployer {
                continue;
            }
            self.tower_workspace.push(TowerWorkspace {
                id: snapshot.id,
                position: snapshot.position,
                range: snapshot.range,
            });
        }
    }

    fn prepare_unit_workspace(&mut self, units: &UnitView) {
        self.unit_workspace.clear();
        self.unit_workspace.reserve(units.len());

        for snapshot in units.iter().filter(|snapshot| snapshot.is_alive()) {
            self.unit_workspace.push(UnitCandidate {
                id: snapshot.id,
                position: snapshot.position,
            });
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TowerWorkspace {
    id: StructureId,
    position: Vec2,
    range: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct UnitCandidate {
    id: UnitId,
    position: Vec2,
}
