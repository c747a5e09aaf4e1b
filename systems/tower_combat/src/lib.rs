#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits projectile firing commands from targeting data.

use lane_defence_core::{Command, StructureView, TowerTarget};

/// Tower combat system that queues firing commands for ready structures.
#[derive(Debug, Default)]
pub struct TowerCombat {
    scratch: Vec<Command>,
}

impl TowerCombat {
    /// Creates a new tower combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireProjectile` entries for structures ready to fire.
    ///
    /// Targets naming a structure that is missing from the view or still
    /// cooling down are skipped.
    pub fn handle(
        &mut self,
        structures: &StructureView,
        targets: &[TowerTarget],
        out: &mut Vec<Command>,
    ) {
        if targets.is_empty() {
            return;
        }

        self.scratch.clear();

        for target in targets {
            let Some(snapshot) = structures.get(target.structure) else {
                continue;
            };
            if snapshot.is_ready() {
                self.scratch.push(Command::FireProjectile {
                    structure: target.structure,
                    target: target.unit,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
