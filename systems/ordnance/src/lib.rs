#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system resolving in-flight projectiles and waiting hazards.
//!
//! Projectiles home in on their target's current position and hit once the
//! remaining distance fits in the frame's travel budget. Hazards age, expire
//! unused, or trigger on the first live unit that steps inside their radius.
//! Projectiles resolve before hazards, so a unit killed by a projectile this
//! frame no longer springs a hazard.

use std::time::Duration;

use glam::Vec2;
use lane_defence_core::{
    Command, Event, HazardSnapshot, HazardView, ProjectileSnapshot, ProjectileView, UnitId,
    UnitKind, UnitView,
};

/// Ordnance system with a scratch copy of unit health for in-frame bookkeeping.
#[derive(Debug, Default)]
pub struct Ordnance {
    units: Vec<TrackedUnit>,
}

#[derive(Clone, Copy, Debug)]
struct TrackedUnit {
    id: UnitId,
    kind: UnitKind,
    position: Vec2,
    radius: f32,
    health: f32,
    reached_end: bool,
}

impl TrackedUnit {
    fn is_alive(&self) -> bool {
        self.health > 0.0 && !self.reached_end
    }
}

impl Ordnance {
    /// Creates the system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the frame's [`Event::TimeAdvanced`] and emits projectile and hazard commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        projectiles: &ProjectileView,
        hazards: &HazardView,
        units: &UnitView,
        out: &mut Vec<Command>,
    ) {
        let mut elapsed = None;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                elapsed = Some(elapsed.unwrap_or(Duration::ZERO).saturating_add(*dt));
            }
        }
        let Some(dt) = elapsed else {
            return;
        };

        self.units.clear();
        self.units.extend(units.iter().map(|unit| TrackedUnit {
            id: unit.id,
            kind: unit.kind,
            position: unit.position,
            radius: unit.radius,
            health: unit.health,
            reached_end: unit.reached_end,
        }));

        for projectile in projectiles.iter() {
            out.push(self.resolve_projectile(projectile, dt));
        }
        for hazard in hazards.iter() {
            out.push(self.resolve_hazard(hazard, dt));
        }
    }

    fn tracked_mut(&mut self, id: UnitId) -> Option<&mut TrackedUnit> {
        self.units
            .binary_search_by_key(&id, |unit| unit.id)
            .ok()
            .map(|index| &mut self.units[index])
    }

    fn resolve_projectile(&mut self, projectile: &ProjectileSnapshot, dt: Duration) -> Command {
        let Some(target) = self
            .tracked_mut(projectile.target)
            .filter(|target| !target.reached_end)
        else {
            return Command::DiscardProjectile {
                projectile: projectile.id,
            };
        };

        let offset = target.position - projectile.position;
        let distance = offset.length();
        let budget = projectile.speed * dt.as_secs_f32();
        if distance <= budget {
            target.health -= projectile.damage;
            return Command::ImpactProjectile {
                projectile: projectile.id,
            };
        }

        Command::AdvanceProjectile {
            projectile: projectile.id,
            position: projectile.position + offset / distance * budget,
        }
    }

    fn resolve_hazard(&mut self, hazard: &HazardSnapshot, dt: Duration) -> Command {
        let remaining = hazard.remaining.saturating_sub(dt);
        if remaining.is_zero() {
            return Command::ExpireHazard { hazard: hazard.id };
        }

        let reach = hazard.radius;
        let victim = self.units.iter_mut().find(|unit| {
            unit.is_alive() && unit.position.distance(hazard.position) < reach + unit.radius
        });
        match victim {
            Some(unit) => {
                unit.health -= unit.kind.hazard_damage();
                Command::TriggerHazard {
                    hazard: hazard.id,
                    unit: unit.id,
                }
            }
            None => Command::AgeHazard {
                hazard: hazard.id,
                remaining,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::{HazardId, ProjectileId, ProjectilePayload, StructureId, UnitSnapshot};

    const FRAME: Duration = Duration::from_millis(100);

    fn unit(id: u32, position: Vec2, health: f32) -> UnitSnapshot {
        UnitSnapshot {
            id: UnitId::new(id),
            kind: UnitKind::Normal,
            position,
            radius: 15.0,
            health,
            max_health: 100.0,
            speed: 60.0,
            slow_factor: 1.0,
            waypoint_index: 1,
            reached_end: false,
        }
    }

    fn projectile(id: u32, position: Vec2, target: u32, damage: f32) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: ProjectileId::new(id),
            position,
            target: UnitId::new(target),
            damage,
            speed: 300.0,
            payload: ProjectilePayload::None,
        }
    }

    fn hazard(id: u32, position: Vec2, remaining: Duration) -> HazardSnapshot {
        HazardSnapshot {
            id: HazardId::new(id),
            owner: StructureId::new(0),
            position,
            radius: 15.0,
            remaining,
        }
    }

    fn run(
        projectiles: Vec<ProjectileSnapshot>,
        hazards: Vec<HazardSnapshot>,
        units: Vec<UnitSnapshot>,
    ) -> Vec<Command> {
        let mut out = Vec::new();
        Ordnance::new().handle(
            &[Event::TimeAdvanced { dt: FRAME }],
            &ProjectileView::from_snapshots(projectiles),
            &HazardView::from_snapshots(hazards),
            &UnitView::from_snapshots(units),
            &mut out,
        );
        out
    }

    #[test]
    fn projectile_homes_towards_current_target_position() {
        let out = run(
            vec![projectile(0, Vec2::ZERO, 1, 20.0)],
            Vec::new(),
            vec![unit(1, Vec2::new(0.0, 100.0), 100.0)],
        );
        assert_eq!(
            out,
            vec![Command::AdvanceProjectile {
                projectile: ProjectileId::new(0),
                position: Vec2::new(0.0, 30.0),
            }]
        );
    }

    #[test]
    fn projectile_within_budget_impacts() {
        let out = run(
            vec![projectile(0, Vec2::ZERO, 1, 20.0)],
            Vec::new(),
            vec![unit(1, Vec2::new(30.0, 0.0), 100.0)],
        );
        assert_eq!(
            out,
            vec![Command::ImpactProjectile {
                projectile: ProjectileId::new(0),
            }]
        );
    }

    #[test]
    fn projectile_without_target_is_discarded() {
        let mut escaped = unit(2, Vec2::ZERO, 100.0);
        escaped.reached_end = true;
        let out = run(
            vec![
                projectile(0, Vec2::ZERO, 1, 20.0),
                projectile(1, Vec2::ZERO, 2, 20.0),
            ],
            Vec::new(),
            vec![escaped],
        );
        assert_eq!(
            out,
            vec![
                Command::DiscardProjectile {
                    projectile: ProjectileId::new(0),
                },
                Command::DiscardProjectile {
                    projectile: ProjectileId::new(1),
                },
            ]
        );
    }

    #[test]
    fn hazard_expires_when_lifetime_runs_out() {
        let out = run(
            Vec::new(),
            vec![hazard(0, Vec2::ZERO, Duration::from_millis(80))],
            vec![unit(0, Vec2::ZERO, 100.0)],
        );
        assert_eq!(
            out,
            vec![Command::ExpireHazard {
                hazard: HazardId::new(0),
            }]
        );
    }

    #[test]
    fn hazard_ages_while_nobody_is_near() {
        let out = run(
            Vec::new(),
            vec![hazard(0, Vec2::ZERO, Duration::from_secs(10))],
            vec![unit(0, Vec2::new(30.0, 0.0), 100.0)],
        );
        assert_eq!(
            out,
            vec![Command::AgeHazard {
                hazard: HazardId::new(0),
                remaining: Duration::from_millis(9_900),
            }]
        );
    }

    #[test]
    fn hazard_triggers_on_first_live_unit_in_reach() {
        let out = run(
            Vec::new(),
            vec![hazard(0, Vec2::ZERO, Duration::from_secs(10))],
            vec![
                unit(0, Vec2::new(5.0, 0.0), -3.0),
                unit(1, Vec2::new(29.0, 0.0), 100.0),
                unit(2, Vec2::ZERO, 100.0),
            ],
        );
        assert_eq!(
            out,
            vec![Command::TriggerHazard {
                hazard: HazardId::new(0),
                unit: UnitId::new(1),
            }]
        );
    }

    #[test]
    fn one_unit_springs_only_one_hazard_per_frame() {
        let out = run(
            Vec::new(),
            vec![
                hazard(0, Vec2::ZERO, Duration::from_secs(10)),
                hazard(1, Vec2::new(4.0, 0.0), Duration::from_secs(10)),
            ],
            vec![unit(0, Vec2::new(2.0, 0.0), 100.0)],
        );
        assert_eq!(
            out,
            vec![
                Command::TriggerHazard {
                    hazard: HazardId::new(0),
                    unit: UnitId::new(0),
                },
                Command::AgeHazard {
                    hazard: HazardId::new(1),
                    remaining: Duration::from_millis(9_900),
                },
            ]
        );
    }

    #[test]
    fn projectile_kill_spares_the_hazard() {
        let out = run(
            vec![projectile(0, Vec2::new(10.0, 0.0), 0, 50.0)],
            vec![hazard(0, Vec2::ZERO, Duration::from_secs(10))],
            vec![unit(0, Vec2::ZERO, 40.0)],
        );
        assert_eq!(
            out,
            vec![
                Command::ImpactProjectile {
                    projectile: ProjectileId::new(0),
                },
                Command::AgeHazard {
                    hazard: HazardId::new(0),
                    remaining: Duration::from_millis(9_900),
                },
            ]
        );
    }

    #[test]
    fn nothing_happens_without_elapsed_time() {
        let mut out = Vec::new();
        Ordnance::new().handle(
            &[],
            &ProjectileView::from_snapshots(vec![projectile(0, Vec2::ZERO, 1, 20.0)]),
            &HazardView::default(),
            &UnitView::default(),
            &mut out,
        );
        assert!(out.is_empty());
    }
}
