#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that walks units along the path.

use std::time::Duration;

use lane_defence_core::{Command, Event, PathView, UnitSnapshot, UnitView};

/// Pure system that reacts to elapsed time and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement;

impl Movement {
    /// Creates the movement system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consumes world events and the unit view to emit [`Command::MoveUnit`] values.
    ///
    /// Units that died or escaped are left for casualty resolution and do not
    /// move.
    pub fn handle(
        &mut self,
        events: &[Event],
        unit_view: &UnitView,
        path: PathView<'_>,
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

        for unit in unit_view.iter().filter(|unit| unit.is_alive()) {
            if let Some(command) = step_unit(unit, path, dt) {
                out.push(command);
            }
        }
    }
}

/// Advances a unit towards its current waypoint by one frame's movement budget.
///
/// A unit whose remaining distance fits inside the budget snaps onto the
/// waypoint and heads for the next one; leftover budget is dropped, so a unit
/// never passes more than one waypoint per frame. Returns `None` when the unit
/// has no waypoint left to head for.
#[must_use]
pub fn step_unit(unit: &UnitSnapshot, path: PathView<'_>, dt: Duration) -> Option<Command> {
    let target = path.waypoint(unit.waypoint_index)?;
    let offset = target - unit.position;
    let distance = offset.length();
    let budget = unit.speed * unit.slow_factor * dt.as_secs_f32();

    if distance <= budget {
        let waypoint_index = unit.waypoint_index + 1;
        return Some(Command::MoveUnit {
            unit: unit.id,
            position: target,
            waypoint_index,
            reached_end: waypoint_index >= path.len(),
        });
    }

    Some(Command::MoveUnit {
        unit: unit.id,
        position: unit.position + offset / distance * budget,
        waypoint_index: unit.waypoint_index,
        reached_end: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use lane_defence_core::{UnitId, UnitKind};

    const WAYPOINTS: [Vec2; 3] = [
        Vec2::new(0.0, 0.0),
        Vec2::new(100.0, 0.0),
        Vec2::new(100.0, 100.0),
    ];

    fn unit(position: Vec2, waypoint_index: usize) -> UnitSnapshot {
        UnitSnapshot {
            id: UnitId::new(0),
            kind: UnitKind::Normal,
            position,
            radius: 15.0,
            health: 100.0,
            max_health: 100.0,
            speed: 60.0,
            slow_factor: 1.0,
            waypoint_index,
            reached_end: false,
        }
    }

    #[test]
    fn moves_along_direction_by_budget() {
        let command = step_unit(
            &unit(Vec2::ZERO, 1),
            PathView::new(&WAYPOINTS),
            Duration::from_millis(500),
        );
        assert_eq!(
            command,
            Some(Command::MoveUnit {
                unit: UnitId::new(0),
                position: Vec2::new(30.0, 0.0),
                waypoint_index: 1,
                reached_end: false,
            })
        );
    }

    #[test]
    fn snaps_to_waypoint_without_carrying_leftover_budget() {
        let command = step_unit(
            &unit(Vec2::new(90.0, 0.0), 1),
            PathView::new(&WAYPOINTS),
            Duration::from_secs(1),
        );
        assert_eq!(
            command,
            Some(Command::MoveUnit {
                unit: UnitId::new(0),
                position: Vec2::new(100.0, 0.0),
                waypoint_index: 2,
                reached_end: false,
            })
        );
    }

    #[test]
    fn passing_the_final_waypoint_reaches_the_end() {
        let command = step_unit(
            &unit(Vec2::new(100.0, 95.0), 2),
            PathView::new(&WAYPOINTS),
            Duration::from_millis(100),
        );
        assert!(matches!(
            command,
            Some(Command::MoveUnit {
                waypoint_index: 3,
                reached_end: true,
                ..
            })
        ));
    }

    #[test]
    fn unit_without_remaining_waypoint_stays_put() {
        let command = step_unit(
            &unit(Vec2::new(100.0, 100.0), 3),
            PathView::new(&WAYPOINTS),
            Duration::from_secs(1),
        );
        assert_eq!(command, None);
    }

    #[test]
    fn slow_factor_scales_the_budget() {
        let mut slowed = unit(Vec2::ZERO, 1);
        slowed.slow_factor = 0.5;
        let command = step_unit(&slowed, PathView::new(&WAYPOINTS), Duration::from_secs(1));
        assert!(matches!(
            command,
            Some(Command::MoveUnit { position, .. }) if position == Vec2::new(30.0, 0.0)
        ));
    }

    #[test]
    fn dead_units_are_not_moved() {
        let mut dead = unit(Vec2::ZERO, 1);
        dead.health = -5.0;
        let view = UnitView::from_snapshots(vec![dead]);
        let mut commands = Vec::new();
        Movement::new().handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_secs(1),
            }],
            &view,
            PathView::new(&WAYPOINTS),
            &mut commands,
        );
        assert!(commands.is_empty());
    }
}
