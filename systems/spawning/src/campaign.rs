//! Authored ten-wave campaign.

use lane_defence_core::{BurstDirective, UnitKind, WaveScript};

/// Builds the authored campaign; wave 10 ends with the boss.
#[must_use]
pub fn authored_waves() -> Vec<WaveScript> {
    use BurstDirective as D;

    vec![
        WaveScript::new(vec![D::burst(10, 1.0), D::delay(3.0), D::burst(5, 0.8)]),
        WaveScript::new(vec![D::burst(15, 1.0), D::delay(4.0), D::burst(15, 0.8)]),
        WaveScript::new(vec![
            D::burst(5, 0.5),
            D::burst(5, 0.5),
            D::delay(2.0),
            D::burst(20, 0.8),
            D::delay(2.0),
            D::burst(10, 0.5),
        ]),
        WaveScript::new(vec![D::burst(60, 0.6)]),
        WaveScript::new(vec![
            D::burst(30, 0.5),
            D::delay(5.0),
            D::burst(30, 0.5),
            D::delay(2.0),
            D::burst(10, 0.3),
        ]),
        WaveScript::new(vec![D::burst(80, 0.4)]),
        WaveScript::new(vec![
            D::burst(20, 0.3),
            D::delay(2.0),
            D::burst(40, 0.6),
            D::delay(2.0),
            D::burst(20, 0.3),
        ]),
        WaveScript::new(vec![D::burst(100, 0.4)]),
        WaveScript::new(vec![D::burst(50, 0.3), D::delay(5.0), D::burst(50, 0.3)]),
        WaveScript::new(vec![
            D::burst(20, 0.4),
            D::delay(3.0),
            D::burst_of(UnitKind::Boss, 1, 1.0),
            D::delay(5.0),
            D::burst(30, 0.5),
        ]),
    ]
}
