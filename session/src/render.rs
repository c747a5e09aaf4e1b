//! Read-only frame description handed to presentation layers.

use glam::Vec2;
use lane_defence_core::{StructureId, StructureKind, UnitKind};

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderState {
    /// Play-area dimensions.
    pub play_area: Vec2,
    /// Resolved path waypoints.
    pub path: Vec<Vec2>,
    /// Units on the path, in spawn order.
    pub units: Vec<UnitSprite>,
    /// Placed structures, in placement order.
    pub structures: Vec<StructureSprite>,
    /// Positions of projectiles in flight.
    pub projectiles: Vec<Vec2>,
    /// Positions of hazards waiting on the path.
    pub hazards: Vec<Vec2>,
}

/// Drawable unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitSprite {
    /// Kind of unit.
    pub kind: UnitKind,
    /// Current position.
    pub position: Vec2,
    /// Collision radius.
    pub radius: f32,
    /// Health bar fill in `0.0..=1.0`.
    pub health_fraction: f32,
}

/// Drawable structure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StructureSprite {
    /// Identifier of the structure.
    pub id: StructureId,
    /// Kind of structure.
    pub kind: StructureKind,
    /// Centre of the footprint.
    pub position: Vec2,
    /// Footprint radius.
    pub radius: f32,
    /// Current range, drawn as a ring when selected.
    pub range: f32,
    /// Whether the player selected this structure.
    pub selected: bool,
}
