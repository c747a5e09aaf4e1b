//! Path model resolving normalized waypoints into play-area coordinates.

use glam::Vec2;
use lane_defence_core::{ConfigError, PathView};

/// Lane used when no custom path is configured, as fractions of the play area.
pub(crate) const DEFAULT_LANE: [[f32; 2]; 8] = [
    [0.0, 0.5],
    [0.2, 0.5],
    [0.2, 0.2],
    [0.5, 0.2],
    [0.5, 0.8],
    [0.8, 0.8],
    [0.8, 0.4],
    [1.0, 0.4],
];

/// Ordered waypoints kept both in normalized form and resolved to world units.
#[derive(Clone, Debug)]
pub(crate) struct Path {
    normalized: Vec<Vec2>,
    resolved: Vec<Vec2>,
}

impl Path {
    /// Validates the normalized waypoints and resolves them against the play area.
    pub(crate) fn new(normalized: Vec<Vec2>, width: f32, height: f32) -> Result<Self, ConfigError> {
        if normalized.len() < 2 {
            return Err(ConfigError::TooFewWaypoints {
                count: normalized.len(),
            });
        }
        if let Some(index) = normalized.iter().position(|point| !point.is_finite()) {
            return Err(ConfigError::NonFiniteWaypoint { index });
        }

        let mut path = Self {
            normalized,
            resolved: Vec::new(),
        };
        path.resolve(width, height);
        Ok(path)
    }

    /// Builds the default lane for the provided play area.
    pub(crate) fn default_lane(width: f32, height: f32) -> Self {
        let mut path = Self {
            normalized: DEFAULT_LANE
                .iter()
                .map(|&[x, y]| Vec2::new(x, y))
                .collect(),
            resolved: Vec::new(),
        };
        path.resolve(width, height);
        path
    }

    /// Recomputes absolute coordinates for a new play-area size.
    pub(crate) fn resolve(&mut self, width: f32, height: f32) {
        let scale = Vec2::new(width, height);
        self.resolved.clear();
        self.resolved
            .extend(self.normalized.iter().map(|point| *point * scale));
    }

    pub(crate) fn view(&self) -> PathView<'_> {
        PathView::new(&self.resolved)
    }

    /// First waypoint, where units enter the lane.
    pub(crate) fn start(&self) -> Vec2 {
        self.resolved.first().copied().unwrap_or(Vec2::ZERO)
    }
}
