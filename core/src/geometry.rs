//! Path geometry shared by the world and the systems.

use glam::Vec2;

/// Straight piece of the path between two consecutive waypoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    start: Vec2,
    end: Vec2,
}

impl Segment {
    /// Creates a segment running from `start` to `end`.
    #[must_use]
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// First endpoint.
    #[must_use]
    pub const fn start(&self) -> Vec2 {
        self.start
    }

    /// Second endpoint.
    #[must_use]
    pub const fn end(&self) -> Vec2 {
        self.end
    }

    /// Length of the segment in world units.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Unit vector pointing from `start` to `end`, or `None` for a degenerate segment.
    #[must_use]
    pub fn direction(&self) -> Option<Vec2> {
        (self.end - self.start).try_normalize()
    }

    /// Parameter in `0.0..=1.0` of the point on the segment closest to `point`.
    #[must_use]
    pub fn projection(&self, point: Vec2) -> f32 {
        let delta = self.end - self.start;
        let length_sq = delta.length_squared();
        if length_sq == 0.0 {
            return 0.0;
        }
        ((point - self.start).dot(delta) / length_sq).clamp(0.0, 1.0)
    }

    /// Point at parameter `t`, clamped to the segment's extent.
    #[must_use]
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.start.lerp(self.end, t.clamp(0.0, 1.0))
    }

    /// Point on the segment closest to `point`.
    #[must_use]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        self.point_at(self.projection(point))
    }

    /// Shortest distance between `point` and the segment.
    #[must_use]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        point.distance(self.closest_point(point))
    }
}

/// Read-only view of the resolved path waypoints in world units.
#[derive(Clone, Copy, Debug)]
pub struct PathView<'a> {
    waypoints: &'a [Vec2],
}

impl<'a> PathView<'a> {
    /// Captures a view over resolved waypoints.
    #[must_use]
    pub const fn new(waypoints: &'a [Vec2]) -> Self {
        Self { waypoints }
    }

    /// Resolved waypoints in traversal order.
    #[must_use]
    pub const fn waypoints(&self) -> &'a [Vec2] {
        self.waypoints
    }

    /// Waypoint at `index`, if the path has one.
    #[must_use]
    pub fn waypoint(&self, index: usize) -> Option<Vec2> {
        self.waypoints.get(index).copied()
    }

    /// Number of waypoints.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Reports whether the path has no waypoints.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Segments between consecutive waypoints, in traversal order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + 'a {
        self.waypoints
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
    }

    /// Shortest distance from `point` to any segment of the path.
    #[must_use]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.segments()
            .map(|segment| segment.distance_to(point))
            .fold(f32::INFINITY, f32::min)
    }
}
