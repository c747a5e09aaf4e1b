#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement-staging system responsible for emitting structure placement commands.

use glam::Vec2;
use lane_defence_core::{Command, Event, PlacementError, StructureKind};

/// Declarative placement preview describing a potential structure construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementPreview {
    /// Kind of structure proposed for placement.
    pub kind: StructureKind,
    /// Proposed centre of the footprint.
    pub position: Vec2,
    /// Footprint radius of the proposed structure.
    pub radius: f32,
    /// Range ring to draw around the proposed structure.
    pub range: f32,
    /// Reason the placement would be rejected, if any.
    pub rejection: Option<PlacementError>,
}

impl PlacementPreview {
    /// Creates a new placement preview descriptor.
    #[must_use]
    pub const fn new(
        kind: StructureKind,
        position: Vec2,
        rejection: Option<PlacementError>,
    ) -> Self {
        Self {
            kind,
            position,
            radius: kind.footprint_radius(),
            range: kind.base_range(),
            rejection,
        }
    }

    /// Indicates whether the preview represents a valid placement location.
    #[must_use]
    pub const fn placeable(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BuilderInput {
    /// Indicates whether the player confirmed a placement on this frame.
    pub confirm_action: bool,
    /// Indicates whether the player abandoned the staged placement.
    pub cancel_action: bool,
    /// Point currently under the cursor.
    pub cursor: Option<Vec2>,
}

impl BuilderInput {
    /// Input confirming a placement at `cursor`.
    #[must_use]
    pub const fn confirm_at(cursor: Vec2) -> Self {
        Self {
            confirm_action: true,
            cancel_action: false,
            cursor: Some(cursor),
        }
    }
}

/// Placement-staging system that turns a staged kind plus input into placement commands.
///
/// A kind stays staged after a rejected attempt so the player can try another
/// spot; it clears once the world confirms a placement of that kind.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    pending: Option<StructureKind>,
    finished: bool,
}

impl Builder {
    /// Creates a new builder system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            finished: false,
        }
    }

    /// Stages `kind` for placement, replacing any previously staged kind.
    pub fn begin_placement(&mut self, kind: StructureKind) {
        if !self.finished {
            self.pending = Some(kind);
        }
    }

    /// Drops the staged kind.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Kind currently staged for placement.
    #[must_use]
    pub const fn pending(&self) -> Option<StructureKind> {
        self.pending
    }

    /// Builds a preview of the staged kind at `cursor`.
    ///
    /// The `placement_error` closure should mirror the world's
    /// `query::placement_error` helper.
    pub fn preview<F>(&self, cursor: Vec2, placement_error: F) -> Option<PlacementPreview>
    where
        F: FnOnce(StructureKind, Vec2) -> Option<PlacementError>,
    {
        let kind = self.pending?;
        Some(PlacementPreview::new(
            kind,
            cursor,
            placement_error(kind, cursor),
        ))
    }

    /// Consumes world events and adapter-derived input to emit placement commands.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        input: BuilderInput,
        placement_error: F,
        out: &mut Vec<Command>,
    ) where
        F: FnOnce(StructureKind, Vec2) -> Option<PlacementError>,
    {
        for event in events {
            match event {
                Event::StructurePlaced { kind, .. } if self.pending == Some(*kind) => {
                    self.pending = None;
                }
                Event::GameWon | Event::GameLost => {
                    self.finished = true;
                    self.pending = None;
                }
                _ => {}
            }
        }

        if self.finished {
            return;
        }

        if input.cancel_action {
            self.pending = None;
            return;
        }

        if !input.confirm_action {
            return;
        }
        let Some(cursor) = input.cursor else {
            return;
        };
        if let Some(preview) = self.preview(cursor, placement_error) {
            if preview.placeable() {
                out.push(Command::PlaceStructure {
                    kind: preview.kind,
                    position: preview.position,
                });
            }
        }
    }
}
