//! Projectiles and hazards owned by the world.

use std::time::Duration;

use glam::Vec2;
use lane_defence_core::{
    HazardId, HazardSnapshot, ProjectileId, ProjectilePayload, ProjectileSnapshot, StructureId,
    UnitId,
};

/// Travel speed of every projectile in world units per second.
pub(crate) const PROJECTILE_SPEED: f32 = 300.0;

/// Projectiles leave the structure this far above its centre.
pub(crate) const MUZZLE_OFFSET: Vec2 = Vec2::new(0.0, -10.0);

/// Trigger radius of a hazard.
pub(crate) const HAZARD_RADIUS: f32 = 15.0;

/// Time a hazard waits on the path before expiring unused.
pub(crate) const HAZARD_LIFETIME: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) position: Vec2,
    pub(crate) target: UnitId,
    pub(crate) damage: f32,
    pub(crate) payload: ProjectilePayload,
}

impl Projectile {
    pub(crate) fn launch(id: ProjectileId, origin: Vec2, target: UnitId, damage: f32) -> Self {
        Self {
            id,
            position: origin + MUZZLE_OFFSET,
            target,
            damage,
            payload: ProjectilePayload::None,
        }
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            position: self.position,
            target: self.target,
            damage: self.damage,
            speed: PROJECTILE_SPEED,
            payload: self.payload,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Hazard {
    pub(crate) id: HazardId,
    pub(crate) owner: StructureId,
    pub(crate) position: Vec2,
    pub(crate) remaining: Duration,
}

impl Hazard {
    pub(crate) fn deploy(id: HazardId, owner: StructureId, position: Vec2) -> Self {
        Self {
            id,
            owner,
            position,
            remaining: HAZARD_LIFETIME,
        }
    }

    pub(crate) fn snapshot(&self) -> HazardSnapshot {
        HazardSnapshot {
            id: self.id,
            owner: self.owner,
            position: self.position,
            radius: HAZARD_RADIUS,
            remaining: self.remaining,
        }
    }
}
