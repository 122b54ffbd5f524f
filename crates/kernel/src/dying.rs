use arena_common::QuatTransform;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What a dying object was before it died; selects mesh and material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DyingKind {
    Enemy,
    Projectile,
}

/// Frozen snapshot of a destroyed entity, kept only to animate its explosion.
///
/// Two are created per kill, one per kind, sharing origin, direction, start
/// time and duration. The duration is copied from the scene config at the
/// moment of death.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DyingObject {
    pub transform: QuatTransform,
    pub explosion_origin: Vec3,
    pub explosion_direction: Vec3,
    pub kind: DyingKind,
    pub death_start: f64,
    /// How long the death animation runs, in simulation seconds.
    pub duration: f64,
}

impl DyingObject {
    /// Reference animation length, the default for `SceneConfig::death_duration`.
    pub const DEATH_DURATION: f64 = 1.0;

    /// Simulation time elapsed since death.
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.death_start
    }

    /// Animation progress in `[0, 1]`.
    pub fn progress(&self, now: f64) -> f64 {
        (self.elapsed(now) / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.elapsed(now) > self.duration
    }
}
