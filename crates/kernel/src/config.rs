use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::dying::DyingObject;

/// How new enemies are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Each enemy lands independently at a random point in the cone ahead
    /// of the player, facing a random direction.
    #[default]
    Scatter,
    /// The first enemy is placed like `Scatter`; every following one lines
    /// up behind the most recent living enemy, turned by a tenth of the
    /// sampled facing offset, forming a marching column.
    Column,
}

/// Errors from config validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("spawn distance range is empty: {min}..{max}")]
    EmptySpawnRange { min: f32, max: f32 },
}

/// Scene tunables. `Default` holds the reference gameplay values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seconds between enemy spawns.
    pub spawn_delay: f64,
    /// No spawns while this many enemies are alive.
    pub max_enemies: usize,
    pub spawn_distance_min: f32,
    pub spawn_distance_max: f32,
    /// Half angle of the spawn cone around the player's facing, radians.
    pub spawn_cone_half_angle: f32,
    pub spawn_policy: SpawnPolicy,
    /// Gap between enemies in a [`SpawnPolicy::Column`].
    pub column_spacing: f32,
    /// Enemy walking speed along its facing. Zero keeps enemies in place.
    pub enemy_speed: f32,

    /// Player speed, world units per second.
    pub move_speed: f32,
    /// Movement multiplier while the slow key is held.
    pub slow_factor: f32,
    /// Cursor travel for a full horizontal turn.
    pub x_sensitivity: f32,
    /// Cursor travel for a full vertical turn.
    pub y_sensitivity: f32,

    pub projectile_speed: f32,
    /// Projectiles farther than this from the player are dropped.
    pub cull_distance: f32,
    /// Distance ahead of the eye where projectiles appear.
    pub muzzle_offset: f32,

    /// Feet-to-head offset of a standing body; also the player's eye height.
    pub head_offset: Vec3,
    /// Focal distance sum below which a projectile hits a body.
    pub collision_focal_sum: f32,
    /// Seconds a dying object is animated before it is dropped.
    pub death_duration: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            spawn_delay: 1.0,
            max_enemies: 10,
            spawn_distance_min: 2.0,
            spawn_distance_max: 5.0,
            spawn_cone_half_angle: 0.4 * PI,
            spawn_policy: SpawnPolicy::Scatter,
            column_spacing: 0.5,
            enemy_speed: 0.0,
            move_speed: 3.0,
            slow_factor: 0.1,
            x_sensitivity: 1000.0,
            y_sensitivity: 1000.0,
            projectile_speed: 5.0,
            cull_distance: 100.0,
            muzzle_offset: 0.2,
            head_offset: Vec3::new(0.0, 1.35, 0.0),
            collision_focal_sum: 2.0,
            death_duration: DyingObject::DEATH_DURATION,
        }
    }
}

impl SceneConfig {
    /// Check every tunable. A scene built from an unchecked config may panic
    /// while sampling spawn positions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("spawn_delay", self.spawn_delay)?;
        non_negative("spawn_distance_min", self.spawn_distance_min as f64)?;
        finite("spawn_distance_max", self.spawn_distance_max as f64)?;
        if self.spawn_distance_min >= self.spawn_distance_max {
            return Err(ConfigError::EmptySpawnRange {
                min: self.spawn_distance_min,
                max: self.spawn_distance_max,
            });
        }
        non_negative("spawn_cone_half_angle", self.spawn_cone_half_angle as f64)?;
        non_negative("column_spacing", self.column_spacing as f64)?;
        finite("enemy_speed", self.enemy_speed as f64)?;
        non_negative("move_speed", self.move_speed as f64)?;
        non_negative("slow_factor", self.slow_factor as f64)?;
        positive("x_sensitivity", self.x_sensitivity as f64)?;
        positive("y_sensitivity", self.y_sensitivity as f64)?;
        non_negative("projectile_speed", self.projectile_speed as f64)?;
        positive("cull_distance", self.cull_distance as f64)?;
        non_negative("muzzle_offset", self.muzzle_offset as f64)?;
        for v in self.head_offset.to_array() {
            finite("head_offset", v as f64)?;
        }
        positive("collision_focal_sum", self.collision_focal_sum as f64)?;
        positive("death_duration", self.death_duration)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
