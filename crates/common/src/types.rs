use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// World up axis.
pub const UP: Vec3 = Vec3::Y;
/// World right axis.
pub const RIGHT: Vec3 = Vec3::X;
/// World forward axis. Cameras and projectiles look down -Z.
pub const FORWARD: Vec3 = Vec3::NEG_Z;

/// Rigid placement: position and orientation.
///
/// Used for enemies, projectiles and dying-object snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuatTransform {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for QuatTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl QuatTransform {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Object-to-world matrix: `translate(position) * rotate(orientation)`.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_quat(self.orientation)
    }

    /// Unit vector the object is facing in world space.
    pub fn facing(&self) -> Vec3 {
        self.orientation * FORWARD
    }
}

/// Player pose: position plus yaw/pitch look angles.
///
/// Yaw is unbounded. Pitch is clamped to `[-PI/2, PI/2]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AngleTransform {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl AngleTransform {
    pub const MIN_PITCH: f32 = -FRAC_PI_2;
    pub const MAX_PITCH: f32 = FRAC_PI_2;

    /// Full look orientation: yaw about world up, then pitch about world right.
    ///
    /// Yaw is negated so that a positive yaw (cursor moving right) turns the
    /// view to the right.
    pub fn look_direction(&self) -> Quat {
        Quat::from_axis_angle(UP, -self.yaw) * Quat::from_axis_angle(RIGHT, self.pitch)
    }

    /// Yaw-only orientation used for ground-plane movement.
    pub fn forward_direction(&self) -> Quat {
        Quat::from_axis_angle(UP, -self.yaw)
    }

    /// Apply look deltas, clamping pitch.
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(Self::MIN_PITCH, Self::MAX_PITCH);
        debug_assert!(self.pitch_in_range(), "pitch escaped clamp: {}", self.pitch);
    }

    pub fn pitch_in_range(&self) -> bool {
        (Self::MIN_PITCH..=Self::MAX_PITCH).contains(&self.pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quat_transform_default_is_identity() {
        let t = QuatTransform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.orientation, Quat::IDENTITY);
    }

    #[test]
    fn world_matrix_maps_origin_to_position() {
        let t = QuatTransform::new(
            Vec3::new(3.0, -2.0, 7.5),
            Quat::from_axis_angle(Vec3::new(1.0, 2.0, 0.5).normalize(), 1.1),
        );
        let origin = t.world_matrix().transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(t.position, 1e-5));
    }

    #[test]
    fn world_matrix_rotates_then_translates() {
        let t = QuatTransform::new(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_axis_angle(UP, std::f32::consts::FRAC_PI_2),
        );
        // -Z rotated a quarter turn about +Y points to -X.
        let p = t.world_matrix().transform_point3(FORWARD);
        assert!(p.abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn zero_angles_look_down_forward() {
        let p = AngleTransform::default();
        assert!((p.look_direction() * FORWARD).abs_diff_eq(FORWARD, 1e-6));
        assert!((p.forward_direction() * FORWARD).abs_diff_eq(FORWARD, 1e-6));
    }

    #[test]
    fn positive_yaw_turns_right() {
        let p = AngleTransform {
            yaw: std::f32::consts::FRAC_PI_2,
            ..Default::default()
        };
        assert!((p.forward_direction() * FORWARD).abs_diff_eq(RIGHT, 1e-5));
    }

    #[test]
    fn forward_direction_ignores_pitch() {
        let mut p = AngleTransform {
            yaw: 0.7,
            ..Default::default()
        };
        let level = p.forward_direction() * FORWARD;
        for pitch in [-FRAC_PI_2, -1.0, -0.1, 0.0, 0.3, 1.2, FRAC_PI_2] {
            p.pitch = pitch;
            assert_eq!(p.forward_direction() * FORWARD, level);
        }
    }

    #[test]
    fn positive_pitch_looks_up() {
        let p = AngleTransform {
            pitch: 0.5,
            ..Default::default()
        };
        assert!((p.look_direction() * FORWARD).y > 0.0);
    }

    #[test]
    fn look_clamps_pitch() {
        let mut p = AngleTransform::default();
        p.look(0.0, 10.0);
        assert_eq!(p.pitch, AngleTransform::MAX_PITCH);
        p.look(0.0, -25.0);
        assert_eq!(p.pitch, AngleTransform::MIN_PITCH);
    }

    #[test]
    fn look_leaves_yaw_unbounded() {
        let mut p = AngleTransform::default();
        for _ in 0..10 {
            p.look(1.0, 0.0);
        }
        assert_eq!(p.yaw, 10.0);
    }
}
