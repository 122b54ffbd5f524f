use arena_common::{AngleTransform, FORWARD, UP};
use glam::{Mat4, Vec3};

use crate::draw_list::{DrawList, MeshKind};

/// Camera configuration for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Camera up vector; tilts with pitch.
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            target: FORWARD,
            up: UP,
            fov_degrees: 60.0,
            near: 0.01,
            far: 100.0,
        }
    }
}

impl RenderView {
    /// First-person view from the player's eye.
    pub fn from_player(player: &AngleTransform, head_offset: Vec3) -> Self {
        let look = player.look_direction();
        let eye = player.position + head_offset;
        Self {
            eye,
            target: eye + look * FORWARD,
            up: look * UP,
            ..Default::default()
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer turns one prepared frame into output. It never sees the scene
/// mutably; scene truth is kernel-owned.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &DrawList) -> Self::Output;
}

/// Text renderer for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &DrawList) -> String {
        let view = &frame.view;
        let mut out = String::new();
        out.push_str(&format!("=== Frame (time={:.3}) ===\n", frame.time));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));
        out.push_str(&format!("Instances: {}\n", frame.instances.len()));

        for instance in &frame.instances {
            let p = instance.model.w_axis;
            let mesh = match instance.mesh {
                MeshKind::Enemy => "enemy",
                MeshKind::Projectile => "projectile",
            };
            out.push_str(&format!("  {mesh:<10} pos=({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
            if let Some(explosion) = &instance.explosion {
                out.push_str(&format!(
                    " exploding {:.2}/{:.2}",
                    explosion.elapsed, explosion.total
                ));
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_input::InputContext;
    use arena_kernel::{Scene, SceneConfig};
    use glam::Quat;
    use std::f32::consts::FRAC_PI_2;

    fn quiet_scene(input: &InputContext) -> Scene {
        let config = SceneConfig {
            max_enemies: 0,
            ..Default::default()
        };
        Scene::with_config(config, input, 0)
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 60.0);
        assert_eq!(view.near, 0.01);
        assert_eq!(view.far, 100.0);
    }

    #[test]
    fn view_sits_at_eye_height() {
        let player = AngleTransform {
            position: Vec3::new(2.0, 0.0, 3.0),
            ..Default::default()
        };
        let view = RenderView::from_player(&player, Vec3::new(0.0, 1.35, 0.0));
        assert_eq!(view.eye, Vec3::new(2.0, 1.35, 3.0));
        assert!((view.target - view.eye).abs_diff_eq(FORWARD, 1e-6));
    }

    #[test]
    fn up_tilts_with_pitch() {
        let player = AngleTransform {
            pitch: FRAC_PI_2 * 0.5,
            ..Default::default()
        };
        let view = RenderView::from_player(&player, Vec3::ZERO);
        assert!(view.up.z > 0.0);
        assert!((view.up.dot(view.target - view.eye)).abs() < 1e-5);
    }

    #[test]
    fn view_projection_is_finite() {
        let vp = RenderView::from_player(&AngleTransform::default(), Vec3::Y)
            .view_projection(16.0 / 9.0);
        assert!(vp.is_finite());
    }

    #[test]
    fn debug_renderer_empty_scene() {
        let input = InputContext::new();
        let scene = quiet_scene(&input);
        let output = DebugTextRenderer::new().render(&DrawList::build(&scene, 0.0));
        assert!(output.contains("time=0.000"));
        assert!(output.contains("Instances: 0"));
        assert!(output.contains("fov=60"));
    }

    #[test]
    fn debug_renderer_lists_entities() {
        let input = InputContext::new();
        let mut scene = quiet_scene(&input);
        scene.insert_enemy(arena_common::QuatTransform::new(
            Vec3::new(1.0, 0.0, -4.0),
            Quat::IDENTITY,
        ));
        scene.spawn_projectile();

        let output = DebugTextRenderer::new().render(&DrawList::build(&scene, 0.0));
        assert!(output.contains("Instances: 2"));
        assert!(output.contains("enemy"));
        assert!(output.contains("projectile"));
        assert!(output.contains("pos=(1.00, 0.00, -4.00)"));
    }
}
