use arena_kernel::{DyingKind, DyingObject, Scene};
use glam::{Mat4, Vec3};

use crate::renderer::RenderView;

/// Which mesh and material an instance is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Enemy,
    Projectile,
}

impl From<DyingKind> for MeshKind {
    fn from(kind: DyingKind) -> Self {
        match kind {
            DyingKind::Enemy => MeshKind::Enemy,
            DyingKind::Projectile => MeshKind::Projectile,
        }
    }
}

/// Shader parameters for the explosion effect of a dying object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Seconds since death at render time.
    pub elapsed: f32,
    pub total: f32,
}

/// One mesh draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawInstance {
    pub mesh: MeshKind,
    pub model: Mat4,
    /// Ambient light factor; projectiles glow, enemies do not.
    pub ambient: f32,
    pub explosion: Option<Explosion>,
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone)]
pub struct DrawList {
    /// Render clock the frame was built for.
    pub time: f64,
    pub view: RenderView,
    /// Point light: the newest projectile, or the eye when none are flying.
    pub light_position: Vec3,
    pub instances: Vec<DrawInstance>,
}

const ENEMY_AMBIENT: f32 = 0.1;
const PROJECTILE_AMBIENT: f32 = 1.0;
const PROJECTILE_SCALE: f32 = 1.0 / 5.0;
/// Projectile spin, radians per second.
const PROJECTILE_SPIN_RATE: f32 = 10.0;

impl DrawList {
    /// Build the frame for render clock `time`.
    ///
    /// Dying objects whose animation already ended at `time` are skipped
    /// even if the scene has not pruned them yet.
    pub fn build(scene: &Scene, time: f64) -> Self {
        let view = RenderView::from_player(scene.player(), scene.config().head_offset);
        let light_position = scene
            .projectiles()
            .last()
            .map_or(view.eye, |p| p.position);

        let mut instances = Vec::with_capacity(
            scene.enemies().len() + scene.projectiles().len() + scene.dying_objects().len(),
        );
        let spin = projectile_spin(time);

        for enemy in scene.enemies() {
            instances.push(DrawInstance {
                mesh: MeshKind::Enemy,
                model: enemy.world_matrix(),
                ambient: ENEMY_AMBIENT,
                explosion: None,
            });
        }
        for projectile in scene.projectiles() {
            instances.push(DrawInstance {
                mesh: MeshKind::Projectile,
                model: projectile.world_matrix() * spin,
                ambient: PROJECTILE_AMBIENT,
                explosion: None,
            });
        }
        for dying in scene.dying_objects() {
            if dying.is_expired(time) {
                continue;
            }
            instances.push(dying_instance(dying, time, spin));
        }

        tracing::trace!(instances = instances.len(), time, "draw list built");
        Self {
            time,
            view,
            light_position,
            instances,
        }
    }

    pub fn count(&self, mesh: MeshKind) -> usize {
        self.instances.iter().filter(|i| i.mesh == mesh).count()
    }

    pub fn exploding(&self) -> impl Iterator<Item = &DrawInstance> {
        self.instances.iter().filter(|i| i.explosion.is_some())
    }
}

/// Spin and shrink applied to projectile meshes.
fn projectile_spin(time: f64) -> Mat4 {
    let axis = Vec3::new(0.1, 0.0, 1.0).normalize();
    Mat4::from_axis_angle(axis, time as f32 * PROJECTILE_SPIN_RATE)
        * Mat4::from_scale(Vec3::splat(PROJECTILE_SCALE))
}

fn dying_instance(dying: &DyingObject, time: f64, spin: Mat4) -> DrawInstance {
    let mesh = MeshKind::from(dying.kind);
    let (model, ambient) = match mesh {
        MeshKind::Projectile => (dying.transform.world_matrix() * spin, PROJECTILE_AMBIENT),
        MeshKind::Enemy => (dying.transform.world_matrix(), ENEMY_AMBIENT),
    };
    DrawInstance {
        mesh,
        model,
        ambient,
        explosion: Some(Explosion {
            origin: dying.explosion_origin,
            direction: dying.explosion_direction,
            elapsed: dying.elapsed(time) as f32,
            total: dying.duration as f32,
        }),
    }
}
