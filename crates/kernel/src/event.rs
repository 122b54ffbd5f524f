use arena_common::QuatTransform;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A record of one lifecycle transition inside the scene.
///
/// The log is append-only between drains. Consumers (logging, HUD, tests)
/// drain it once per frame; the scene never reads it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A new enemy appeared.
    EnemySpawned { transform: QuatTransform, at: f64 },
    /// The player fired.
    ProjectileFired { transform: QuatTransform, at: f64 },
    /// A projectile hit an enemy; both now die.
    Killed {
        enemy: QuatTransform,
        projectile: QuatTransform,
        at: f64,
    },
    /// A projectile flew out of range and was dropped.
    ProjectileCulled { position: Vec3, at: f64 },
    /// A dying object finished its animation and was dropped.
    DyingExpired { at: f64 },
}

impl SceneEvent {
    /// Simulation time the event happened at.
    pub fn at(&self) -> f64 {
        match self {
            SceneEvent::EnemySpawned { at, .. }
            | SceneEvent::ProjectileFired { at, .. }
            | SceneEvent::Killed { at, .. }
            | SceneEvent::ProjectileCulled { at, .. }
            | SceneEvent::DyingExpired { at } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_reads_every_variant() {
        let t = QuatTransform::default();
        let events = [
            SceneEvent::EnemySpawned { transform: t, at: 1.0 },
            SceneEvent::ProjectileFired { transform: t, at: 2.0 },
            SceneEvent::Killed {
                enemy: t,
                projectile: t,
                at: 3.0,
            },
            SceneEvent::ProjectileCulled {
                position: Vec3::ZERO,
                at: 4.0,
            },
            SceneEvent::DyingExpired { at: 5.0 },
        ];
        let times: Vec<f64> = events.iter().map(SceneEvent::at).collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
