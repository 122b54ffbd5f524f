use arena_kernel::Scene;

/// Read-only queries against the scene for the HUD, logs and the CLI.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene state.
    pub fn summary(scene: &Scene) -> SceneSummary {
        SceneSummary {
            tick: scene.tick(),
            seed: scene.seed(),
            time: scene.time(),
            alive: scene.enemies().len(),
            projectiles: scene.projectiles().len(),
            dying: scene.dying_objects().len(),
            killed: scene.killed_count(),
            pending_events: scene.events().len(),
        }
    }

    /// Stats for the in-game overlay.
    ///
    /// `frame_time` is the unscaled wall time of the last frame in seconds.
    pub fn hud(scene: &Scene, frame_time: f64, time_speed: f64) -> HudStats {
        let stats = HudStats {
            fps: if frame_time > 0.0 { 1.0 / frame_time } else { 0.0 },
            alive: scene.enemies().len(),
            killed: scene.killed_count(),
            dying: scene.dying_objects().len(),
            time_speed,
        };
        tracing::trace!(tick = scene.tick(), fps = stats.fps, alive = stats.alive, "hud stats");
        stats
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub tick: u64,
    pub seed: u64,
    pub time: f64,
    pub alive: usize,
    pub projectiles: usize,
    pub dying: usize,
    pub killed: u64,
    pub pending_events: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: tick={} seed={} time={:.2} alive={} projectiles={} dying={} killed={} pending_events={}",
            self.tick,
            self.seed,
            self.time,
            self.alive,
            self.projectiles,
            self.dying,
            self.killed,
            self.pending_events
        )
    }
}

/// Numbers shown on the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct HudStats {
    pub fps: f64,
    pub alive: usize,
    pub killed: u64,
    pub dying: usize,
    pub time_speed: f64,
}

impl std::fmt::Display for HudStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FPS: {:.1} | Alive: {} | Killed: {} | Time speed: {:.2}",
            self.fps, self.alive, self.killed, self.time_speed
        )
    }
}
