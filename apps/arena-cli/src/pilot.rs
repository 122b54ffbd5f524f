use std::time::Duration;

use arena_driver::{FrameStats, Frontend};
use arena_input::{Action, InputContext, InputSource, Key};
use arena_kernel::{Scene, SceneEvent};
use arena_tools::{FrameTimer, SceneInspector};
use glam::Vec2;

/// Ticks between shots.
pub const FIRE_EVERY: u64 = 15;
/// Ticks spent strafing one way before switching.
const STRAFE_PERIOD: u64 = 120;
/// Horizontal cursor travel per tick, pixels.
const TURN_PER_TICK: f32 = 1.5;
/// Vertical cursor sway amplitude, pixels.
const NOD_AMPLITUDE: f32 = 20.0;

/// Scripted stand-in for a human: turns slowly, nods, strafes back and
/// forth and fires at a fixed cadence. Fully determined by its tick count.
#[derive(Debug, Clone)]
pub struct Autopilot {
    tick: u64,
    fire_every: u64,
}

impl Autopilot {
    pub fn new(fire_every: u64) -> Self {
        Self {
            tick: 0,
            fire_every: fire_every.max(1),
        }
    }

    /// Absolute cursor position the pilot has moved to.
    pub fn cursor(&self) -> Vec2 {
        let t = self.tick as f32;
        Vec2::new(t * TURN_PER_TICK, (t * 0.02).sin() * NOD_AMPLITUDE)
    }

    /// Move to the next tick and return the actions it triggers.
    pub fn advance(&mut self) -> Vec<Action> {
        self.tick += 1;
        if self.tick % self.fire_every == 0 {
            vec![Action::Fire]
        } else {
            Vec::new()
        }
    }
}

impl InputSource for Autopilot {
    fn is_pressed(&self, key: Key) -> bool {
        let leftward = (self.tick / STRAFE_PERIOD) % 2 == 0;
        match key {
            Key::Left => leftward,
            Key::Right => !leftward,
            _ => false,
        }
    }

    fn mouse_position(&self) -> Vec2 {
        self.cursor()
    }
}

/// Drive a scene directly with the autopilot, `ticks` times `dt` seconds.
///
/// Returns the number of events the scene produced.
pub fn run_scripted(scene: &mut Scene, pilot: &mut Autopilot, ticks: u64, dt: f64) -> usize {
    let mut events = 0;
    for _ in 0..ticks {
        for action in pilot.advance() {
            if action == Action::Fire {
                scene.spawn_projectile();
            }
        }
        scene.update(&*pilot, dt);
        events += scene.drain_events().len();
    }
    events
}

/// Frontend for headless play: feeds autopilot input through the same
/// [`InputContext`] path a window would, and logs instead of drawing.
pub struct Headless {
    pilot: Autopilot,
    seconds: f64,
    elapsed: f64,
    since_report: f64,
    entered: bool,
    timer: FrameTimer,
}

impl Headless {
    pub fn new(pilot: Autopilot, seconds: f64) -> Self {
        Self {
            pilot,
            seconds,
            elapsed: 0.0,
            since_report: 0.0,
            entered: false,
            timer: FrameTimer::new(120),
        }
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }
}

impl Frontend for Headless {
    fn pump(&mut self, input: &mut InputContext) -> Vec<Action> {
        if !self.entered {
            input.mouse.on_cursor_enter(true);
            self.entered = true;
        }
        let actions = self.pilot.advance();
        let cursor = self.pilot.cursor();
        input.mouse.on_cursor_moved(cursor.x as f64, cursor.y as f64);
        for key in Key::ALL {
            input.keys.set(key, self.pilot.is_pressed(key));
        }
        actions
    }

    fn present(&mut self, scene: &Scene, stats: &FrameStats) {
        self.elapsed += stats.frame_time;
        self.since_report += stats.frame_time;
        if stats.frame > 0 {
            self.timer.record(Duration::from_secs_f64(stats.frame_time));
        }

        for event in scene.events() {
            match event {
                SceneEvent::Killed { enemy, at, .. } => tracing::info!(
                    at,
                    position = ?enemy.position,
                    killed = scene.killed_count(),
                    "enemy down"
                ),
                other => tracing::debug!(event = ?other, "scene event"),
            }
        }

        if self.since_report >= 1.0 {
            self.since_report = 0.0;
            let hud = SceneInspector::hud(scene, stats.frame_time, stats.time_speed);
            tracing::info!(avg_fps = self.timer.average_fps(), "{hud}");
        }
    }

    fn should_exit(&self) -> bool {
        self.elapsed >= self.seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_kernel::SceneConfig;

    #[test]
    fn fires_on_cadence() {
        let mut pilot = Autopilot::new(3);
        let fired: Vec<bool> = (0..6).map(|_| !pilot.advance().is_empty()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn strafes_one_way_at_a_time() {
        let mut pilot = Autopilot::new(FIRE_EVERY);
        assert!(pilot.is_pressed(Key::Left));
        assert!(!pilot.is_pressed(Key::Right));
        for _ in 0..STRAFE_PERIOD {
            pilot.advance();
        }
        assert!(pilot.is_pressed(Key::Right));
        assert!(!pilot.is_pressed(Key::Forward));
    }

    #[test]
    fn scripted_runs_are_deterministic() {
        let run = || {
            let mut pilot = Autopilot::new(FIRE_EVERY);
            let mut scene = Scene::with_config(SceneConfig::default(), &pilot, 42);
            let events = run_scripted(&mut scene, &mut pilot, 300, 1.0 / 60.0);
            (scene.state_hash(), events)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn headless_exits_after_its_time() {
        let mut headless = Headless::new(Autopilot::new(FIRE_EVERY), 0.5);
        assert!(!headless.should_exit());
        let input = InputContext::new();
        let scene = Scene::new(&input, 0);
        let stats = FrameStats {
            frame: 1,
            frame_time: 0.5,
            scaled_time: 0.5,
            time_speed: 1.0,
        };
        headless.present(&scene, &stats);
        assert!(headless.should_exit());
        assert_eq!(headless.timer().count(), 1);
    }
}
