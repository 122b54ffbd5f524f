use arena_input::{Action, InputContext};
use arena_kernel::{Scene, SceneConfig};

use crate::clock::Clock;
use crate::config::LoopConfig;
use crate::time_control::TimeControl;

/// What the loop needs from the outside world: events in, pictures out.
///
/// A windowed build pumps its event queue and draws; a headless run scripts
/// input and logs.
pub trait Frontend {
    /// Deliver pending events into `input` and return the one-shot actions
    /// they produced, in order.
    fn pump(&mut self, input: &mut InputContext) -> Vec<Action>;

    /// Draw the scene after this frame's update. Read-only.
    ///
    /// `scene.events()` holds exactly this frame's events; the loop drains
    /// them once `present` returns.
    fn present(&mut self, scene: &Scene, stats: &FrameStats);

    /// Checked once before every frame.
    fn should_exit(&self) -> bool;
}

/// Timing of one completed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Zero-based frame number.
    pub frame: u64,
    /// Wall time of the previous frame that this frame simulated, seconds.
    pub frame_time: f64,
    /// `frame_time` after time-speed scaling; what the scene advanced by.
    pub scaled_time: f64,
    pub time_speed: f64,
}

/// Variable-timestep loop with a frame-rate cap.
///
/// Each frame simulates the wall time the previous frame took (scaled by the
/// time speed), presents, then sleeps off whatever is left of the frame
/// interval. The first frame simulates zero time.
pub struct GameLoop<C: Clock> {
    config: LoopConfig,
    clock: C,
    input: InputContext,
    scene: Scene,
    time: TimeControl,
    frame: u64,
    pending: f64,
}

impl<C: Clock> GameLoop<C> {
    pub fn new(config: LoopConfig, clock: C, scene_config: SceneConfig, seed: u64) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid loop config");
        let input = InputContext::new();
        let scene = Scene::with_config(scene_config, &input, seed);
        Self {
            config,
            clock,
            input,
            scene,
            time: TimeControl::default(),
            frame: 0,
            pending: 0.0,
        }
    }

    pub fn with_time_speed(mut self, speed: f64) -> Self {
        self.time = TimeControl::new(speed);
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn input(&self) -> &InputContext {
        &self.input
    }

    pub fn time_control(&self) -> &TimeControl {
        &self.time
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Frames completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run frames until the frontend asks to exit. Returns the frame count.
    pub fn run(&mut self, frontend: &mut impl Frontend) -> u64 {
        let _span = tracing::info_span!("game_loop", seed = self.scene.seed()).entered();
        tracing::info!(
            target_fps = self.config.target_fps,
            time_speed = self.time.speed(),
            "game loop started"
        );
        while !frontend.should_exit() {
            self.step(frontend);
        }
        tracing::info!(
            frames = self.frame,
            sim_time = self.scene.time(),
            killed = self.scene.killed_count(),
            "game loop stopped"
        );
        self.frame
    }

    /// Run exactly one frame.
    pub fn step(&mut self, frontend: &mut impl Frontend) -> FrameStats {
        let _span = tracing::info_span!("frame", n = self.frame).entered();
        let start = self.clock.now();

        for action in frontend.pump(&mut self.input) {
            self.apply(action);
        }

        let frame_time = self.pending;
        let scaled_time = self.time.apply(frame_time);
        self.scene.update(&self.input, scaled_time);

        let stats = FrameStats {
            frame: self.frame,
            frame_time,
            scaled_time,
            time_speed: self.time.speed(),
        };
        frontend.present(&self.scene, &stats);
        let events = self.scene.drain_events().len();

        let work = self.clock.now() - start;
        if let Some(interval) = self.config.frame_interval() {
            let free = (interval - work).max(0.0);
            if free > 0.0 {
                self.clock.sleep(free);
            }
        }

        let wall = (self.clock.now() - start).max(0.0);
        if wall > self.config.max_frame_time {
            tracing::debug!(wall, max = self.config.max_frame_time, "frame time clamped");
        }
        self.pending = wall.min(self.config.max_frame_time);
        self.frame += 1;
        tracing::trace!(work, wall, events, "frame done");
        stats
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Fire => self.scene.spawn_projectile(),
            Action::TimeFaster | Action::TimeSlower => {
                self.time.handle(action);
            }
            Action::Noop => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use arena_input::Key;
    use std::collections::VecDeque;

    /// Frontend that replays queued actions and charges a fixed render cost.
    struct Scripted {
        clock: ManualClock,
        work: f64,
        actions: VecDeque<Vec<Action>>,
        hold: Option<Key>,
        frames_left: u64,
        presented: Vec<FrameStats>,
        events_seen: Vec<usize>,
    }

    impl Scripted {
        fn new(clock: &ManualClock, work: f64, frames: u64) -> Self {
            Self {
                clock: clock.clone(),
                work,
                actions: VecDeque::new(),
                hold: None,
                frames_left: frames,
                presented: Vec::new(),
                events_seen: Vec::new(),
            }
        }
    }

    impl Frontend for Scripted {
        fn pump(&mut self, input: &mut InputContext) -> Vec<Action> {
            if let Some(key) = self.hold {
                input.keys.set(key, true);
            }
            self.actions.pop_front().unwrap_or_default()
        }

        fn present(&mut self, scene: &Scene, stats: &FrameStats) {
            self.clock.advance(self.work);
            self.events_seen.push(scene.events().len());
            self.presented.push(*stats);
            self.frames_left = self.frames_left.saturating_sub(1);
        }

        fn should_exit(&self) -> bool {
            self.frames_left == 0
        }
    }

    fn quiet() -> SceneConfig {
        SceneConfig {
            max_enemies: 0,
            ..Default::default()
        }
    }

    fn game(clock: &ManualClock, config: LoopConfig) -> GameLoop<ManualClock> {
        GameLoop::new(config, clock.clone(), quiet(), 1)
    }

    #[test]
    fn first_frame_simulates_nothing() {
        let clock = ManualClock::new();
        let mut game = game(&clock, LoopConfig::default());
        let mut frontend = Scripted::new(&clock, 0.005, 1);
        let stats = game.step(&mut frontend);
        assert_eq!(stats.frame, 0);
        assert_eq!(stats.frame_time, 0.0);
        assert_eq!(game.scene().time(), 0.0);
        assert_eq!(game.scene().tick(), 1);
    }

    #[test]
    fn fast_frames_are_capped_to_interval() {
        let clock = ManualClock::new();
        let mut game = game(&clock, LoopConfig::default());
        let mut frontend = Scripted::new(&clock, 0.005, 3);
        game.run(&mut frontend);

        let interval = 1.0 / 60.0;
        assert!((frontend.presented[1].frame_time - interval).abs() < 1e-9);
        assert!((frontend.presented[2].frame_time - interval).abs() < 1e-9);
        assert!((clock.slept() - 3.0 * (interval - 0.005)).abs() < 1e-9);
    }

    #[test]
    fn slow_frames_do_not_sleep() {
        let clock = ManualClock::new();
        let mut game = game(&clock, LoopConfig::default());
        let mut frontend = Scripted::new(&clock, 0.05, 2);
        game.run(&mut frontend);

        assert_eq!(clock.slept(), 0.0);
        assert!((frontend.presented[1].frame_time - 0.05).abs() < 1e-12);
        assert!((game.scene().time() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn uncapped_loop_never_sleeps() {
        let clock = ManualClock::new();
        let config = LoopConfig {
            target_fps: 0,
            ..Default::default()
        };
        let mut game = game(&clock, config);
        let mut frontend = Scripted::new(&clock, 0.001, 5);
        game.run(&mut frontend);
        assert_eq!(clock.slept(), 0.0);
    }

    #[test]
    fn stalls_are_clamped() {
        let clock = ManualClock::new();
        let mut game = game(&clock, LoopConfig::default());
        let mut frontend = Scripted::new(&clock, 3.0, 2);
        game.run(&mut frontend);
        assert_eq!(frontend.presented[1].frame_time, 0.25);
        assert_eq!(game.scene().time(), 0.25);
    }

    #[test]
    fn time_speed_scales_scene_time() {
        let clock = ManualClock::new();
        let mut game = game(&clock, LoopConfig::default()).with_time_speed(2.0);
        let mut frontend = Scripted::new(&clock, 0.05, 2);
        game.run(&mut frontend);

        let last = frontend.presented[1];
        assert_eq!(last.time_speed, 2.0);
        assert!((last.scaled_time - 0.1).abs() < 1e-12);
        assert!((game.scene().time() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn time_actions_apply_before_update() {
        let clock = ManualClock::new();
        let mut game = game(&clock, LoopConfig::default());
        let mut frontend = Scripted::new(&clock, 0.05, 2);
        frontend.actions.push_back(vec![]);
        frontend.actions.push_back(vec![Action::TimeFaster]);
        game.run(&mut frontend);

        assert_eq!(game.time_control().speed(), 1.25);
        assert!((frontend.presented[1].scaled_time - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn fire_spawns_a_projectile() {
        let clock = ManualClock::new();
        let mut game = game(&clock, LoopConfig::default());
        let mut frontend = Scripted::new(&clock, 0.0, 1);
        frontend.actions.push_back(vec![Action::Fire, Action::Noop, Action::Fire]);
        game.run(&mut frontend);
        assert_eq!(game.scene().projectiles().len(), 2);
    }

    #[test]
    fn events_are_presented_once_then_drained() {
        let clock = ManualClock::new();
        let mut game = game(&clock, LoopConfig::default());
        let mut frontend = Scripted::new(&clock, 0.0, 3);
        frontend.actions.push_back(vec![Action::Fire]);
        game.run(&mut frontend);

        assert_eq!(frontend.events_seen, vec![1, 0, 0]);
        assert!(game.scene().events().is_empty());
    }

    #[test]
    fn held_keys_reach_the_scene() {
        let clock = ManualClock::new();
        let mut game = game(&clock, LoopConfig::default());
        let mut frontend = Scripted::new(&clock, 0.1, 2);
        frontend.hold = Some(Key::Forward);
        game.run(&mut frontend);

        assert!(game.input().keys.is_pressed(Key::Forward));
        // 0.1 s at 3 units/s straight ahead.
        assert!((game.scene().player().position.z + 0.3).abs() < 1e-5);
    }

    #[test]
    fn exit_is_checked_before_each_frame() {
        let clock = ManualClock::new();
        let mut game = game(&clock, LoopConfig::default());
        let mut frontend = Scripted::new(&clock, 0.0, 0);
        assert_eq!(game.run(&mut frontend), 0);
        assert_eq!(game.scene().tick(), 0);

        let mut frontend = Scripted::new(&clock, 0.0, 4);
        assert_eq!(game.run(&mut frontend), 4);
        assert_eq!(game.frame(), 4);
    }
}
