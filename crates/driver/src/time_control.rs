use arena_input::Action;

/// Factor applied per speed-up or slow-down step.
pub const SPEED_STEP: f64 = 1.25;

/// Simulation time multiplier.
///
/// Scaled time is what the scene and the render clock see; wall time only
/// paces frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeControl {
    speed: f64,
}

impl Default for TimeControl {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

impl TimeControl {
    pub fn new(speed: f64) -> Self {
        debug_assert!(speed.is_finite() && speed >= 0.0, "bad time speed {speed}");
        Self { speed }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn speed_up(&mut self) {
        self.speed *= SPEED_STEP;
        tracing::debug!(speed = self.speed, "time speed up");
    }

    pub fn slow_down(&mut self) {
        self.speed /= SPEED_STEP;
        tracing::debug!(speed = self.speed, "time slow down");
    }

    /// Scale a wall-clock interval into simulation time.
    pub fn apply(&self, elapsed: f64) -> f64 {
        elapsed * self.speed
    }

    /// React to a time action. Returns whether the action was consumed.
    pub fn handle(&mut self, action: Action) -> bool {
        match action {
            Action::TimeFaster => self.speed_up(),
            Action::TimeSlower => self.slow_down(),
            _ => return false,
        }
        true
    }
}
