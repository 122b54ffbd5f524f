use glam::Vec2;

/// Accumulates relative cursor motion, robust to focus changes.
///
/// The windowing layer calls [`on_cursor_enter`](Self::on_cursor_enter) and
/// [`on_cursor_moved`](Self::on_cursor_moved). After start and after every
/// enter/leave, the first move only sets a baseline and contributes no delta,
/// so alt-tab cursor jumps never reach the camera.
#[derive(Debug, Clone, Default)]
pub struct MouseTracker {
    accumulated: Vec2,
    baseline: Option<Vec2>,
    inside: bool,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated offset since construction. No clamping, no decay.
    pub fn position(&self) -> Vec2 {
        self.accumulated
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Cursor entered (`true`) or left (`false`) the window.
    pub fn on_cursor_enter(&mut self, entered: bool) {
        self.inside = entered;
        self.baseline = None;
        tracing::trace!(entered, "cursor focus changed");
    }

    /// Cursor moved to absolute window coordinates `(x, y)`.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        if !self.inside {
            return;
        }
        let cursor = Vec2::new(x as f32, y as f32);
        if let Some(prev) = self.baseline {
            self.accumulated += cursor - prev;
        }
        self.baseline = Some(cursor);
    }
}
