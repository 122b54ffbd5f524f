use std::collections::VecDeque;
use std::time::Duration;

/// A frame slower than this multiple of the window average is logged.
const SLOW_FRAME_FACTOR: u32 = 3;

/// Rolling window over the most recent frame times.
#[derive(Debug)]
pub struct FrameTimer {
    window: VecDeque<Duration>,
    capacity: usize,
    total: Duration,
}

impl FrameTimer {
    /// Timer keeping the last `capacity` frames (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            total: Duration::ZERO,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        if self.window.len() >= SLOW_FRAME_FACTOR as usize
            && dt > self.average() * SLOW_FRAME_FACTOR
        {
            tracing::debug!(?dt, average = ?self.average(), "slow frame");
        }
        if self.window.len() == self.capacity {
            if let Some(oldest) = self.window.pop_front() {
                self.total -= oldest;
            }
        }
        self.window.push_back(dt);
        self.total += dt;
    }

    /// Most recently recorded frame.
    pub fn latest(&self) -> Option<Duration> {
        self.window.back().copied()
    }

    pub fn average(&self) -> Duration {
        match self.window.len() {
            0 => Duration::ZERO,
            n => self.total / n as u32,
        }
    }

    pub fn max(&self) -> Duration {
        self.window.iter().copied().max().unwrap_or_default()
    }

    pub fn min(&self) -> Duration {
        self.window.iter().copied().min().unwrap_or_default()
    }

    /// Frames per second over the window; 0 before any frame.
    pub fn average_fps(&self) -> f64 {
        let avg = self.average().as_secs_f64();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }

    /// Frames currently in the window.
    pub fn count(&self) -> usize {
        self.window.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fresh_timer_is_zeroed() {
        let timer = FrameTimer::new(4);
        assert_eq!(timer.count(), 0);
        assert_eq!(timer.latest(), None);
        assert_eq!(timer.average(), Duration::ZERO);
        assert_eq!(timer.max(), Duration::ZERO);
        assert_eq!(timer.average_fps(), 0.0);
    }

    #[test]
    fn stats_over_a_partial_window() {
        let mut timer = FrameTimer::new(10);
        for v in [16, 17, 15, 40] {
            timer.record(ms(v));
        }
        assert_eq!(timer.count(), 4);
        assert_eq!(timer.latest(), Some(ms(40)));
        assert_eq!(timer.average(), ms(22));
        assert_eq!((timer.min(), timer.max()), (ms(15), ms(40)));
    }

    #[test]
    fn oldest_frames_fall_out_of_the_window() {
        let mut timer = FrameTimer::new(3);
        for v in [100, 10, 10, 10] {
            timer.record(ms(v));
        }
        // The 100 ms hitch is gone.
        assert_eq!(timer.count(), 3);
        assert_eq!(timer.max(), ms(10));
        assert_eq!(timer.average(), ms(10));
    }

    #[test]
    fn zero_capacity_keeps_one_frame() {
        let mut timer = FrameTimer::new(0);
        timer.record(ms(5));
        timer.record(ms(7));
        assert_eq!(timer.count(), 1);
        assert_eq!(timer.latest(), Some(ms(7)));
    }

    #[test]
    fn fps_from_average() {
        let mut timer = FrameTimer::new(8);
        timer.record(ms(20));
        timer.record(ms(20));
        assert!((timer.average_fps() - 50.0).abs() < 1e-9);
    }
}
