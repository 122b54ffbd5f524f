//! Driver: the outer game loop that turns wall-clock time into scene ticks.
//!
//! # Invariants
//! - One scene update per frame, scaled by the time-speed multiplier.
//! - The frame-rate cap only ever sleeps; it never skips or repeats updates.
//! - The loop owns the [`arena_input::InputContext`]; frontends feed it and the
//!   scene borrows it for the tick.

pub mod clock;
pub mod config;
pub mod game_loop;
pub mod time_control;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LoopConfig;
pub use game_loop::{FrameStats, Frontend, GameLoop};
pub use time_control::TimeControl;

pub fn crate_info() -> &'static str {
    "arena-driver v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("driver"));
    }
}
