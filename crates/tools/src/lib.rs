//! Developer tooling: scene inspector, HUD stats, frame timing.
//!
//! # Invariants
//! - Tools only read the scene.

mod frame_timer;
mod inspector;

pub use frame_timer::FrameTimer;
pub use inspector::{HudStats, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    "arena-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
