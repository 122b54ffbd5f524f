use arena_kernel::ConfigError;
use serde::{Deserialize, Serialize};

/// Frame pacing for the game loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Frames per second to cap at. Zero runs uncapped.
    pub target_fps: u32,
    /// Longest wall time a single frame may feed into the scene, seconds.
    /// Keeps a stall (debugger, window drag) from teleporting everything;
    /// during such a stall simulated time falls behind wall time.
    pub max_frame_time: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_frame_time: 0.25,
        }
    }
}

impl LoopConfig {
    /// Seconds per frame at the target rate, or `None` when uncapped.
    pub fn frame_interval(&self) -> Option<f64> {
        (self.target_fps > 0).then(|| 1.0 / self.target_fps as f64)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_frame_time.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "max_frame_time",
                value: self.max_frame_time,
            });
        }
        if self.max_frame_time <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "max_frame_time",
                value: self.max_frame_time,
            });
        }
        Ok(())
    }
}
