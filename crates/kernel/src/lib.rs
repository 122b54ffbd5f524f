//! Scene kernel: authoritative game state and the per-tick simulation.
//!
//! # Invariants
//! - The scene owns every entity list; collaborators only read them.
//! - `update` is pure with respect to its inputs: the same seed, config and
//!   sequence of inputs and elapsed times yields bit-identical state.
//! - Player pitch stays within `[-PI/2, PI/2]` after every update.
//! - Dying objects are dropped once their death animation has run out.

pub mod collision;
pub mod config;
pub mod dying;
pub mod event;
pub mod scene;

pub use config::{ConfigError, SceneConfig, SpawnPolicy};
pub use dying::{DyingKind, DyingObject};
pub use event::SceneEvent;
pub use scene::Scene;
