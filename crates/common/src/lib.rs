//! Shared pose types for the arena game.
//!
//! # Invariants
//! - Poses carry no scale; scale is a draw-time concern.
//! - `AngleTransform::pitch` stays within `[-PI/2, PI/2]` when mutated
//!   through [`AngleTransform::look`].

pub mod types;

pub use types::{AngleTransform, QuatTransform, FORWARD, RIGHT, UP};
