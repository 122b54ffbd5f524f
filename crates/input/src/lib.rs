//! Input: keyboard state, focus-robust mouse delta tracking and window event mapping.
//!
//! # Invariants
//! - No global input state. The owner of [`InputContext`] feeds it events and
//!   lends it to consumers by reference.
//! - Mouse tracking never produces a delta across a focus change.

pub mod action;
pub mod context;
pub mod keys;
pub mod mouse;
pub mod winit_adapter;

pub use action::Action;
pub use context::{InputContext, InputSource};
pub use keys::{Key, KeyState};
pub use mouse::MouseTracker;

pub fn crate_info() -> &'static str {
    "arena-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
