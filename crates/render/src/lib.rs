//! Rendering adapter: turns scene state into a renderer-agnostic draw list.
//!
//! # Invariants
//! - Renderers read the scene, never mutate it.
//! - A frame derives only from scene state, the player's view and the render
//!   clock.
//!
//! GPU backends are out of tree; they consume [`DrawList`] and implement
//! [`Renderer`]. The [`DebugTextRenderer`] serves the CLI and tests.

mod draw_list;
mod renderer;

pub use draw_list::{DrawInstance, DrawList, Explosion, MeshKind};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "arena-render v0.1.0"
}
