//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, and runs the GPU startup
//! sequence once the window exists.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, SceneConfig};
