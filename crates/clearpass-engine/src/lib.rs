//! clearpass engine crate.
//!
//! Brings up a wgpu device on a window surface, uploads a quad's vertex buffer
//! and clears the surface in a single submitted render pass.

pub mod coords;
pub mod device;
pub mod geometry;
pub mod logging;
pub mod render;
pub mod window;
