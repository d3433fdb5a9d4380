//! GPU device + surface management.
//!
//! This module is responsible for:
//! - the host seam (`GraphicsHost` / `RenderDevice`) the startup sequence runs against
//! - the wgpu implementation of that seam, bound to a window surface
//! - surface format and alpha mode selection

mod error;
mod frame;
mod gpu;
mod host;
mod init;
mod surface;

pub use error::SetupError;
pub use frame::FrameCommands;
pub use gpu::{Gpu, WgpuHost};
pub use host::{BufferRequest, GraphicsHost, RenderDevice};
pub use init::GpuInit;
