//! One-shot rendering: upload the quad, clear the surface once, submit once.
//!
//! Everything here talks to the GPU through [`crate::device::RenderDevice`], so
//! the sequence runs the same against wgpu and against an in-memory host.

mod pass;
mod startup;

pub use pass::ClearPass;
pub use startup::{startup, Session, VertexBuffer};
