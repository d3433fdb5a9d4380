//! CPU-side quad geometry.
//!
//! Builds the triangle list uploaded into the vertex buffer. Everything here is
//! pure data construction; nothing touches the GPU.

mod quad;
mod vertex;

pub use quad::{triangulate, GeometryError, QuadCorners, QuadMesh, QUAD_VERTEX_COUNT};
pub use vertex::Vertex;
