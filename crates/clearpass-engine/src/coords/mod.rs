//! Coordinate and color types shared by geometry and the render pass.
//!
//! Geometry lives in normalized device coordinates:
//! - Origin at the surface center
//! - +X right, +Y up
//! - Visible range [-1, 1] on both axes

mod bounds;
mod color;
mod vec2;

pub use bounds::Bounds;
pub use color::ColorRgba;
pub use vec2::Vec2;
