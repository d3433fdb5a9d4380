use std::fmt;

use crate::coords::{Bounds, Vec2};

use super::Vertex;

/// Number of vertices in a triangulated quad (two triangles, no index buffer).
pub const QUAD_VERTEX_COUNT: usize = 6;

/// The four corners of an axis-aligned square in NDC.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadCorners {
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
    pub top_right: Vec2,
    pub top_left: Vec2,
}

impl QuadCorners {
    /// Corners of an axis-aligned box given its min and max points.
    #[inline]
    pub const fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            bottom_left: min,
            bottom_right: Vec2::new(max.x, min.y),
            top_right: max,
            top_left: Vec2::new(min.x, max.y),
        }
    }

    /// Square centered on the origin with the given half extent.
    #[inline]
    pub const fn centered(half_extent: f32) -> Self {
        Self::from_min_max(
            Vec2::new(-half_extent, -half_extent),
            Vec2::new(half_extent, half_extent),
        )
    }

    /// Corners in counter-clockwise order starting at the bottom left.
    #[inline]
    pub fn ccw(self) -> [Vec2; 4] {
        [self.bottom_left, self.bottom_right, self.top_right, self.top_left]
    }
}

impl Default for QuadCorners {
    /// The demo square, spanning 80% of the surface in each direction.
    fn default() -> Self {
        Self::centered(0.8)
    }
}

/// Why a set of corners cannot be triangulated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A coordinate is NaN or infinite.
    NonFinite,
    /// Edges are not parallel to the axes.
    NotAxisAligned,
    /// Width or height is zero or negative, or too small for a non-zero triangle area.
    Degenerate,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::NonFinite => f.write_str("quad corner has a non-finite coordinate"),
            GeometryError::NotAxisAligned => f.write_str("quad corners are not axis-aligned"),
            GeometryError::Degenerate => f.write_str("quad has no triangle area"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Two counter-clockwise triangles tiling a square.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadMesh {
    vertices: [Vertex; QUAD_VERTEX_COUNT],
}

impl QuadMesh {
    /// Byte size of the serialized vertex array.
    pub const BYTE_LEN: u64 = (QUAD_VERTEX_COUNT * std::mem::size_of::<Vertex>()) as u64;

    #[inline]
    pub fn vertices(&self) -> &[Vertex; QUAD_VERTEX_COUNT] {
        &self.vertices
    }

    /// Raw bytes as written into the vertex buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn byte_len(&self) -> u64 {
        self.as_bytes().len() as u64
    }

    /// Vertex positions flattened as `[x0, y0, x1, y1, ...]`.
    pub fn to_flat(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.pos).collect()
    }

    /// Iterates the triangles of the list.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec2; 3]> + '_ {
        self.vertices.chunks_exact(3).map(|t| {
            [
                Vec2::from(t[0].pos),
                Vec2::from(t[1].pos),
                Vec2::from(t[2].pos),
            ]
        })
    }

    /// Sum of the absolute triangle areas.
    pub fn area(&self) -> f32 {
        self.triangles().map(|t| triangle_area(t).abs()).sum()
    }

    /// Bounding box of all vertices.
    pub fn bounds(&self) -> Bounds {
        Bounds::enclosing(self.vertices.iter().map(|v| Vec2::from(v.pos))).unwrap_or_default()
    }

    pub fn has_degenerate_triangle(&self) -> bool {
        self.triangles().any(|t| triangle_area(t) == 0.0)
    }
}

impl Default for QuadMesh {
    fn default() -> Self {
        // The default corners always triangulate.
        triangulate(QuadCorners::default()).unwrap_or(QuadMesh {
            vertices: [Vertex::default(); QUAD_VERTEX_COUNT],
        })
    }
}

/// Splits a square into two triangles sharing the bottom-left/top-right diagonal.
///
/// Emits `{BL, BR, TR}` then `{TR, TL, BL}`; both wind counter-clockwise.
pub fn triangulate(corners: QuadCorners) -> Result<QuadMesh, GeometryError> {
    let QuadCorners {
        bottom_left: bl,
        bottom_right: br,
        top_right: tr,
        top_left: tl,
    } = corners;

    if !corners.ccw().iter().all(|c| c.is_finite()) {
        return Err(GeometryError::NonFinite);
    }

    let aligned = bl.y == br.y && tl.y == tr.y && bl.x == tl.x && br.x == tr.x;
    if !aligned {
        return Err(GeometryError::NotAxisAligned);
    }

    if Bounds::new(bl, tr).is_empty() {
        return Err(GeometryError::Degenerate);
    }

    let v = |p: Vec2| Vertex::new(p.x, p.y);
    let mesh = QuadMesh {
        vertices: [v(bl), v(br), v(tr), v(tr), v(tl), v(bl)],
    };

    // A positive extent can still underflow to a zero triangle area.
    if mesh.has_degenerate_triangle() {
        return Err(GeometryError::Degenerate);
    }

    Ok(mesh)
}

/// Signed area; positive for counter-clockwise winding.
#[inline]
fn triangle_area([a, b, c]: [Vec2; 3]) -> f32 {
    0.5 * (b - a).cross(c - a)
}
