//! Per-face output of the reconstructor.

use brushwork_shared::{Aabb, Vec2, Vec3};

/// One polygon corner in output space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FragmentVertex {
    /// Position (Y-up, scaled).
    pub position: Vec3,
    /// Face normal (Y-up, unit).
    pub normal: Vec3,
    /// Texture coordinate in texels.
    pub uv: Vec2,
}

/// The triangulated polygon of one face of one solid.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    /// Index of the side within its solid.
    pub side_index: usize,
    /// Material as written on the side.
    pub material: String,
    /// The side carries a displacement.
    pub displacement: bool,
    /// Outward face normal (Y-up, unit).
    pub normal: Vec3,
    /// Polygon corners, counter-clockwise seen from outside.
    pub vertices: Vec<FragmentVertex>,
    /// Fan triangles indexing `vertices`.
    pub triangles: Vec<[u32; 3]>,
}

impl Fragment {
    /// Bounds of the polygon.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let mut bounds = Aabb::EMPTY;
        for v in &self.vertices {
            bounds.extend(v.position);
        }
        bounds
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Each triangle as three vertices.
    pub fn triangle_vertices(&self) -> impl Iterator<Item = [FragmentVertex; 3]> + '_ {
        self.triangles.iter().map(move |&[a, b, c]| {
            [
                self.vertices[a as usize],
                self.vertices[b as usize],
                self.vertices[c as usize],
            ]
        })
    }
}
