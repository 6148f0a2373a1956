//! # Mesh Merging
//!
//! Fragments collected in one bucket are merged into one mesh.
//!
//! - Visual: flat normals recomputed per triangle, then identical
//!   `(position, normal, uv)` corners are shared. Faces with different
//!   normals never share a corner, so hard edges stay hard.
//! - Collision: positions only, welded within a tolerance through a
//!   spatial hash, triangles collapsed by welding are dropped.
//!
//! Both accumulate in `f64` and convert to `f32` once at the end.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use brushwork_geometry::{Fragment, FragmentVertex};
use brushwork_shared::{Aabb, Vec3};
use bytemuck::{Pod, Zeroable};

use crate::chunk::ChunkCoord;
use crate::material::PlaceholderMaterial;

/// GPU vertex: 32 bytes, tightly packed.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position (Y-up, scaled).
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Texture coordinate in texels.
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Bitwise identity, with `-0.0` folded into `0.0`.
    fn weld_key(&self) -> [u32; 8] {
        let bits = |v: f32| if v == 0.0 { 0 } else { v.to_bits() };
        [
            bits(self.position[0]),
            bits(self.position[1]),
            bits(self.position[2]),
            bits(self.normal[0]),
            bits(self.normal[1]),
            bits(self.normal[2]),
            bits(self.uv[0]),
            bits(self.uv[1]),
        ]
    }
}

/// One merged render batch: every visible face of one material in one
/// chunk.
#[derive(Clone, Debug)]
pub struct VisualMesh {
    /// Chunk the batch belongs to.
    pub chunk: ChunkCoord,
    /// Normalized material name.
    pub material: String,
    /// Placeholder material resolved for `material`.
    pub placeholder: Arc<PlaceholderMaterial>,
    /// Shared vertices.
    pub vertices: Vec<MeshVertex>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
    /// Bounds of all vertices.
    pub bounds: Aabb,
}

impl VisualMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of distinct corner positions, ignoring normals and UVs.
    #[must_use]
    pub fn unique_positions(&self) -> usize {
        self.vertices
            .iter()
            .map(|v| v.position.map(|c| if c == 0.0 { 0 } else { c.to_bits() }))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Vertex buffer contents, ready for upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer contents, ready for upload.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// One static triangle-mesh collision shape for a chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionMesh {
    /// Chunk the shape belongs to.
    pub chunk: ChunkCoord,
    /// World-space positions (Y-up, scaled).
    pub positions: Vec<[f32; 3]>,
    /// Triangles indexing `positions`.
    pub indices: Vec<[u32; 3]>,
    /// Bounds of all positions.
    pub bounds: Aabb,
}

impl CollisionMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Each triangle as three positions.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.iter().map(move |&[a, b, c]| {
            [
                self.positions[a as usize],
                self.positions[b as usize],
                self.positions[c as usize],
            ]
        })
    }
}

/// Triangles of one (chunk, material) bucket waiting to be merged.
#[derive(Clone, Debug, Default)]
pub struct VisualAccumulator {
    triangles: Vec<[MeshVertex; 3]>,
    bounds: Aabb,
}

impl VisualAccumulator {
    /// Adds every triangle of a fragment.
    pub fn push(&mut self, fragment: &Fragment) {
        for corners in fragment.triangle_vertices() {
            let normal = flat_normal(&corners).unwrap_or(fragment.normal);
            for c in &corners {
                self.bounds.extend(c.position);
            }
            self.triangles.push(corners.map(|c| MeshVertex {
                position: c.position.to_f32_array(),
                normal: normal.to_f32_array(),
                uv: c.uv.to_f32_array(),
            }));
        }
    }

    /// Triangles collected so far.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Merges into an indexed mesh.
    #[must_use]
    pub fn finish(
        self,
        chunk: ChunkCoord,
        material: String,
        placeholder: Arc<PlaceholderMaterial>,
    ) -> VisualMesh {
        let mut lookup: HashMap<[u32; 8], u32> = HashMap::with_capacity(self.triangles.len() * 2);
        let mut vertices = Vec::with_capacity(self.triangles.len() * 2);
        let mut indices = Vec::with_capacity(self.triangles.len() * 3);

        for corner in self.triangles.iter().flatten() {
            let index = *lookup.entry(corner.weld_key()).or_insert_with(|| {
                vertices.push(*corner);
                (vertices.len() - 1) as u32
            });
            indices.push(index);
        }

        VisualMesh {
            chunk,
            material,
            placeholder,
            vertices,
            indices,
            bounds: self.bounds,
        }
    }
}

/// Triangles of one chunk's collision bucket waiting to be merged.
#[derive(Clone, Debug, Default)]
pub struct CollisionAccumulator {
    triangles: Vec<[Vec3; 3]>,
    bounds: Aabb,
}

impl CollisionAccumulator {
    /// Adds every triangle of a fragment.
    pub fn push(&mut self, fragment: &Fragment) {
        for corners in fragment.triangle_vertices() {
            for c in &corners {
                self.bounds.extend(c.position);
            }
            self.triangles.push(corners.map(|c| c.position));
        }
    }

    /// Triangles collected so far.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Merges into a collision mesh.
    ///
    /// With `weld_tolerance` set, corners closer than it share one
    /// position and triangles that collapse are dropped. Without it,
    /// every triangle keeps three positions of its own.
    #[must_use]
    pub fn finish(self, chunk: ChunkCoord, weld_tolerance: Option<f64>) -> CollisionMesh {
        let mut positions = Vec::new();
        let mut indices = Vec::with_capacity(self.triangles.len());

        match weld_tolerance {
            Some(tolerance) => {
                let mut welder = Welder::new(tolerance);
                for triangle in &self.triangles {
                    let [a, b, c] = triangle.map(|p| welder.index_of(p));
                    if a != b && b != c && a != c {
                        indices.push([a, b, c]);
                    }
                }
                let dropped = self.triangles.len() - indices.len();
                if dropped > 0 {
                    tracing::debug!("chunk {chunk}: {dropped} collision triangles collapsed by welding");
                }
                positions = welder.positions.iter().map(|p| p.to_f32_array()).collect();
            }
            None => {
                for triangle in &self.triangles {
                    let base = positions.len() as u32;
                    positions.extend(triangle.iter().map(|p| p.to_f32_array()));
                    indices.push([base, base + 1, base + 2]);
                }
            }
        }

        CollisionMesh {
            chunk,
            positions,
            indices,
            bounds: self.bounds,
        }
    }
}

/// Unit normal of a counter-clockwise triangle, `None` if it has no area.
fn flat_normal(corners: &[FragmentVertex; 3]) -> Option<Vec3> {
    let [a, b, c] = corners;
    (b.position - a.position)
        .cross(c.position - a.position)
        .try_normalize()
}

/// Spatial hash that merges positions closer than a tolerance.
struct Welder {
    tolerance: f64,
    cells: HashMap<[i64; 3], Vec<u32>>,
    positions: Vec<Vec3>,
}

impl Welder {
    fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            cells: HashMap::new(),
            positions: Vec::new(),
        }
    }

    fn cell(&self, p: Vec3) -> [i64; 3] {
        [
            (p.x / self.tolerance).floor() as i64,
            (p.y / self.tolerance).floor() as i64,
            (p.z / self.tolerance).floor() as i64,
        ]
    }

    fn index_of(&mut self, p: Vec3) -> u32 {
        let [cx, cy, cz] = self.cell(p);

        // Cells are one tolerance wide, so any match is in a neighbour
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(candidates) = self.cells.get(&[cx + dx, cy + dy, cz + dz]) else {
                        continue;
                    };
                    for &i in candidates {
                        if self.positions[i as usize].distance(p) <= self.tolerance {
                            return i;
                        }
                    }
                }
            }
        }

        let index = self.positions.len() as u32;
        self.positions.push(p);
        self.cells.entry([cx, cy, cz]).or_default().push(index);
        index
    }
}
