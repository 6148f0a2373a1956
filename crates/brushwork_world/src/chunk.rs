//! # Chunk Grid
//!
//! Output space is cut into cubes of `chunk_size` output units. A
//! fragment belongs to the chunk containing the centre of its bounding
//! box (nudged inward along its normal), so a face is never split
//! across chunks.
//!
//! Euclidean division keeps the grid uniform across the origin:
//! `-0.5` lands in chunk `-1`, not `0`.

use brushwork_shared::{Aabb, Vec3};

/// Integer coordinate of a chunk in the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkCoord {
    /// X index.
    pub x: i32,
    /// Y index (up).
    pub y: i32,
    /// Z index.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Chunk containing an output-space position.
    #[inline]
    #[must_use]
    pub fn from_position(position: Vec3, chunk_size: f64) -> Self {
        Self {
            x: position.x.div_euclid(chunk_size) as i32,
            y: position.y.div_euclid(chunk_size) as i32,
            z: position.z.div_euclid(chunk_size) as i32,
        }
    }

    /// Region of output space this chunk covers.
    #[must_use]
    pub fn bounds(self, chunk_size: f64) -> Aabb {
        let min = Vec3::new(
            f64::from(self.x) * chunk_size,
            f64::from(self.y) * chunk_size,
            f64::from(self.z) * chunk_size,
        );
        Aabb::new(min, min + Vec3::new(chunk_size, chunk_size, chunk_size))
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
