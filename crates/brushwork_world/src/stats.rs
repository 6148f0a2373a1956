//! Build statistics.

use std::fmt;

/// Counters from one world build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Solids in the map (world and entities).
    pub solids_seen: usize,
    /// Solids that produced geometry.
    pub solids_built: usize,
    /// Solids skipped because they enclose no volume.
    pub solids_degenerate: usize,
    /// Solids refused by the face-count limit.
    pub solids_rejected: usize,
    /// Solids kept out of collision by their entity class.
    pub solids_non_solid: usize,
    /// Faces that touched fewer than three vertices.
    pub faces_degenerate: usize,
    /// Fragments produced by reconstruction.
    pub fragments: usize,
    /// Triangles across all visual meshes.
    pub visual_triangles: usize,
    /// Triangles across all collision meshes.
    pub physics_triangles: usize,
    /// Visual meshes emitted (one per chunk and material).
    pub visual_buckets: usize,
    /// Collision meshes emitted (one per chunk).
    pub physics_chunks: usize,
    /// Spawn points extracted.
    pub spawn_points: usize,
}

impl BuildStats {
    /// Solids that produced nothing.
    #[must_use]
    pub const fn solids_skipped(&self) -> usize {
        self.solids_degenerate + self.solids_rejected
    }

    /// True if every solid in the map was built.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.solids_skipped() == 0
    }
}

impl fmt::Display for BuildStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} solids built ({} degenerate, {} rejected), {} visual meshes ({} tris), {} collision chunks ({} tris), {} spawns",
            self.solids_built,
            self.solids_seen,
            self.solids_degenerate,
            self.solids_rejected,
            self.visual_buckets,
            self.visual_triangles,
            self.physics_chunks,
            self.physics_triangles,
            self.spawn_points
        )
    }
}
