//! # Geometry Error Types
//!
//! Ways a single solid can fail to reconstruct. None of them are fatal
//! to a map load; the world builder logs, counts and skips.

use thiserror::Error;

/// Why a solid produced no geometry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// Fewer than four planes cannot enclose a volume.
    #[error("solid has {faces} faces, at least 4 are needed")]
    TooFewFaces {
        /// Faces the solid has.
        faces: usize,
    },

    /// The planes do not enclose a volume (open, flat or inverted).
    #[error("solid has {vertices} unique vertices, at least 4 are needed")]
    TooFewVertices {
        /// Vertices that survived the containment filter.
        vertices: usize,
    },

    /// Refused before the cubic vertex search.
    #[error("solid has {faces} faces, limit is {limit}")]
    TooManyFaces {
        /// Faces the solid has.
        faces: usize,
        /// Configured limit.
        limit: usize,
    },
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
