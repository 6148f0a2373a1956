//! # Geometric Tolerances
//!
//! Defaults shared by the reconstructor and the world builder.
//! Both can be overridden through the build configuration.

// =============================================================================
// TOLERANCES
// =============================================================================

/// Distance (map units) within which a point counts as lying on a plane.
pub const DEFAULT_PLANE_EPSILON: f64 = 1e-3;

/// Distance (map units) under which two candidate vertices are merged.
pub const DEFAULT_WELD_TOLERANCE: f64 = 1e-2;

/// Minimum |n1 · (n2 × n3)| for three planes to meet in a single point.
pub const PARALLEL_EPSILON: f64 = 1e-6;
