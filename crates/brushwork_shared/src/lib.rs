//! # Brushwork Shared
//!
//! Geometric primitives used by every stage of the map pipeline.
//!
//! ## Coordinate Conventions
//!
//! All types here are convention-agnostic. The map source is Z-up; the
//! geometry stage converts to Y-up right before emitting fragments.
//! Reconstruction math runs in `f64` because plane intersections of large
//! brushes lose too much precision in `f32`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;
pub mod plane;

pub use constants::{DEFAULT_PLANE_EPSILON, DEFAULT_WELD_TOLERANCE, PARALLEL_EPSILON};
pub use math::{Aabb, Vec2, Vec3};
pub use plane::Plane;
