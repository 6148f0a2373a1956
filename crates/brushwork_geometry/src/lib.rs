//! # Brushwork Geometry
//!
//! Reconstructs the polygons of a convex brush from nothing but its
//! bounding planes.
//!
//! ## Algorithm
//!
//! 1. Intersect every triple of planes (`O(N^3)`, N is small)
//! 2. Keep the points that lie inside every half-space
//! 3. Weld points closer than the weld tolerance
//! 4. Per face: collect the points on its plane, wind them, fan them
//! 5. Project UVs in source space, then convert to Y-up output space
//!
//! The result is one `Fragment` per surviving face, so callers can sort
//! faces by material and purpose without rebuilding the solid.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod fragment;
pub mod polygon;
pub mod solid_builder;
pub mod transform;
pub mod uv;

pub use error::{GeometryError, GeometryResult};
pub use fragment::{Fragment, FragmentVertex};
pub use solid_builder::{BuiltSolid, GeometrySettings, SolidBuilder, DEFAULT_MAX_FACES};
pub use transform::CoordinateTransform;
