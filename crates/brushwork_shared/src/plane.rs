//! # Half-Space Planes
//!
//! A brush side is the boundary of a half-space. The map format stores it
//! as three points; we store a unit normal and an offset.
//!
//! ## Orientation
//!
//! For points `p1 p2 p3` as written in the map, the normal is
//! `normalize((p3 - p1) × (p2 - p1))`. With the winding the editor writes,
//! this points **out of** the solid, so a point is inside the brush when
//! `signed_distance(p) <= epsilon` for every side. The unit-cube tests
//! below use the editor's own winding and pin this down.

use crate::constants::PARALLEL_EPSILON;
use crate::math::Vec3;

/// A plane `normal · x = offset` with a unit, outward-facing normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal, pointing out of the solid.
    pub normal: Vec3,
    /// Signed distance of the plane from the origin along `normal`.
    pub offset: f64,
}

impl Plane {
    /// Creates a plane from a normal and offset. The normal is normalized.
    ///
    /// Returns `None` if the normal has zero length.
    #[must_use]
    pub fn new(normal: Vec3, offset: f64) -> Option<Self> {
        let len = normal.length();
        let unit = normal.try_normalize()?;
        Some(Self {
            normal: unit,
            offset: offset / len,
        })
    }

    /// Derives a plane from three points in map winding order.
    ///
    /// Returns `None` if the points are collinear (or coincident).
    #[must_use]
    pub fn from_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Option<Self> {
        let normal = (p3 - p1).cross(p2 - p1).try_normalize()?;
        Some(Self {
            normal,
            offset: normal.dot(p1),
        })
    }

    /// Signed distance from the plane. Positive is outside the solid.
    #[inline]
    #[must_use]
    pub fn signed_distance(&self, point: Vec3) -> f64 {
        self.normal.dot(point) - self.offset
    }

    /// True if `point` is on the inner side of the plane or on it.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Vec3, epsilon: f64) -> bool {
        self.signed_distance(point) <= epsilon
    }

    /// True if `point` lies on the plane within `epsilon`.
    #[inline]
    #[must_use]
    pub fn is_on_plane(&self, point: Vec3, epsilon: f64) -> bool {
        self.signed_distance(point).abs() <= epsilon
    }

    /// The same plane facing the other way.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// The single point shared by three planes.
    ///
    /// `P = (d1·(n2×n3) + d2·(n3×n1) + d3·(n1×n2)) / (n1·(n2×n3))`
    ///
    /// Returns `None` when two or more of the planes are parallel.
    #[must_use]
    pub fn intersect(a: &Self, b: &Self, c: &Self) -> Option<Vec3> {
        let n2_x_n3 = b.normal.cross(c.normal);
        let denom = a.normal.dot(n2_x_n3);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let point = (n2_x_n3 * a.offset
            + c.normal.cross(a.normal) * b.offset
            + a.normal.cross(b.normal) * c.offset)
            / denom;

        point.is_finite().then_some(point)
    }
}
