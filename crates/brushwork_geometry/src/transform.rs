//! Source space to output space.
//!
//! Maps are authored Z-up; the renderer and physics world are Y-up. The
//! conversion is a -90° rotation about X, `(x, y, z) -> (x, z, -y)`,
//! followed by a uniform unit scale. A rotation keeps handedness, so
//! triangle winding survives unchanged.

use brushwork_shared::Vec3;

/// Converts points and directions into output space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateTransform {
    /// Output units per map unit.
    pub unit_scale: f64,
}

impl CoordinateTransform {
    /// Rotation only.
    pub const UNSCALED: Self = Self { unit_scale: 1.0 };

    /// Creates a transform with the given unit scale.
    #[must_use]
    pub const fn new(unit_scale: f64) -> Self {
        Self { unit_scale }
    }

    /// Transforms a position (rotated and scaled).
    #[inline]
    #[must_use]
    pub fn point(&self, p: Vec3) -> Vec3 {
        Self::rotate(p) * self.unit_scale
    }

    /// Transforms a direction or normal (rotated only).
    #[inline]
    #[must_use]
    pub fn direction(&self, d: Vec3) -> Vec3 {
        Self::rotate(d)
    }

    #[inline]
    fn rotate(v: Vec3) -> Vec3 {
        Vec3::new(v.x, v.z, -v.y)
    }
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self::UNSCALED
    }
}
