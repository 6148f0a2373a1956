//! Texture coordinates.
//!
//! With both axes present: `u = (pos · u_dir + u_offset) / u_scale` and
//! likewise for `v`, in texels. Without them, the position is projected
//! onto the two world axes orthogonal to the dominant normal component
//! at the editor's default scale.

use brushwork_shared::{Vec2, Vec3};
use brushwork_vmf::Side;

/// Map units per texel the editor assigns to new faces.
pub const DEFAULT_TEXTURE_SCALE: f64 = 0.25;

/// UV for a source-space position on `side`.
#[must_use]
pub fn project(side: &Side, position: Vec3) -> Vec2 {
    match (&side.u_axis, &side.v_axis) {
        (Some(u), Some(v)) => Vec2::new(u.project(position), v.project(position)),
        _ => planar(side.plane.normal, position),
    }
}

/// Axis-aligned planar projection used when a side has no usable axes.
#[must_use]
pub fn planar(normal: Vec3, position: Vec3) -> Vec2 {
    let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
    let (u, v) = if az >= ax && az >= ay {
        (position.x, -position.y)
    } else if ax >= ay {
        (position.y, -position.z)
    } else {
        (position.x, -position.z)
    };
    Vec2::new(u / DEFAULT_TEXTURE_SCALE, v / DEFAULT_TEXTURE_SCALE)
}
