//! # Polygon Helpers
//!
//! Winding and triangulation for the convex, planar point sets found on
//! one face of a brush.

use brushwork_shared::Vec3;

/// Average of the points. `Vec3::ZERO` for an empty slice.
#[must_use]
pub fn centroid(points: &[Vec3]) -> Vec3 {
    if points.is_empty() {
        return Vec3::ZERO;
    }
    let mut sum = Vec3::ZERO;
    for &p in points {
        sum += p;
    }
    sum / points.len() as f64
}

/// Area-weighted normal of a closed polygon (Newell's method).
///
/// The length is twice the polygon area, so a zero-length result means
/// the points are collinear.
#[must_use]
pub fn polygon_normal(points: &[Vec3]) -> Vec3 {
    let mut normal = Vec3::ZERO;
    for (i, &current) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        normal += current.cross(next);
    }
    normal
}

/// Two unit axes spanning the plane with the given unit normal.
///
/// `(u, v, normal)` is right-handed, so increasing angle in `(u, v)` is
/// counter-clockwise seen from the front of the plane.
#[must_use]
pub fn plane_basis(normal: Vec3) -> (Vec3, Vec3) {
    let reference = if normal.z.abs() > 0.9 { Vec3::X } else { Vec3::Z };
    let u = reference
        .cross(normal)
        .try_normalize()
        .unwrap_or(Vec3::X);
    let v = normal.cross(u);
    (u, v)
}

/// Orders convex coplanar points counter-clockwise around `normal`.
///
/// Points are sorted by angle about their centroid in the plane's 2D
/// basis; the order is reversed if the result still faces away from
/// `normal`.
pub fn wind_counter_clockwise(points: &mut [Vec3], normal: Vec3) {
    if points.len() < 3 {
        return;
    }

    let center = centroid(points);
    let (u, v) = plane_basis(normal);
    let angle = |p: &Vec3| {
        let d = *p - center;
        d.dot(v).atan2(d.dot(u))
    };
    points.sort_by(|a, b| angle(a).total_cmp(&angle(b)));

    if polygon_normal(points).dot(normal) < 0.0 {
        points.reverse();
    }
}

/// Fan triangulation of a convex polygon with `count` vertices.
///
/// Returns `count - 2` triangles rooted at vertex 0; nothing for fewer
/// than three vertices.
#[must_use]
pub fn fan_triangulate(count: usize) -> Vec<[u32; 3]> {
    (1..count.saturating_sub(1))
        .map(|i| [0, i as u32, i as u32 + 1])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec3> {
        vec![
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_basis_is_right_handed() {
        for normal in [Vec3::X, -Vec3::Y, Vec3::Z, -Vec3::Z, Vec3::new(1.0, 1.0, 1.0).try_normalize().unwrap()] {
            let (u, v) = plane_basis(normal);
            assert!(u.dot(normal).abs() < 1e-12);
            assert!(v.dot(normal).abs() < 1e-12);
            assert!(u.cross(v).distance(normal) < 1e-12);
        }
    }

    #[test]
    fn test_winding_follows_normal() {
        let mut up = square();
        wind_counter_clockwise(&mut up, Vec3::Z);
        assert!(polygon_normal(&up).dot(Vec3::Z) > 0.0);

        let mut down = square();
        wind_counter_clockwise(&mut down, -Vec3::Z);
        assert!(polygon_normal(&down).dot(Vec3::Z) < 0.0);
    }

    #[test]
    fn test_wound_square_has_no_crossing_edges() {
        let mut points = square();
        wind_counter_clockwise(&mut points, Vec3::Z);
        // Adjacent corners of a 2x2 square are 2 apart, diagonals 2*sqrt(2)
        for i in 0..4 {
            let edge = points[i].distance(points[(i + 1) % 4]);
            assert!((edge - 2.0).abs() < 1e-12, "edge {i} is a diagonal");
        }
    }

    #[test]
    fn test_polygon_normal_area() {
        let mut points = square();
        wind_counter_clockwise(&mut points, Vec3::Z);
        // 2 * area of a 2x2 square
        assert!((polygon_normal(&points).length() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_fan_triangulation() {
        assert!(fan_triangulate(2).is_empty());
        assert_eq!(fan_triangulate(3), vec![[0, 1, 2]]);
        assert_eq!(fan_triangulate(5), vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
    }
}
