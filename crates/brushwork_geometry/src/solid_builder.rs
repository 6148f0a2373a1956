//! # Solid Builder
//!
//! Turns one `Solid` (a list of bounding planes) into per-face fragments.
//!
//! ## Containment convention
//!
//! Plane normals point out of the solid, so a polytope vertex is a
//! three-plane intersection with `signed_distance <= epsilon` for every
//! plane of the solid.

use brushwork_shared::{Plane, Vec3, DEFAULT_PLANE_EPSILON, DEFAULT_WELD_TOLERANCE};
use brushwork_vmf::{Side, Solid};

use crate::error::{GeometryError, GeometryResult};
use crate::fragment::{Fragment, FragmentVertex};
use crate::polygon::{fan_triangulate, polygon_normal, wind_counter_clockwise};
use crate::transform::CoordinateTransform;
use crate::uv;

/// Face limit above which a solid is refused outright.
pub const DEFAULT_MAX_FACES: usize = 64;

/// Tolerances and limits for reconstruction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometrySettings {
    /// Plane distance tolerance for containment and on-plane tests.
    pub epsilon: f64,
    /// Candidate vertices closer than this are one vertex.
    pub weld_tolerance: f64,
    /// Solids with more faces are rejected.
    pub max_faces: usize,
    /// Source to output space conversion.
    pub transform: CoordinateTransform,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_PLANE_EPSILON,
            weld_tolerance: DEFAULT_WELD_TOLERANCE,
            max_faces: DEFAULT_MAX_FACES,
            transform: CoordinateTransform::UNSCALED,
        }
    }
}

/// The reconstructed geometry of one solid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuiltSolid {
    /// Unique polytope vertices in output space.
    pub vertices: Vec<Vec3>,
    /// One fragment per emitted face, in side order.
    pub fragments: Vec<Fragment>,
    /// Included faces that touched fewer than three vertices.
    pub degenerate_faces: usize,
}

impl BuiltSolid {
    /// Triangles over all fragments.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.fragments.iter().map(Fragment::triangle_count).sum()
    }
}

/// Reconstructs solids with a fixed set of tolerances.
#[derive(Clone, Debug, Default)]
pub struct SolidBuilder {
    settings: GeometrySettings,
}

impl SolidBuilder {
    /// Creates a builder.
    #[must_use]
    pub const fn new(settings: GeometrySettings) -> Self {
        Self { settings }
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &GeometrySettings {
        &self.settings
    }

    /// Builds every face of `solid`.
    ///
    /// # Errors
    ///
    /// See [`SolidBuilder::build_filtered`].
    pub fn build(&self, solid: &Solid) -> GeometryResult<BuiltSolid> {
        self.build_filtered(solid, |_| true)
    }

    /// Builds the faces of `solid` accepted by `include`.
    ///
    /// Every plane still bounds the volume; `include` only decides which
    /// faces get a polygon.
    ///
    /// # Errors
    ///
    /// - `TooFewFaces` for fewer than four sides
    /// - `TooManyFaces` above `max_faces`
    /// - `TooFewVertices` if the planes enclose no volume
    pub fn build_filtered(
        &self,
        solid: &Solid,
        include: impl Fn(&Side) -> bool,
    ) -> GeometryResult<BuiltSolid> {
        let source_vertices = self.source_vertices(solid)?;
        let transform = self.settings.transform;

        let mut fragments = Vec::with_capacity(solid.sides.len());
        let mut degenerate_faces = 0;

        for (side_index, side) in solid.sides.iter().enumerate() {
            if !include(side) {
                continue;
            }

            match self.face_polygon(&source_vertices, &side.plane) {
                Some(polygon) => {
                    let normal = transform.direction(side.plane.normal);
                    let vertices = polygon
                        .iter()
                        .map(|&p| FragmentVertex {
                            position: transform.point(p),
                            normal,
                            uv: uv::project(side, p),
                        })
                        .collect();
                    fragments.push(Fragment {
                        side_index,
                        material: side.material.clone(),
                        displacement: side.displacement,
                        normal,
                        vertices,
                        triangles: fan_triangulate(polygon.len()),
                    });
                }
                None => {
                    tracing::debug!(
                        "solid {:?}: side {side_index} ({}) has no polygon",
                        solid.id,
                        side.material
                    );
                    degenerate_faces += 1;
                }
            }
        }

        Ok(BuiltSolid {
            vertices: source_vertices.iter().map(|&p| transform.point(p)).collect(),
            fragments,
            degenerate_faces,
        })
    }

    /// Unique polytope vertices of `solid` in source space.
    ///
    /// # Errors
    ///
    /// Same as [`SolidBuilder::build_filtered`].
    pub fn source_vertices(&self, solid: &Solid) -> GeometryResult<Vec<Vec3>> {
        let faces = solid.sides.len();
        if faces < Solid::MIN_SIDES {
            return Err(GeometryError::TooFewFaces { faces });
        }
        if faces > self.settings.max_faces {
            return Err(GeometryError::TooManyFaces {
                faces,
                limit: self.settings.max_faces,
            });
        }

        let planes: Vec<Plane> = solid.sides.iter().map(|s| s.plane).collect();
        let mut vertices: Vec<Vec3> = Vec::new();

        for i in 0..faces {
            for j in i + 1..faces {
                for k in j + 1..faces {
                    let Some(point) = Plane::intersect(&planes[i], &planes[j], &planes[k]) else {
                        continue;
                    };
                    if !planes.iter().all(|p| p.contains(point, self.settings.epsilon)) {
                        continue;
                    }
                    let weld = self.settings.weld_tolerance;
                    if vertices.iter().all(|v| v.distance(point) > weld) {
                        vertices.push(point);
                    }
                }
            }
        }

        // Planes that never close leave a flat shell of corners
        if vertices.len() < 4 || !self.encloses_volume(&vertices) {
            return Err(GeometryError::TooFewVertices {
                vertices: vertices.len(),
            });
        }
        Ok(vertices)
    }

    /// True if some vertex lies off the plane through the first three
    /// non-collinear ones.
    fn encloses_volume(&self, vertices: &[Vec3]) -> bool {
        let epsilon = self.settings.epsilon;
        let origin = vertices[0];
        let Some(edge) = vertices.iter().map(|&v| v - origin).find(|e| e.length() > epsilon) else {
            return false;
        };
        let Some(normal) = vertices.iter().find_map(|&v| {
            let cross = edge.cross(v - origin);
            (cross.length() > epsilon * edge.length())
                .then_some(cross)
                .and_then(Vec3::try_normalize)
        }) else {
            return false;
        };
        vertices
            .iter()
            .any(|&v| normal.dot(v - origin).abs() > epsilon)
    }

    /// Wound polygon of the vertices on `plane`, or `None` if there is
    /// no area.
    fn face_polygon(&self, vertices: &[Vec3], plane: &Plane) -> Option<Vec<Vec3>> {
        let mut polygon: Vec<Vec3> = vertices
            .iter()
            .copied()
            .filter(|&v| plane.is_on_plane(v, self.settings.epsilon))
            .collect();
        if polygon.len() < 3 {
            return None;
        }

        wind_counter_clockwise(&mut polygon, plane.normal);
        if polygon_normal(&polygon).length() <= f64::EPSILON {
            return None;
        }
        Some(polygon)
    }
}
