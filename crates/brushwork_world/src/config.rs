//! # Build Configuration
//!
//! Every tunable of a world build, loadable from TOML. All fields have
//! defaults, so a config file only lists what it changes:
//!
//! ```toml
//! chunk_size = 1024.0
//! unit_scale = 0.0254
//! physics_ignore = ["tools/toolstrigger", "tools/toolsskybox*"]
//! ```

use std::path::Path;

use brushwork_geometry::{CoordinateTransform, GeometrySettings, DEFAULT_MAX_FACES};
use brushwork_shared::{DEFAULT_PLANE_EPSILON, DEFAULT_WELD_TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};

/// Default chunk edge length in output units.
pub const DEFAULT_CHUNK_SIZE: f64 = 512.0;

/// Faces that never collide.
const PHYSICS_IGNORE: [&str; 7] = [
    "tools/toolstrigger",
    "tools/toolsorigin",
    "tools/toolshint",
    "tools/toolsskip",
    "tools/toolsareaportal",
    "tools/toolsoccluder",
    "tools/toolsskybox2d",
];

/// Faces that collide but never render (on top of `PHYSICS_IGNORE`).
const VISUAL_ONLY_IGNORE: [&str; 7] = [
    "tools/toolsnodraw",
    "tools/toolsclip",
    "tools/toolsplayerclip",
    "tools/toolsnpcclip",
    "tools/toolsskybox",
    "tools/toolsblocklight",
    "tools/toolsinvisible",
];

/// Brush entities that never collide.
const NON_SOLID_CLASSES: [&str; 7] = [
    "func_illusionary",
    "func_dustmotes",
    "func_dustcloud",
    "func_smokevolume",
    "func_precipitation",
    "func_water_analog",
    "func_fog",
];

/// Configuration for a world build.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Chunk edge length in output units.
    pub chunk_size: f64,
    /// Output units per map unit.
    pub unit_scale: f64,
    /// Plane distance tolerance for reconstruction.
    pub plane_epsilon: f64,
    /// Vertex weld distance (reconstruction and collision meshes).
    pub weld_tolerance: f64,
    /// Solids with more faces are rejected.
    pub max_faces_per_solid: usize,
    /// Fail the load on structural parse errors.
    pub strict: bool,
    /// Emit collision meshes with shared, welded vertices.
    pub weld_collision_vertices: bool,
    /// Material patterns that never render.
    pub visual_ignore: Vec<String>,
    /// Material patterns that never collide.
    pub physics_ignore: Vec<String>,
    /// Entity classnames whose brushes never collide.
    pub non_solid_classes: Vec<String>,
    /// Entity classname prefixes whose brushes never collide.
    pub non_solid_class_prefixes: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let to_strings = |list: &[&str]| list.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
        let mut visual_ignore = to_strings(&PHYSICS_IGNORE);
        visual_ignore.extend(to_strings(&VISUAL_ONLY_IGNORE));

        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            unit_scale: 1.0,
            plane_epsilon: DEFAULT_PLANE_EPSILON,
            weld_tolerance: DEFAULT_WELD_TOLERANCE,
            max_faces_per_solid: DEFAULT_MAX_FACES,
            strict: false,
            weld_collision_vertices: true,
            visual_ignore,
            physics_ignore: to_strings(&PHYSICS_IGNORE),
            non_solid_classes: to_strings(&NON_SOLID_CLASSES),
            non_solid_class_prefixes: vec!["trigger_".to_string()],
        }
    }
}

impl BuildConfig {
    /// Parses and validates a TOML config.
    ///
    /// # Errors
    ///
    /// `Config` for malformed TOML or unknown keys, `InvalidConfig` for
    /// out-of-range values.
    pub fn from_toml_str(source: &str) -> LoadResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as `from_toml_str`.
    pub fn from_toml_file(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks that every numeric tunable is usable.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the first bad field.
    pub fn validate(&self) -> LoadResult<()> {
        let positive = [
            ("chunk_size", self.chunk_size),
            ("unit_scale", self.unit_scale),
            ("plane_epsilon", self.plane_epsilon),
            ("weld_tolerance", self.weld_tolerance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LoadError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.max_faces_per_solid < 4 {
            return Err(LoadError::InvalidConfig(format!(
                "max_faces_per_solid must be at least 4, got {}",
                self.max_faces_per_solid
            )));
        }
        Ok(())
    }

    /// Source to output space conversion.
    #[must_use]
    pub const fn transform(&self) -> CoordinateTransform {
        CoordinateTransform::new(self.unit_scale)
    }

    /// Reconstruction settings derived from this config.
    #[must_use]
    pub const fn geometry_settings(&self) -> GeometrySettings {
        GeometrySettings {
            epsilon: self.plane_epsilon,
            weld_tolerance: self.weld_tolerance,
            max_faces: self.max_faces_per_solid,
            transform: self.transform(),
        }
    }
}
