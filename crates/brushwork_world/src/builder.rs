//! # World Builder
//!
//! Runs the whole pipeline for one map load:
//!
//! ```text
//! parse -> for each solid: reconstruct once
//!                          -> visual?  bucket (chunk, material)
//!                          -> physics? bucket (chunk)
//!       -> merge every bucket -> BuiltWorld
//! ```
//!
//! Nothing survives between builds except the material cache. The
//! builder can be reused for any number of loads.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use brushwork_geometry::{GeometryError, SolidBuilder};
use brushwork_vmf::{parse_map, Diagnostic, Map};

use crate::chunk::ChunkCoord;
use crate::config::BuildConfig;
use crate::error::{LoadError, LoadResult};
use crate::filter::{normalize_material, SurfaceFilters};
use crate::material::{MaterialCache, MaterialResolver};
use crate::merge::{CollisionAccumulator, CollisionMesh, VisualAccumulator, VisualMesh};
use crate::spawn::{extract_spawn_points, SpawnPoint};
use crate::stats::BuildStats;

/// Everything one map load produces. Owned by the caller.
#[derive(Clone, Debug, Default)]
pub struct BuiltWorld {
    /// Render batches, sorted by chunk then material.
    pub visual_meshes: Vec<VisualMesh>,
    /// Collision shapes, sorted by chunk.
    pub collision_meshes: Vec<CollisionMesh>,
    /// Spawn points in file order.
    pub spawn_points: Vec<SpawnPoint>,
    /// Counters.
    pub stats: BuildStats,
    /// Parse diagnostics of the source text (empty for `build`).
    pub diagnostics: Vec<Diagnostic>,
}

impl BuiltWorld {
    /// The render batch for a chunk and material, if any.
    #[must_use]
    pub fn visual_mesh(&self, chunk: ChunkCoord, material: &str) -> Option<&VisualMesh> {
        let material = normalize_material(material);
        self.visual_meshes
            .iter()
            .find(|m| m.chunk == chunk && m.material == material)
    }

    /// The collision shape for a chunk, if any.
    #[must_use]
    pub fn collision_mesh(&self, chunk: ChunkCoord) -> Option<&CollisionMesh> {
        self.collision_meshes.iter().find(|m| m.chunk == chunk)
    }
}

/// Turns maps into chunked meshes.
pub struct WorldBuilder {
    config: BuildConfig,
    filters: SurfaceFilters,
    solids: SolidBuilder,
    materials: Arc<dyn MaterialResolver>,
}

impl WorldBuilder {
    /// Creates a builder with its own material cache.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the config fails validation.
    pub fn new(config: BuildConfig) -> LoadResult<Self> {
        Self::with_materials(config, Arc::new(MaterialCache::new()))
    }

    /// Creates a builder resolving materials through a shared resolver.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the config fails validation.
    pub fn with_materials(
        config: BuildConfig,
        materials: Arc<dyn MaterialResolver>,
    ) -> LoadResult<Self> {
        config.validate()?;
        Ok(Self {
            filters: SurfaceFilters::from_config(&config),
            solids: SolidBuilder::new(config.geometry_settings()),
            config,
            materials,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Reads and builds a map file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as `load_str`.
    pub fn load_file(&self, path: impl AsRef<Path>) -> LoadResult<BuiltWorld> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("loading {}", path.display());
        self.load_str(&source)
    }

    /// Parses and builds map text.
    ///
    /// # Errors
    ///
    /// - `Malformed` in strict mode if the text is structurally damaged
    /// - `MissingWorld` if there is no `world` block
    pub fn load_str(&self, source: &str) -> LoadResult<BuiltWorld> {
        let parsed = parse_map(source);
        for diagnostic in &parsed.diagnostics {
            tracing::warn!("{diagnostic}");
        }

        if self.config.strict {
            let mut structural = parsed.diagnostics.iter().filter(|d| d.error.is_structural());
            if let Some(first) = structural.next() {
                return Err(LoadError::Malformed {
                    count: 1 + structural.count(),
                    first: first.clone(),
                });
            }
        }

        let mut world = self.build(&parsed.value)?;
        world.diagnostics = parsed.diagnostics;
        Ok(world)
    }

    /// Builds an already parsed map.
    ///
    /// # Errors
    ///
    /// `MissingWorld` if the map has no world block.
    pub fn build(&self, map: &Map) -> LoadResult<BuiltWorld> {
        if map.world.is_none() {
            return Err(LoadError::MissingWorld);
        }

        let chunk_size = self.config.chunk_size;
        // Faces on a chunk boundary go to the chunk of their own solid
        let boundary_bias = self.config.plane_epsilon * self.config.unit_scale;
        let mut stats = BuildStats::default();
        let mut visual: BTreeMap<(ChunkCoord, String), VisualAccumulator> = BTreeMap::new();
        let mut physics: BTreeMap<ChunkCoord, CollisionAccumulator> = BTreeMap::new();

        for (owner, solid) in map.solids() {
            stats.solids_seen += 1;

            let solid_owner = self.filters.is_solid_owner(owner);
            if !solid_owner {
                stats.solids_non_solid += 1;
            }

            // Reconstruct once, for every face either consumer wants
            let built = match self.solids.build_filtered(solid, |side| {
                self.filters.is_visual(side) || (solid_owner && self.filters.is_physical(side))
            }) {
                Ok(built) => built,
                Err(err) => {
                    let owner_name = owner.map_or("world", |e| e.classname.as_str());
                    tracing::warn!("solid {:?} ({owner_name}) skipped: {err}", solid.id);
                    match err {
                        GeometryError::TooManyFaces { .. } => stats.solids_rejected += 1,
                        _ => stats.solids_degenerate += 1,
                    }
                    continue;
                }
            };

            stats.solids_built += 1;
            stats.faces_degenerate += built.degenerate_faces;

            for fragment in &built.fragments {
                stats.fragments += 1;
                let side = &solid.sides[fragment.side_index];
                let chunk = ChunkCoord::from_position(
                    fragment.bounds().centroid() - fragment.normal * boundary_bias,
                    chunk_size,
                );

                if self.filters.is_visual(side) {
                    visual
                        .entry((chunk, normalize_material(&fragment.material)))
                        .or_default()
                        .push(fragment);
                }
                if solid_owner && self.filters.is_physical(side) {
                    physics.entry(chunk).or_default().push(fragment);
                }
            }

            tracing::debug!(
                "solid {:?}: {} fragments, {} triangles",
                solid.id,
                built.fragments.len(),
                built.triangle_count()
            );
        }

        let visual_meshes: Vec<VisualMesh> = visual
            .into_iter()
            .map(|((chunk, material), acc)| {
                let placeholder = self.materials.resolve(&material);
                acc.finish(chunk, material, placeholder)
            })
            .collect();

        let weld = self
            .config
            .weld_collision_vertices
            .then_some(self.config.weld_tolerance);
        let collision_meshes: Vec<CollisionMesh> = physics
            .into_iter()
            .map(|(chunk, acc)| acc.finish(chunk, weld))
            .collect();

        let spawn_points = extract_spawn_points(map, &self.config.transform());

        stats.visual_buckets = visual_meshes.len();
        stats.visual_triangles = visual_meshes.iter().map(VisualMesh::triangle_count).sum();
        stats.physics_chunks = collision_meshes.len();
        stats.physics_triangles = collision_meshes.iter().map(CollisionMesh::triangle_count).sum();
        stats.spawn_points = spawn_points.len();

        tracing::info!("{stats}");

        Ok(BuiltWorld {
            visual_meshes,
            collision_meshes,
            spawn_points,
            stats,
            diagnostics: Vec::new(),
        })
    }
}

impl std::fmt::Debug for WorldBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
