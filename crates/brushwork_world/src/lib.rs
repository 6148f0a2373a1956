//! # Brushwork World
//!
//! Turns a parsed map into the meshes a renderer and a physics world
//! consume.
//!
//! ## Output
//!
//! - one `VisualMesh` per (chunk, material), flat-shaded and indexed
//! - one `CollisionMesh` per chunk, positions only, optionally welded
//! - the map's spawn points
//!
//! All in Y-up output space, scaled by `BuildConfig::unit_scale`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use brushwork_world::{BuildConfig, WorldBuilder};
//!
//! let builder = WorldBuilder::new(BuildConfig::from_toml_file("build.toml")?)?;
//! let world = builder.load_file("maps/test.vmf")?;
//! for mesh in &world.visual_meshes {
//!     upload(mesh.chunk, &mesh.material, mesh.vertex_bytes(), mesh.index_bytes());
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod chunk;
pub mod config;
pub mod error;
pub mod filter;
pub mod material;
pub mod merge;
pub mod spawn;
pub mod stats;

pub use builder::{BuiltWorld, WorldBuilder};
pub use chunk::ChunkCoord;
pub use config::{BuildConfig, DEFAULT_CHUNK_SIZE};
pub use error::{LoadError, LoadResult};
pub use filter::{normalize_material, MaterialFilter, MaterialPattern, SurfaceFilters};
pub use material::{MaterialCache, MaterialResolver, PlaceholderMaterial, SemanticMaterial};
pub use merge::{CollisionMesh, MeshVertex, VisualMesh};
pub use spawn::{extract_spawn_points, SpawnPoint};
pub use stats::BuildStats;
