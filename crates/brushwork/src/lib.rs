//! # Brushwork
//!
//! Brush map geometry pipeline, one crate per stage:
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌────────────────┐   ┌───────────────┐
//! │  vmf         │   │  vmf         │   │  geometry      │   │  world        │
//! │  tokenizer + │──>│  semantic    │──>│  convex solid  │──>│  filter,      │
//! │  block tree  │   │  mapper      │   │  reconstructor │   │  chunk, merge │
//! └──────────────┘   └──────────────┘   └────────────────┘   └───────────────┘
//! ```
//!
//! Most callers only need [`WorldBuilder`]:
//!
//! ```rust,ignore
//! use brushwork::{BuildConfig, WorldBuilder};
//!
//! let world = WorldBuilder::new(BuildConfig::default())?.load_file("maps/test.vmf")?;
//! println!("{}", world.stats);
//! ```
//!
//! ## Modules
//!
//! - `export`: Wavefront OBJ writer for merged visual meshes
//! - `report`: human readable load summary

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod export;
pub mod report;

// Re-export the stages
pub use brushwork_geometry as geometry;
pub use brushwork_shared as shared;
pub use brushwork_vmf as vmf;
pub use brushwork_world as world;

// Re-export commonly used types
pub use brushwork_vmf::{parse_map, Diagnostic, Map, ParseError};
pub use brushwork_world::{
    BuildConfig, BuildStats, BuiltWorld, ChunkCoord, CollisionMesh, LoadError, MaterialCache,
    SpawnPoint, VisualMesh, WorldBuilder,
};
pub use export::write_obj;
pub use report::Summary;
