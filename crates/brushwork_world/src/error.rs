//! # Load Error Types
//!
//! Failures that abort a whole map load. Per-solid problems never show
//! up here; they are logged and counted in `BuildStats` instead.

use std::path::PathBuf;

use brushwork_vmf::Diagnostic;
use thiserror::Error;

/// Errors that abort a map load.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The map or config file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The build config is not valid TOML for `BuildConfig`.
    #[error("invalid build config: {0}")]
    Config(#[from] toml::de::Error),

    /// The build config parsed but holds an unusable value.
    #[error("invalid build config: {0}")]
    InvalidConfig(String),

    /// The map has no `world` block.
    #[error("map has no world block")]
    MissingWorld,

    /// Strict mode: the map text is structurally damaged.
    #[error("{count} structural parse errors, first at {first}")]
    Malformed {
        /// Number of structural diagnostics.
        count: usize,
        /// The first one.
        first: Diagnostic,
    },
}

/// Result type for map loads.
pub type LoadResult<T> = Result<T, LoadError>;
