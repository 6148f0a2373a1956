//! # Brushwork VMF
//!
//! Turns map text into a typed model in two passes.
//!
//! ## Pipeline
//!
//! 1. `tokenizer`: raw text to tokens (comments stripped, quotes removed)
//! 2. `tree`: tokens to an ordered key/value tree
//! 3. `mapper`: tree to `Map` (planes, sides, solids, entities)
//!
//! Nothing in this crate fails hard. Malformed input yields a partial
//! result plus `Diagnostic`s that callers can inspect or escalate.
//!
//! ## Example
//!
//! ```rust,ignore
//! use brushwork_vmf::parse_map;
//!
//! let parsed = parse_map(&std::fs::read_to_string("maps/test.vmf")?);
//! for diagnostic in &parsed.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! let map = parsed.value;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod mapper;
pub mod model;
pub mod primitives;
pub mod tokenizer;
pub mod tree;

pub use error::{Diagnostic, ParseError, Parsed};
pub use mapper::map_document;
pub use model::{Entity, EntityKind, Map, Side, Solid, TextureAxis, World};
pub use tree::{Block, Entry, Value};

/// Parses map text all the way to the typed model.
///
/// Tree diagnostics come first, followed by mapper diagnostics.
#[must_use]
pub fn parse_map(source: &str) -> Parsed<Map> {
    let tree = tree::parse(source);
    let mapped = map_document(&tree.value);

    let mut diagnostics = tree.diagnostics;
    diagnostics.extend(mapped.diagnostics);

    Parsed {
        value: mapped.value,
        diagnostics,
    }
}
