//! # Parse Diagnostics
//!
//! Everything that can go wrong while reading map text. None of these
//! abort a load on their own; they are collected next to the partial
//! result so callers decide what is fatal.

use std::fmt;

use thiserror::Error;

/// A malformed construct in the map text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A quoted string ran to the end of the input.
    #[error("unterminated quoted string")]
    UnterminatedString,

    /// A `}` with no open block.
    #[error("unexpected closing brace")]
    UnexpectedCloseBrace,

    /// A `{` with no key in front of it.
    #[error("block opened without a key")]
    AnonymousBlock,

    /// A block still open at the end of the input.
    #[error("block `{key}` opened on line {opened_at} is never closed")]
    UnclosedBlock {
        /// Key of the unclosed block.
        key: String,
        /// Line the block was opened on.
        opened_at: usize,
    },

    /// A key with no value before a `}` or end of input.
    #[error("key `{key}` has no value")]
    DanglingKey {
        /// The orphaned key.
        key: String,
    },

    /// The top level has no `world` block.
    #[error("map has no world block")]
    MissingWorld,

    /// A `plane` value that is not three `(x y z)` points.
    #[error("malformed plane `{value}`")]
    InvalidPlane {
        /// Raw value.
        value: String,
    },

    /// A `plane` whose three points are collinear.
    #[error("plane `{value}` has collinear points")]
    DegeneratePlane {
        /// Raw value.
        value: String,
    },

    /// A `uaxis`/`vaxis` value that is not `[x y z offset] scale`.
    #[error("malformed texture axis `{value}`")]
    InvalidTextureAxis {
        /// Raw value.
        value: String,
    },

    /// A vector-valued key (`origin`, `angles`) that is not three numbers.
    #[error("malformed vector for `{key}`: `{value}`")]
    InvalidVector {
        /// Key the value belongs to.
        key: String,
        /// Raw value.
        value: String,
    },

    /// An integer-valued key (`id`, `mapversion`) that does not parse.
    #[error("malformed integer for `{key}`: `{value}`")]
    InvalidInteger {
        /// Key the value belongs to.
        key: String,
        /// Raw value.
        value: String,
    },
}

impl ParseError {
    /// True for errors that damage the tree shape itself.
    ///
    /// Strict loads reject these; value-level errors only degrade the
    /// affected side or entity.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedString
                | Self::UnexpectedCloseBrace
                | Self::AnonymousBlock
                | Self::UnclosedBlock { .. }
                | Self::DanglingKey { .. }
        )
    }
}

/// A `ParseError` tied to the line it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based source line.
    pub line: usize,
    /// What went wrong.
    pub error: ParseError,
}

impl Diagnostic {
    /// Creates a diagnostic.
    #[must_use]
    pub const fn new(line: usize, error: ParseError) -> Self {
        Self { line, error }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// A best-effort result plus everything that was wrong with the input.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    /// The (possibly partial) value.
    pub value: T,
    /// Anomalies in source order.
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Parsed<T> {
    /// True if nothing was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// True if any diagnostic damaged the tree shape.
    #[must_use]
    pub fn has_structural_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.error.is_structural())
    }
}
