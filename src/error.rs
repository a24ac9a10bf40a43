//! Error types for the automaton engine

use crate::automaton::State;
use thiserror::Error;

/// Errors raised by grid construction, seeding, rules and rendering
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("neighborhood radius must be positive, got {0}")]
    InvalidRadius(usize),

    #[error("invalid probability distribution: {0}")]
    InvalidDistribution(String),

    #[error("invalid rule parameters: {0}")]
    InvalidRule(String),

    #[error(transparent)]
    PatternParse(#[from] PatternParseError),

    #[error("palette has no color for state {0}")]
    MissingColor(State),

    #[error("surface error: {0}")]
    Surface(String),
}

/// Errors raised while reading a plaintext pattern block
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternParseError {
    #[error("pattern block contains no cells")]
    Empty,

    #[error("unexpected glyph {glyph:?} at line {line}, column {column}")]
    UnexpectedGlyph {
        glyph: char,
        line: usize,
        column: usize,
    },
}

pub type CaResult<T> = std::result::Result<T, CaError>;
