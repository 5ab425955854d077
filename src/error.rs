//! Error types for grid validation and search.

use thiserror::Error;

/// A grid that is not a permutation of `0..DIM*DIM` laid out as `DIM` rows.
///
/// Raised while ingesting input, before any search state exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidGrid {
    #[error("expected {expected} rows, found {found}")]
    WrongRowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    WrongRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("'{token}' is not a tile number")]
    NotANumber { token: String },

    #[error("tile {value} is out of range 0..={max}")]
    ValueOutOfRange { value: u32, max: u32 },

    #[error("tile {value} appears more than once")]
    DuplicateValue { value: u32 },

    #[error("grid has no blank (0) cell")]
    MissingBlank,
}

/// Outcomes of a search that did not reach the goal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The frontier emptied without reaching the goal; the goal is not
    /// reachable from the initial grid.
    #[error("search exhausted after expanding {expanded} states without reaching the goal")]
    SearchExhausted { expanded: usize },

    /// Internal invariant broken on an already validated grid. Indicates a bug.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("search cancelled after expanding {expanded} states")]
    Cancelled { expanded: usize },

    #[error("expansion limit of {limit} states reached")]
    ExpansionLimit { limit: usize },
}
