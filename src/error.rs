//! Error types for the automaton engine

use crate::game_of_life::StorageKind;
use thiserror::Error;

/// Errors raised while constructing, editing or stepping an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GolError {
    /// Coordinate outside a non-wrapping axis, or outside the storage.
    #[error("index ({i}, {j}) out of range for {rows}x{cols} grid")]
    Index {
        i: isize,
        j: isize,
        rows: usize,
        cols: usize,
    },

    /// Malformed survival/birth notation.
    #[error("invalid rule \"{rule}\": {reason}")]
    RuleParse { rule: String, reason: String },

    /// A cell holds a value the rule cannot evolve.
    #[error("invalid status {value} in cell ({i}, {j})")]
    InvalidCellStatus { i: usize, j: usize, value: u8 },

    /// Unrecognized storage backend name.
    #[error("unknown storage kind \"{0}\": only \"dense\" or \"sparse\" are accepted")]
    StorageKind(String),

    /// Unrecognized neighborhood name.
    #[error("unknown neighborhood \"{0}\": only \"moore\" or \"von_neumann\" are accepted")]
    NeighborhoodKind(String),

    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("grid dimensions {rows}x{cols} exceed the addressable cell count")]
    GridTooLarge { rows: usize, cols: usize },

    /// The parallel change path requires distinct coordinates.
    #[error("cell ({i}, {j}) appears more than once in a parallel change list")]
    DuplicateChange { i: usize, j: usize },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),
}

/// Engine result alias.
pub type Result<T> = std::result::Result<T, GolError>;

/// First point of divergence found by an equality check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MismatchError {
    #[error("{axis} are different: {left} vs {right}")]
    Dimension {
        axis: &'static str,
        left: usize,
        right: usize,
    },

    #[error("cells at ({i},{j}) are different: {left} vs {right}")]
    Value { i: usize, j: usize, left: u8, right: u8 },

    /// Sparse exact equality: a key stored on one side only.
    #[error("({i},{j}) = {value} is stored only in the {side}")]
    MissingKey {
        i: usize,
        j: usize,
        value: u8,
        side: &'static str,
    },

    #[error("storage kinds are different: {left} vs {right}")]
    StorageKind { left: StorageKind, right: StorageKind },

    /// A cell could not be read while comparing.
    #[error("cell read failed: {0}")]
    Read(#[from] GolError),

    /// Any scalar attribute (name, rule, generation, topology...).
    #[error("{field} are different: {left} vs {right}")]
    Field {
        field: &'static str,
        left: String,
        right: String,
    },
}

impl MismatchError {
    pub(crate) fn field(field: &'static str, left: impl ToString, right: impl ToString) -> Self {
        Self::Field {
            field,
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}
