//! Cell storage backends and their equality checks

use super::dense::DenseStorage;
use super::sparse::SparseStorage;
use super::status::DEAD;
use crate::error::{GolError, MismatchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage backend selector. Deserializes through `FromStr`, so config
/// files accept the same names as the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StorageKind {
    Dense,
    #[default]
    Sparse,
}

impl StorageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKind::Dense => "dense",
            StorageKind::Sparse => "sparse",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKind {
    type Err = GolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(StorageKind::Dense),
            // "dok" is the dictionary-of-keys name for the same backend
            "sparse" | "dok" => Ok(StorageKind::Sparse),
            _ => Err(GolError::StorageKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for StorageKind {
    type Error = GolError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<StorageKind> for String {
    fn from(kind: StorageKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Raw cell container, dense or sparse, chosen once at construction.
#[derive(Debug, Clone)]
pub enum CellStorage {
    Dense(DenseStorage),
    Sparse(SparseStorage),
}

impl CellStorage {
    /// Create a dead-filled storage of the given kind
    pub fn new(kind: StorageKind, rows: usize, cols: usize) -> Self {
        match kind {
            StorageKind::Dense => CellStorage::Dense(DenseStorage::new(rows, cols)),
            StorageKind::Sparse => CellStorage::Sparse(SparseStorage::new(rows, cols, DEAD)),
        }
    }

    pub fn kind(&self) -> StorageKind {
        match self {
            CellStorage::Dense(_) => StorageKind::Dense,
            CellStorage::Sparse(_) => StorageKind::Sparse,
        }
    }

    pub fn rows(&self) -> usize {
        match self {
            CellStorage::Dense(dense) => dense.rows(),
            CellStorage::Sparse(sparse) => sparse.rows(),
        }
    }

    pub fn cols(&self) -> usize {
        match self {
            CellStorage::Dense(dense) => dense.cols(),
            CellStorage::Sparse(sparse) => sparse.cols(),
        }
    }

    pub fn get(&self, i: usize, j: usize) -> Result<u8> {
        match self {
            CellStorage::Dense(dense) => dense.get(i, j),
            CellStorage::Sparse(sparse) => sparse.get(i, j),
        }
    }

    pub fn set(&mut self, i: usize, j: usize, value: u8) -> Result<()> {
        match self {
            CellStorage::Dense(dense) => dense.set(i, j, value),
            CellStorage::Sparse(sparse) => sparse.set(i, j, value),
        }
    }

    /// Shared-reference write, safe for concurrent callers on disjoint cells.
    pub fn store(&self, i: usize, j: usize, value: u8) -> Result<()> {
        match self {
            CellStorage::Dense(dense) => dense.store(i, j, value),
            CellStorage::Sparse(sparse) => sparse.store(i, j, value),
        }
    }

    pub fn set_all(&mut self, value: u8) {
        match self {
            CellStorage::Dense(dense) => dense.set_all(value),
            CellStorage::Sparse(sparse) => sparse.set_all(value),
        }
    }

    /// Same kind and dimensions, default-filled
    pub fn clone_empty(&self) -> Self {
        match self {
            CellStorage::Dense(dense) => CellStorage::Dense(dense.clone_empty()),
            CellStorage::Sparse(sparse) => CellStorage::Sparse(sparse.clone_empty()),
        }
    }

    fn dimensions_error(&self, other: &CellStorage) -> std::result::Result<(), MismatchError> {
        if self.rows() != other.rows() {
            return Err(MismatchError::Dimension {
                axis: "rows",
                left: self.rows(),
                right: other.rows(),
            });
        }
        if self.cols() != other.cols() {
            return Err(MismatchError::Dimension {
                axis: "cols",
                left: self.cols(),
                right: other.cols(),
            });
        }
        Ok(())
    }

    /// Cell-by-cell comparison through `get`, across backends and defaults.
    pub fn value_equals_error(&self, other: &CellStorage) -> std::result::Result<(), MismatchError> {
        self.dimensions_error(other)?;
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                let left = self.get(i, j)?;
                let right = other.get(i, j)?;
                if left != right {
                    return Err(MismatchError::Value { i, j, left, right });
                }
            }
        }
        Ok(())
    }

    pub fn value_equals(&self, other: &CellStorage) -> bool {
        self.value_equals_error(other).is_ok()
    }

    /// Structural comparison of what each backend actually stores.
    ///
    /// Two sparse storages are exact-equal only when their defaults and
    /// their explicit entries coincide. Dense storages store every cell, so
    /// for them this is value equality. Mixed kinds are never exact-equal.
    pub fn exact_equals_error(&self, other: &CellStorage) -> std::result::Result<(), MismatchError> {
        self.dimensions_error(other)?;
        match (self, other) {
            (CellStorage::Dense(_), CellStorage::Dense(_)) => self.value_equals_error(other),
            (CellStorage::Sparse(left), CellStorage::Sparse(right)) => {
                Self::sparse_exact_equals_error(left, right)
            }
            _ => Err(MismatchError::StorageKind {
                left: self.kind(),
                right: other.kind(),
            }),
        }
    }

    pub fn exact_equals(&self, other: &CellStorage) -> bool {
        self.exact_equals_error(other).is_ok()
    }

    fn sparse_exact_equals_error(
        left: &SparseStorage,
        right: &SparseStorage,
    ) -> std::result::Result<(), MismatchError> {
        if left.default_value() != right.default_value() {
            return Err(MismatchError::field(
                "default values",
                left.default_value(),
                right.default_value(),
            ));
        }
        for (i, j, value) in left.entries() {
            match right.get_explicit(i, j) {
                Some(other_value) if other_value == value => {}
                Some(other_value) => {
                    return Err(MismatchError::Value {
                        i,
                        j,
                        left: value,
                        right: other_value,
                    })
                }
                None => {
                    return Err(MismatchError::MissingKey {
                        i,
                        j,
                        value,
                        side: "receiver",
                    })
                }
            }
        }
        if let Some((i, j, value)) = right
            .entries()
            .into_iter()
            .find(|&(i, j, _)| left.get_explicit(i, j).is_none())
        {
            return Err(MismatchError::MissingKey {
                i,
                j,
                value,
                side: "argument",
            });
        }
        Ok(())
    }
}
