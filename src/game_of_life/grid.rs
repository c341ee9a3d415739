//! Grid representation: storage plus per-axis topology

use super::status::{ALIVE, DEAD};
use super::storage::{CellStorage, StorageKind};
use crate::error::{GolError, MismatchError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wraparound policy per axis. A non-wrapping axis is bounded: reads past
/// its edge are void and writes past its edge are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Topology {
    pub wrap_rows: bool,
    pub wrap_cols: bool,
}

impl Topology {
    pub fn bounded() -> Self {
        Self { wrap_rows: false, wrap_cols: false }
    }

    pub fn toroidal() -> Self {
        Self { wrap_rows: true, wrap_cols: true }
    }
}

fn limit_label(wraps: bool) -> &'static str {
    if wraps {
        "unlimited"
    } else {
        "limited"
    }
}

/// How two grids are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equality {
    /// Compare what the backends store (see `CellStorage::exact_equals_error`)
    Exact,
    /// Compare every cell as read through `get`
    Values,
}

/// A fixed-size grid of cells
#[derive(Debug, Clone)]
pub struct Grid {
    storage: CellStorage,
    topology: Topology,
}

impl Grid {
    /// Create a dead-filled grid
    pub fn new(rows: usize, cols: usize, kind: StorageKind, topology: Topology) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GolError::EmptyGrid { rows, cols });
        }
        // Coordinates are resolved as isize, so every offset must fit in one.
        if rows.checked_mul(cols).map_or(true, |cells| cells > isize::MAX as usize) {
            return Err(GolError::GridTooLarge { rows, cols });
        }
        Ok(Self::from_storage(CellStorage::new(kind, rows, cols), topology))
    }

    /// Create a grid where every cell is independently alive or dead
    pub fn random(
        rows: usize,
        cols: usize,
        kind: StorageKind,
        topology: Topology,
        seed: u64,
    ) -> Result<Self> {
        let mut grid = Self::new(rows, cols, kind, topology)?;
        grid.randomize(seed)?;
        Ok(grid)
    }

    /// Wrap an existing storage
    pub fn from_storage(storage: CellStorage, topology: Topology) -> Self {
        Self { storage, topology }
    }

    pub fn rows(&self) -> usize {
        self.storage.rows()
    }

    pub fn cols(&self) -> usize {
        self.storage.cols()
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn wraps_rows(&self) -> bool {
        self.topology.wrap_rows
    }

    pub fn wraps_cols(&self) -> bool {
        self.topology.wrap_cols
    }

    /// "limited" for a bounded row axis, "unlimited" for a wrapping one
    pub fn limit_rows_label(&self) -> &'static str {
        limit_label(self.topology.wrap_rows)
    }

    pub fn limit_cols_label(&self) -> &'static str {
        limit_label(self.topology.wrap_cols)
    }

    pub fn storage_kind(&self) -> StorageKind {
        self.storage.kind()
    }

    pub fn storage(&self) -> &CellStorage {
        &self.storage
    }

    #[inline]
    fn resolve_axis(index: isize, extent: usize, wraps: bool) -> Option<usize> {
        if wraps {
            // rem_euclid keeps arbitrarily negative indices in [0, extent)
            Some(index.rem_euclid(extent as isize) as usize)
        } else if index >= 0 && (index as usize) < extent {
            Some(index as usize)
        } else {
            None
        }
    }

    /// Map a coordinate onto storage, `None` when it falls off a bounded axis.
    #[inline]
    pub fn resolve(&self, i: isize, j: isize) -> Option<(usize, usize)> {
        let row = Self::resolve_axis(i, self.rows(), self.topology.wrap_rows)?;
        let col = Self::resolve_axis(j, self.cols(), self.topology.wrap_cols)?;
        Some((row, col))
    }

    /// Same as `resolve`, reporting an index error for write intent.
    pub fn resolve_for_write(&self, i: isize, j: isize) -> Result<(usize, usize)> {
        self.resolve(i, j).ok_or(GolError::Index {
            i,
            j,
            rows: self.rows(),
            cols: self.cols(),
        })
    }

    /// Cell value, or `None` (void) outside a bounded axis
    #[inline]
    pub fn get(&self, i: isize, j: isize) -> Option<u8> {
        let (row, col) = self.resolve(i, j)?;
        self.storage.get(row, col).ok()
    }

    pub fn set(&mut self, i: isize, j: isize, value: u8) -> Result<()> {
        let (row, col) = self.resolve_for_write(i, j)?;
        self.storage.set(row, col, value)
    }

    /// Write an already-resolved cell through a shared reference.
    /// Concurrent callers must write disjoint cells.
    pub(crate) fn store(&self, i: usize, j: usize, value: u8) -> Result<()> {
        self.storage.store(i, j, value)
    }

    pub fn set_all(&mut self, value: u8) {
        self.storage.set_all(value);
    }

    /// Fill every cell with ALIVE or DEAD from a generator seeded with `seed`
    pub fn randomize(&mut self, seed: u64) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(seed);
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                let status = if rng.random_bool(0.5) { ALIVE } else { DEAD };
                self.storage.set(i, j, status)?;
            }
        }
        Ok(())
    }

    /// Same dimensions, topology and storage kind, default-filled
    pub fn clone_empty(&self) -> Self {
        Self::from_storage(self.storage.clone_empty(), self.topology)
    }

    pub fn equals_error(&self, other: &Grid, mode: Equality) -> std::result::Result<(), MismatchError> {
        match mode {
            Equality::Exact => self.storage.exact_equals_error(&other.storage)?,
            Equality::Values => self.storage.value_equals_error(&other.storage)?,
        }
        if self.topology.wrap_rows != other.topology.wrap_rows {
            return Err(MismatchError::field(
                "row limits",
                self.limit_rows_label(),
                other.limit_rows_label(),
            ));
        }
        if self.topology.wrap_cols != other.topology.wrap_cols {
            return Err(MismatchError::field(
                "col limits",
                self.limit_cols_label(),
                other.limit_cols_label(),
            ));
        }
        Ok(())
    }

    pub fn equals(&self, other: &Grid, mode: Equality) -> bool {
        self.equals_error(other, mode).is_ok()
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        let mut living = Vec::new();
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                if self.storage.get(i, j) == Ok(ALIVE) {
                    living.push((i, j));
                }
            }
        }
        living
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.living_cells().len()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                match self.storage.get(i, j) {
                    Ok(DEAD) => write!(f, "·")?,
                    Ok(ALIVE) => write!(f, "█")?,
                    Ok(other) => write!(f, "{}", other)?,
                    Err(_) => write!(f, " ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(isize, isize)], kind: StorageKind, topology: Topology) -> Grid {
        let mut grid = Grid::new(3, 3, kind, topology).unwrap();
        for &(i, j) in cells {
            grid.set(i, j, ALIVE).unwrap();
        }
        grid
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(3, 4, StorageKind::Dense, Topology::bounded()).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.living_count(), 0);
        assert_eq!(grid.limit_rows_label(), "limited");

        assert_eq!(
            Grid::new(0, 4, StorageKind::Dense, Topology::bounded()).unwrap_err(),
            GolError::EmptyGrid { rows: 0, cols: 4 }
        );
    }

    #[test]
    fn test_oversized_grid_rejected() {
        for kind in [StorageKind::Dense, StorageKind::Sparse] {
            assert_eq!(
                Grid::new(usize::MAX, 2, kind, Topology::bounded()).unwrap_err(),
                GolError::GridTooLarge { rows: usize::MAX, cols: 2 }
            );
            assert_eq!(
                Grid::new(1, isize::MAX as usize + 1, kind, Topology::toroidal()).unwrap_err(),
                GolError::GridTooLarge { rows: 1, cols: isize::MAX as usize + 1 }
            );
        }
    }

    #[test]
    fn test_bounded_reads_are_void() {
        let grid = grid_with(&[(0, 0)], StorageKind::Sparse, Topology::bounded());
        assert_eq!(grid.get(0, 0), Some(ALIVE));
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, 3), None);
        assert_eq!(grid.get(3, 3), None);
    }

    #[test]
    fn test_bounded_writes_fail() {
        let mut grid = Grid::new(3, 3, StorageKind::Dense, Topology::bounded()).unwrap();
        assert_eq!(
            grid.set(3, 0, ALIVE).unwrap_err(),
            GolError::Index { i: 3, j: 0, rows: 3, cols: 3 }
        );
        assert!(grid.set(0, -1, ALIVE).is_err());
    }

    #[test]
    fn test_wrapping_negative_indices() {
        let mut grid = Grid::new(3, 5, StorageKind::Dense, Topology::toroidal()).unwrap();
        grid.set(-1, -1, ALIVE).unwrap();
        assert_eq!(grid.get(2, 4), Some(ALIVE));
        assert_eq!(grid.get(-4, -6), Some(ALIVE));
        assert_eq!(grid.get(-301, 299), Some(ALIVE));
        assert_eq!(grid.resolve(-7, 11), Some((2, 1)));
    }

    #[test]
    fn test_mixed_topology() {
        let grid = grid_with(
            &[(0, 0)],
            StorageKind::Dense,
            Topology { wrap_rows: true, wrap_cols: false },
        );
        assert_eq!(grid.get(3, 0), Some(ALIVE));
        assert_eq!(grid.get(0, 3), None);
        assert_eq!(grid.limit_rows_label(), "unlimited");
        assert_eq!(grid.limit_cols_label(), "limited");
    }

    #[test]
    fn test_randomize_is_reproducible() {
        let a = Grid::random(20, 30, StorageKind::Dense, Topology::bounded(), 42).unwrap();
        let b = Grid::random(20, 30, StorageKind::Sparse, Topology::bounded(), 42).unwrap();
        let c = Grid::random(20, 30, StorageKind::Dense, Topology::bounded(), 43).unwrap();
        assert!(a.equals(&b, Equality::Values));
        assert!(!a.equals(&c, Equality::Values));

        let alive = a.living_count();
        assert!(alive > 0 && alive < 600);
        for i in 0..20 {
            for j in 0..30 {
                let value = a.get(i, j).unwrap();
                assert!(value == ALIVE || value == DEAD);
            }
        }
    }

    #[test]
    fn test_topology_mismatch() {
        let bounded = Grid::new(3, 3, StorageKind::Dense, Topology::bounded()).unwrap();
        let wrapped = Grid::new(3, 3, StorageKind::Dense, Topology::toroidal()).unwrap();
        assert_eq!(
            bounded.equals_error(&wrapped, Equality::Values).unwrap_err().to_string(),
            "row limits are different: limited vs unlimited"
        );
    }

    #[test]
    fn test_clone_empty() {
        let grid = grid_with(&[(1, 1), (2, 2)], StorageKind::Sparse, Topology::toroidal());
        let empty = grid.clone_empty();
        assert_eq!(empty.living_count(), 0);
        assert_eq!(empty.topology(), Topology::toroidal());
        assert_eq!(empty.storage_kind(), StorageKind::Sparse);
        assert_eq!(grid.living_cells(), vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn test_display() {
        let grid = grid_with(&[(0, 1)], StorageKind::Dense, Topology::bounded());
        assert_eq!(grid.to_string(), "·█·\n···\n···\n");
    }
}
