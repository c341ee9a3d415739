//! Dense cell storage: one byte per cell in row-major order

use crate::error::{GolError, Result};
use std::sync::atomic::{AtomicU8, Ordering};

/// Flat row-major storage with O(1) access.
///
/// Cells are atomics so that parallel steppers can fill disjoint cells of a
/// destination grid through a shared reference. Every access uses `Relaxed`
/// ordering: a generation is only read after the stepper's join, which
/// already orders all of its writes.
#[derive(Debug)]
pub struct DenseStorage {
    rows: usize,
    cols: usize,
    cells: Box<[AtomicU8]>,
}

impl DenseStorage {
    /// Create a dead-filled storage
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0)
    }

    fn filled(rows: usize, cols: usize, value: u8) -> Self {
        Self {
            rows,
            cols,
            cells: (0..rows * cols).map(|_| AtomicU8::new(value)).collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> Result<usize> {
        if i >= self.rows || j >= self.cols {
            return Err(GolError::Index {
                i: i as isize,
                j: j as isize,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(i * self.cols + j)
    }

    pub fn get(&self, i: usize, j: usize) -> Result<u8> {
        let offset = self.offset(i, j)?;
        Ok(self.cells[offset].load(Ordering::Relaxed))
    }

    pub fn set(&mut self, i: usize, j: usize, value: u8) -> Result<()> {
        let offset = self.offset(i, j)?;
        *self.cells[offset].get_mut() = value;
        Ok(())
    }

    /// Write through a shared reference. Concurrent callers must target
    /// distinct cells for the result to be deterministic.
    pub fn store(&self, i: usize, j: usize, value: u8) -> Result<()> {
        let offset = self.offset(i, j)?;
        self.cells[offset].store(value, Ordering::Relaxed);
        Ok(())
    }

    pub fn set_all(&mut self, value: u8) {
        for cell in self.cells.iter_mut() {
            *cell.get_mut() = value;
        }
    }

    pub fn clone_empty(&self) -> Self {
        Self::new(self.rows, self.cols)
    }
}

impl Clone for DenseStorage {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .map(|cell| AtomicU8::new(cell.load(Ordering::Relaxed)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_creation() {
        let dense = DenseStorage::new(5, 7);
        assert_eq!(dense.rows(), 5);
        assert_eq!(dense.cols(), 7);
        for i in 0..5 {
            for j in 0..7 {
                assert_eq!(dense.get(i, j).unwrap(), 0);
            }
        }
    }

    #[test]
    fn test_dense_get_set() {
        let mut dense = DenseStorage::new(5, 7);
        dense.set(1, 2, 8).unwrap();
        assert_eq!(dense.get(1, 2).unwrap(), 8);
        assert_eq!(dense.get(2, 1).unwrap(), 0);

        dense.store(4, 6, 3).unwrap();
        assert_eq!(dense.get(4, 6).unwrap(), 3);
    }

    #[test]
    fn test_dense_out_of_range() {
        let mut dense = DenseStorage::new(3, 3);
        assert!(matches!(dense.get(3, 0), Err(GolError::Index { i: 3, j: 0, .. })));
        assert!(dense.set(0, 3, 1).is_err());
        assert!(dense.store(7, 7, 1).is_err());
    }

    #[test]
    fn test_dense_set_all_and_clone() {
        let mut dense = DenseStorage::new(4, 4);
        dense.set_all(1);
        assert_eq!(dense.get(3, 3).unwrap(), 1);

        let mut clone = dense.clone();
        clone.set(0, 0, 0).unwrap();
        assert_eq!(dense.get(0, 0).unwrap(), 1);

        let empty = dense.clone_empty();
        assert_eq!(empty.get(2, 2).unwrap(), 0);
        assert_eq!(empty.rows(), 4);
    }
}
