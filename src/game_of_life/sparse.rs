//! Sparse (dictionary-of-keys) cell storage
//!
//! Only cells that deviate from the default value are stored. Keys are
//! spread over a bounded number of row-sharded maps, each behind its own
//! `RwLock`. The concurrency contract is exactly "safe concurrent writes to
//! disjoint keys, and concurrent reads while nobody writes": that is what a
//! stepper needs, with the source grid only read and the destination grid
//! only written during a generation. Single-threaded mutation goes through
//! `&mut self` and never touches a lock.

use crate::error::{GolError, Result};
use itertools::Itertools;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Upper bound on the number of shards, so `set_all` stays constant-time.
const MAX_SHARDS: usize = 64;

type Shard = HashMap<(usize, usize), u8>;

#[derive(Debug)]
pub struct SparseStorage {
    rows: usize,
    cols: usize,
    default_value: u8,
    shards: Box<[RwLock<Shard>]>,
}

impl SparseStorage {
    pub fn new(rows: usize, cols: usize, default_value: u8) -> Self {
        let shard_count = rows.clamp(1, MAX_SHARDS);
        Self {
            rows,
            cols,
            default_value,
            shards: (0..shard_count).map(|_| RwLock::new(Shard::new())).collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value returned for every cell without an explicit entry
    pub fn default_value(&self) -> u8 {
        self.default_value
    }

    #[inline]
    fn check(&self, i: usize, j: usize) -> Result<()> {
        if i >= self.rows || j >= self.cols {
            return Err(GolError::Index {
                i: i as isize,
                j: j as isize,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    #[inline]
    fn shard(&self, i: usize) -> usize {
        i % self.shards.len()
    }

    pub fn get(&self, i: usize, j: usize) -> Result<u8> {
        self.check(i, j)?;
        let shard = self.shards[self.shard(i)]
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(shard.get(&(i, j)).copied().unwrap_or(self.default_value))
    }

    /// Explicit entry for a cell, `None` when it holds the default.
    pub fn get_explicit(&self, i: usize, j: usize) -> Option<u8> {
        let shard = self.shards[self.shard(i)]
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        shard.get(&(i, j)).copied()
    }

    pub fn set(&mut self, i: usize, j: usize, value: u8) -> Result<()> {
        self.check(i, j)?;
        let index = self.shard(i);
        let default_value = self.default_value;
        let shard = self.shards[index]
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        Self::write(shard, default_value, i, j, value);
        Ok(())
    }

    /// Write through a shared reference (see the module contract).
    pub fn store(&self, i: usize, j: usize, value: u8) -> Result<()> {
        self.check(i, j)?;
        let mut shard = self.shards[self.shard(i)]
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Self::write(&mut shard, self.default_value, i, j, value);
        Ok(())
    }

    fn write(shard: &mut Shard, default_value: u8, i: usize, j: usize, value: u8) {
        if value == default_value {
            shard.remove(&(i, j));
        } else {
            shard.insert((i, j), value);
        }
    }

    /// Reset every cell by changing the default and dropping all entries.
    pub fn set_all(&mut self, value: u8) {
        self.default_value = value;
        for shard in self.shards.iter_mut() {
            *shard.get_mut().unwrap_or_else(PoisonError::into_inner) = Shard::new();
        }
    }

    /// Number of explicitly stored cells
    pub fn explicit_len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.read().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }

    /// Explicit entries in row-major order
    pub fn entries(&self) -> Vec<(usize, usize, u8)> {
        self.shards
            .iter()
            .flat_map(|shard| {
                shard
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .iter()
                    .map(|(&(i, j), &value)| (i, j, value))
                    .collect::<Vec<_>>()
            })
            .sorted_unstable()
            .collect()
    }

    pub fn clone_empty(&self) -> Self {
        Self::new(self.rows, self.cols, self.default_value)
    }
}

impl Clone for SparseStorage {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            default_value: self.default_value,
            shards: self
                .shards
                .iter()
                .map(|shard| RwLock::new(shard.read().unwrap_or_else(PoisonError::into_inner).clone()))
                .collect(),
        }
    }
}
