//! Batched cell edits applied before a step

use super::gol::Gol;
use super::stepper::Concurrency;
use crate::error::{GolError, Result};
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Set cell `(i, j)` to `status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellChange {
    pub i: isize,
    pub j: isize,
    pub status: u8,
}

impl CellChange {
    pub fn new(i: isize, j: isize, status: u8) -> Self {
        Self { i, j, status }
    }
}

impl From<(isize, isize, u8)> for CellChange {
    fn from((i, j, status): (isize, isize, u8)) -> Self {
        Self { i, j, status }
    }
}

impl Gol {
    /// Apply `changes` to a copy of this automaton.
    ///
    /// An empty list borrows `self` unchanged. A serial automaton folds the
    /// list in order, so a repeated coordinate keeps its last value. A
    /// parallel automaton applies changes concurrently and therefore rejects
    /// repeated coordinates (after wraparound) with
    /// `GolError::DuplicateChange`. Every coordinate is validated before
    /// anything is written.
    pub fn change_cells(&self, changes: &[CellChange]) -> Result<Cow<'_, Gol>> {
        if changes.is_empty() {
            return Ok(Cow::Borrowed(self));
        }
        let changed = match self.concurrency() {
            Concurrency::Serial => self.serial_change_cells(changes)?,
            Concurrency::Parallel { .. } => self.parallel_change_cells(changes)?,
        };
        Ok(Cow::Owned(changed))
    }

    fn resolve_changes(&self, changes: &[CellChange]) -> Result<Vec<(usize, usize, u8)>> {
        changes
            .iter()
            .map(|change| {
                self.grid()
                    .resolve_for_write(change.i, change.j)
                    .map(|(i, j)| (i, j, change.status))
            })
            .collect()
    }

    fn serial_change_cells(&self, changes: &[CellChange]) -> Result<Gol> {
        self.resolve_changes(changes)?;
        let mut copy = self.clone();
        for change in changes {
            copy.set(change.i, change.j, change.status)?;
        }
        Ok(copy)
    }

    fn parallel_change_cells(&self, changes: &[CellChange]) -> Result<Gol> {
        let resolved = self.resolve_changes(changes)?;
        if let Some(&(i, j, _)) = resolved.iter().duplicates_by(|&&(i, j, _)| (i, j)).next() {
            return Err(GolError::DuplicateChange { i, j });
        }
        let copy = self.clone();
        self.stepper().install(|| {
            resolved
                .par_iter()
                .try_for_each(|&(i, j, status)| copy.grid().store(i, j, status))
        })?;
        Ok(copy)
    }
}
