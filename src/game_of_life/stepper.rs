//! Generation stepping strategies
//!
//! Every strategy reads the frozen current grid and writes a fresh grid of
//! the same shape. Reads and writes never touch the same storage, and each
//! cell is written exactly once, so the strategies agree bit for bit.

use super::grid::Grid;
use super::neighborhood::neighbors_count;
use super::rules::Rule;
use super::status::ALIVE;
use crate::error::{GolError, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// Default number of workers for the bounded pool
pub const DEFAULT_POOL_SIZE: usize = 10;

/// Concurrency configuration of an automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Concurrency {
    /// Single-threaded row-major pass
    Serial,
    /// `pool_size` workers draining a job queue; `0` spawns one task per cell
    Parallel { pool_size: usize },
}

impl Default for Concurrency {
    fn default() -> Self {
        Concurrency::Parallel { pool_size: DEFAULT_POOL_SIZE }
    }
}

impl Concurrency {
    pub fn strategy_name(self) -> &'static str {
        match self {
            Concurrency::Serial => "serial",
            Concurrency::Parallel { pool_size: 0 } => "unbounded",
            Concurrency::Parallel { .. } => "worker-pool",
        }
    }
}

/// Per-cell transition function: rule plus resolved neighbor offsets.
#[derive(Debug, Clone, Copy)]
pub struct CellKernel<'a> {
    rule: &'a Rule,
    offsets: &'static [(isize, isize)],
}

impl<'a> CellKernel<'a> {
    pub fn new(rule: &'a Rule, offsets: &'static [(isize, isize)]) -> Self {
        Self { rule, offsets }
    }

    /// Next status of `(i, j)`. Reads `grid` only.
    #[inline]
    pub fn next_cell(&self, grid: &Grid, i: usize, j: usize) -> Result<u8> {
        let (si, sj) = (i as isize, j as isize);
        let status = grid.get(si, sj).ok_or(GolError::Index {
            i: si,
            j: sj,
            rows: grid.rows(),
            cols: grid.cols(),
        })?;
        let alive = neighbors_count(grid, si, sj, ALIVE, self.offsets);
        self.rule
            .next_status(status, alive)
            .ok_or(GolError::InvalidCellStatus { i, j, value: status })
    }
}

/// Executes one generation according to a `Concurrency` setting.
///
/// The worker pool is built once and shared between clones of the owning
/// automaton.
#[derive(Debug, Clone)]
pub struct Stepper {
    concurrency: Concurrency,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Stepper {
    pub fn new(concurrency: Concurrency) -> Result<Self> {
        let pool = match concurrency {
            Concurrency::Parallel { pool_size } if pool_size > 0 => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(pool_size)
                    .thread_name(|index| format!("gol-worker-{}", index))
                    .build()
                    .map_err(|e| GolError::WorkerPool(e.to_string()))?;
                Some(Arc::new(pool))
            }
            _ => None,
        };
        Ok(Self { concurrency, pool })
    }

    pub fn serial() -> Self {
        Self {
            concurrency: Concurrency::Serial,
            pool: None,
        }
    }

    pub fn concurrency(&self) -> Concurrency {
        self.concurrency
    }

    /// Compute the generation after `current`
    pub fn step(&self, kernel: &CellKernel<'_>, current: &Grid) -> Result<Grid> {
        match (&self.pool, self.concurrency) {
            (_, Concurrency::Serial) => step_serial(kernel, current),
            (Some(pool), Concurrency::Parallel { pool_size }) => {
                step_worker_pool(pool, pool_size, kernel, current)
            }
            (None, Concurrency::Parallel { .. }) => step_unbounded(kernel, current),
        }
    }

    /// Run `op` on this stepper's pool, or on the global rayon pool.
    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

fn step_serial(kernel: &CellKernel<'_>, current: &Grid) -> Result<Grid> {
    let mut next = current.clone_empty();
    for i in 0..current.rows() {
        for j in 0..current.cols() {
            let value = kernel.next_cell(current, i, j)?;
            next.set(i as isize, j as isize, value)?;
        }
    }
    Ok(next)
}

/// One spawned task per cell on the global rayon pool.
fn step_unbounded(kernel: &CellKernel<'_>, current: &Grid) -> Result<Grid> {
    let next = current.clone_empty();
    let failure = OnceLock::new();
    rayon::scope(|scope| {
        for i in 0..current.rows() {
            for j in 0..current.cols() {
                let (next, failure) = (&next, &failure);
                scope.spawn(move |_| {
                    if failure.get().is_some() {
                        return;
                    }
                    let result = kernel
                        .next_cell(current, i, j)
                        .and_then(|value| next.store(i, j, value));
                    if let Err(err) = result {
                        let _ = failure.set(err);
                    }
                });
            }
        }
    });
    finish(next, failure)
}

/// `workers` long-lived jobs pull cell indices from a shared cursor until
/// the queue is drained. `pool.scope` returns once every worker is done.
fn step_worker_pool(
    pool: &rayon::ThreadPool,
    workers: usize,
    kernel: &CellKernel<'_>,
    current: &Grid,
) -> Result<Grid> {
    let next = current.clone_empty();
    let cols = current.cols();
    let total = current.rows() * cols;
    let cursor = AtomicUsize::new(0);
    let failure = OnceLock::new();
    pool.scope(|scope| {
        for _ in 0..workers.min(total) {
            scope.spawn(|_| loop {
                if failure.get().is_some() {
                    break;
                }
                let job = cursor.fetch_add(1, Ordering::Relaxed);
                if job >= total {
                    break;
                }
                let (i, j) = (job / cols, job % cols);
                let result = kernel
                    .next_cell(current, i, j)
                    .and_then(|value| next.store(i, j, value));
                if let Err(err) = result {
                    let _ = failure.set(err);
                    break;
                }
            });
        }
    });
    finish(next, failure)
}

fn finish(next: Grid, failure: OnceLock<GolError>) -> Result<Grid> {
    match failure.into_inner() {
        Some(err) => Err(err),
        None => Ok(next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::grid::{Equality, Topology};
    use crate::game_of_life::neighborhood::Neighborhood;
    use crate::game_of_life::StorageKind;

    fn steppers() -> Vec<Stepper> {
        vec![
            Stepper::serial(),
            Stepper::new(Concurrency::Parallel { pool_size: 0 }).unwrap(),
            Stepper::new(Concurrency::Parallel { pool_size: 3 }).unwrap(),
        ]
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Concurrency::Serial.strategy_name(), "serial");
        assert_eq!(Concurrency::Parallel { pool_size: 0 }.strategy_name(), "unbounded");
        assert_eq!(Concurrency::default().strategy_name(), "worker-pool");
    }

    #[test]
    fn test_blinker_all_strategies() {
        let rule = Rule::conway();
        let kernel = CellKernel::new(&rule, Neighborhood::Moore.offsets());
        for kind in [StorageKind::Dense, StorageKind::Sparse] {
            let mut grid = Grid::new(3, 3, kind, Topology::bounded()).unwrap();
            for j in 0..3 {
                grid.set(1, j, ALIVE).unwrap();
            }
            for stepper in steppers() {
                let next = stepper.step(&kernel, &grid).unwrap();
                assert_eq!(next.living_cells(), vec![(0, 1), (1, 1), (2, 1)]);
                assert_eq!(next.storage_kind(), kind);
            }
        }
    }

    #[test]
    fn test_strategies_agree_on_random_grid() {
        let rule = Rule::conway();
        let kernel = CellKernel::new(&rule, Neighborhood::Moore.offsets());
        let grid = Grid::random(40, 25, StorageKind::Sparse, Topology::toroidal(), 7).unwrap();
        let results: Vec<Grid> = steppers()
            .iter()
            .map(|stepper| stepper.step(&kernel, &grid).unwrap())
            .collect();
        for result in &results[1..] {
            assert!(results[0].equals(result, Equality::Values));
            assert!(results[0].equals(result, Equality::Exact));
        }
    }

    #[test]
    fn test_invalid_status_aborts() {
        let rule = Rule::conway();
        let kernel = CellKernel::new(&rule, Neighborhood::Moore.offsets());
        let mut grid = Grid::new(4, 4, StorageKind::Dense, Topology::bounded()).unwrap();
        grid.set(2, 3, 5).unwrap();
        for stepper in steppers() {
            assert_eq!(
                stepper.step(&kernel, &grid).unwrap_err(),
                GolError::InvalidCellStatus { i: 2, j: 3, value: 5 }
            );
        }
    }

    #[test]
    fn test_pool_larger_than_grid() {
        let rule = Rule::conway();
        let kernel = CellKernel::new(&rule, Neighborhood::VonNeumann.offsets());
        let grid = Grid::new(1, 2, StorageKind::Dense, Topology::bounded()).unwrap();
        let stepper = Stepper::new(Concurrency::Parallel { pool_size: 16 }).unwrap();
        let next = stepper.step(&kernel, &grid).unwrap();
        assert_eq!(next.living_count(), 0);
    }
}
