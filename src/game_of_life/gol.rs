//! The automaton aggregate

use super::grid::{Equality, Grid, Topology};
use super::neighborhood::Neighborhood;
use super::rules::Rule;
use super::stepper::{CellKernel, Concurrency, Stepper};
use super::storage::StorageKind;
use crate::config::AutomatonConfig;
use crate::error::{MismatchError, Result};
use log::debug;
use std::fmt;

/// A cellular automaton: a grid plus the rule, neighborhood and generation
/// counter that drive it.
///
/// Stepping never mutates the receiver. `next_generation` returns a new
/// automaton owning a new grid, which is what lets the parallel strategies
/// share the current grid read-only.
#[derive(Debug, Clone)]
pub struct Gol {
    name: String,
    description: String,
    grid: Grid,
    generation: u64,
    neighborhood: Neighborhood,
    offsets: &'static [(isize, isize)],
    rule: Rule,
    stepper: Stepper,
}

impl Gol {
    /// Create a blank (dead-filled) automaton
    pub fn new(config: &AutomatonConfig) -> Result<Self> {
        let grid = Grid::new(config.rows, config.cols, config.storage, config.topology())?;
        Self::from_config(config, grid)
    }

    /// Create an automaton whose cells are seeded from `seed`
    pub fn random(config: &AutomatonConfig, seed: u64) -> Result<Self> {
        let grid = Grid::random(config.rows, config.cols, config.storage, config.topology(), seed)?;
        Self::from_config(config, grid)
    }

    fn from_config(config: &AutomatonConfig, grid: Grid) -> Result<Self> {
        Self::with_grid(
            &config.name,
            &config.description,
            config.generation,
            Rule::parse(&config.rule)?,
            config.neighborhood,
            config.concurrency,
            grid,
        )
    }

    /// Wrap a grid built by an adapter
    pub fn with_grid(
        name: &str,
        description: &str,
        generation: u64,
        rule: Rule,
        neighborhood: Neighborhood,
        concurrency: Concurrency,
        grid: Grid,
    ) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            grid,
            generation,
            neighborhood,
            offsets: neighborhood.offsets(),
            rule,
            stepper: Stepper::new(concurrency)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn wraps_rows(&self) -> bool {
        self.grid.wraps_rows()
    }

    pub fn wraps_cols(&self) -> bool {
        self.grid.wraps_cols()
    }

    pub fn topology(&self) -> Topology {
        self.grid.topology()
    }

    pub fn storage_kind(&self) -> StorageKind {
        self.grid.storage_kind()
    }

    /// Cell value, `None` past a bounded edge
    pub fn get(&self, i: isize, j: isize) -> Option<u8> {
        self.grid.get(i, j)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// "Moore" or "Von Neumann"
    pub fn neighborhood_name(&self) -> &'static str {
        self.neighborhood.name()
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn rule_string(&self) -> &str {
        self.rule.notation()
    }

    pub fn concurrency(&self) -> Concurrency {
        self.stepper.concurrency()
    }

    /// Switch stepping strategy; builds a new worker pool when needed.
    pub fn set_concurrency(&mut self, concurrency: Concurrency) -> Result<()> {
        if concurrency != self.stepper.concurrency() {
            self.stepper = Stepper::new(concurrency)?;
        }
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    pub fn set(&mut self, i: isize, j: isize, value: u8) -> Result<()> {
        self.grid.set(i, j, value)
    }

    pub fn set_all(&mut self, value: u8) {
        self.grid.set_all(value);
    }

    pub fn living_count(&self) -> usize {
        self.grid.living_count()
    }

    /// Compute the next generation into a new automaton
    pub fn next_generation(&self) -> Result<Self> {
        let kernel = CellKernel::new(&self.rule, self.offsets);
        let grid = self.stepper.step(&kernel, &self.grid)?;
        debug!(
            "{}: generation {} -> {} ({}x{}, {} strategy)",
            self.name,
            self.generation,
            self.generation + 1,
            self.rows(),
            self.cols(),
            self.stepper.concurrency().strategy_name()
        );
        Ok(self.rebuilt(grid, self.generation + 1))
    }

    fn rebuilt(&self, grid: Grid, generation: u64) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            grid,
            generation,
            neighborhood: self.neighborhood,
            offsets: self.offsets,
            rule: self.rule.clone(),
            stepper: self.stepper.clone(),
        }
    }

    /// Advance `generations` steps, one after another
    pub fn fast_forward(&self, generations: usize) -> Result<Self> {
        self.fast_forward_until(generations, |_| false)
    }

    /// Like `fast_forward`, but consults `stop` before each step and
    /// returns early once it answers `true`.
    pub fn fast_forward_until<F>(&self, generations: usize, mut stop: F) -> Result<Self>
    where
        F: FnMut(&Gol) -> bool,
    {
        let mut current = self.clone();
        for _ in 0..generations {
            if stop(&current) {
                break;
            }
            current = current.next_generation()?;
        }
        Ok(current)
    }

    /// Same configuration and generation, default-filled grid
    pub fn clone_empty(&self) -> Self {
        self.rebuilt(self.grid.clone_empty(), self.generation)
    }

    /// Compare name, description, rule, generation, neighborhood and grid
    /// values, reporting the first difference.
    pub fn equals_error(&self, other: &Gol) -> std::result::Result<(), MismatchError> {
        if self.name != other.name {
            return Err(MismatchError::field(
                "names",
                format!("\"{}\"", self.name),
                format!("\"{}\"", other.name),
            ));
        }
        if self.description != other.description {
            return Err(MismatchError::field(
                "descriptions",
                format!("\"{}\"", self.description),
                format!("\"{}\"", other.description),
            ));
        }
        if self.rule.notation() != other.rule.notation() {
            return Err(MismatchError::field("rules", &self.rule, &other.rule));
        }
        if self.generation != other.generation {
            return Err(MismatchError::field("generations", self.generation, other.generation));
        }
        if self.neighborhood != other.neighborhood {
            return Err(MismatchError::field(
                "neighborhoods",
                self.neighborhood,
                other.neighborhood,
            ));
        }
        self.grid_equals_error(other)
    }

    pub fn equals(&self, other: &Gol) -> bool {
        self.equals_error(other).is_ok()
    }

    /// Compare only the grids (values and topology)
    pub fn grid_equals_error(&self, other: &Gol) -> std::result::Result<(), MismatchError> {
        self.grid.equals_error(&other.grid, Equality::Values)
    }

    pub fn grid_equals(&self, other: &Gol) -> bool {
        self.grid_equals_error(other).is_ok()
    }
}

impl PartialEq for Gol {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for Gol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (generation {})", self.name, self.generation)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        writeln!(
            f,
            "{}x{} | rule {} | {} | rows {} | cols {}",
            self.rows(),
            self.cols(),
            self.rule,
            self.neighborhood,
            self.grid.limit_rows_label(),
            self.grid.limit_cols_label()
        )?;
        write!(f, "{}", self.grid)
    }
}
