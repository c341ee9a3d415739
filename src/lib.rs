//! Game of Life engine
//!
//! Two-dimensional cellular automata with pluggable storage (dense or
//! sparse), per-axis wraparound, Moore or Von Neumann neighborhoods, S/B
//! rules and serial or parallel generation stepping.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::{AutomatonConfig, Settings};
pub use error::{GolError, MismatchError};
pub use game_of_life::{CellChange, Concurrency, Gol, Grid, Neighborhood, Rule, StorageKind, Topology};
pub use simulation::{RunReport, Simulation};

use anyhow::Result;

/// Main entry point: build the automaton described by `settings` and run it
pub fn run_simulation(settings: Settings) -> Result<RunReport> {
    let simulation = Simulation::new(settings)?;
    let (_, report) = simulation.run()?;
    Ok(report)
}
