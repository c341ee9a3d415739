//! Game of Life core functionality

pub mod changes;
pub mod dense;
pub mod gol;
pub mod grid;
pub mod io;
pub mod neighborhood;
pub mod rules;
pub mod sparse;
pub mod status;
pub mod stepper;
pub mod storage;

pub use changes::CellChange;
pub use gol::Gol;
pub use grid::{Equality, Grid, Topology};
pub use io::{create_example_patterns, load_grid_from_file, parse_grid_from_string, save_grid_to_file};
pub use neighborhood::Neighborhood;
pub use rules::Rule;
pub use status::{ALIVE, DEAD};
pub use stepper::{Concurrency, Stepper};
pub use storage::{CellStorage, StorageKind};
