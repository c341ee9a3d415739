//! Configuration management for the automaton engine

pub mod settings;

pub use settings::{
    AutomatonConfig, CliOverrides, OutputConfig, OutputFormat, Settings, SimulationConfig,
};
