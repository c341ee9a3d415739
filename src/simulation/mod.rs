//! Running automata from settings

pub mod comparison;
pub mod runner;

pub use comparison::{compare_strategies, StrategyComparison, StrategyTiming};
pub use runner::{Frame, GenerationRecord, RunReport, Simulation};
