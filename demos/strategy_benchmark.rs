//! Timing of the stepping strategies over a range of grid sizes
//!
//! Run with: cargo run --release --example strategy_benchmark

use anyhow::{Context, Result};
use game_of_life_engine::{
    simulation::compare_strategies,
    utils::{ColorOutput, GridFormatter},
    AutomatonConfig, Gol, StorageKind,
};

const GENERATIONS: usize = 10;
const SEED: u64 = 7;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let pool_size = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);

    for storage in [StorageKind::Dense, StorageKind::Sparse] {
        for size in [16, 64, 128] {
            let config = AutomatonConfig {
                name: format!("{} {}x{}", storage, size, size),
                storage,
                wrap_rows: true,
                wrap_cols: true,
                ..AutomatonConfig::new(size, size)
            };
            let gol = Gol::random(&config, SEED)?;
            let comparison = compare_strategies(&gol, GENERATIONS, pool_size)
                .with_context(|| format!("Benchmark failed for {}", config.name))?;

            println!("{}", ColorOutput::info(&format!("=== {} ===", config.name)));
            println!("{}", GridFormatter::format_comparison(&comparison));
            if let Some(fastest) = comparison.fastest() {
                println!("Fastest: {} ({:.2}ms)\n", fastest.strategy, fastest.elapsed_ms);
            }
        }
    }

    Ok(())
}
