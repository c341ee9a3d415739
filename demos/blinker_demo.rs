//! Blinker on a 5x5 bounded grid, stepped under every strategy
//!
//! Run with: cargo run --example blinker_demo

use anyhow::Result;
use game_of_life_engine::{
    game_of_life::{CellChange, ALIVE, DEAD},
    utils::{ColorOutput, GridFormatter},
    AutomatonConfig, Concurrency, Gol,
};

fn main() -> Result<()> {
    for concurrency in [
        Concurrency::Serial,
        Concurrency::Parallel { pool_size: 0 },
        Concurrency::Parallel { pool_size: 4 },
    ] {
        let config = AutomatonConfig {
            name: "Blinker".to_string(),
            description: "period 2 oscillator".to_string(),
            concurrency,
            ..AutomatonConfig::new(5, 5)
        };
        let mut gol = Gol::new(&config)?;
        for j in 1..4 {
            gol.set(2, j, ALIVE)?;
        }

        println!(
            "{}",
            ColorOutput::info(&format!("Strategy: {}", concurrency.strategy_name()))
        );
        let mut current = gol.clone();
        for _ in 0..3 {
            println!("Generation {}:", current.generation());
            println!("{}", GridFormatter::format_grid_compact(current.grid()));
            current = current.next_generation()?;
        }

        let two = gol.fast_forward(2)?;
        if two.grid_equals(&gol) {
            println!("{}", ColorOutput::success("Returned to the initial state after 2 generations"));
        } else {
            println!("{}", ColorOutput::error("Blinker did not oscillate"));
        }
        println!();
    }

    // Turn the blinker into a block before stepping
    let config = AutomatonConfig {
        concurrency: Concurrency::Serial,
        ..AutomatonConfig::new(5, 5)
    };
    let mut gol = Gol::new(&config)?;
    for j in 1..4 {
        gol.set(2, j, ALIVE)?;
    }
    let changes = [
        CellChange::new(2, 3, DEAD),
        CellChange::new(1, 1, ALIVE),
        CellChange::new(1, 2, ALIVE),
    ];
    let block = gol.change_cells(&changes)?;
    println!("After changes:\n{}", GridFormatter::format_grid_with_coords(block.grid()));
    let next = block.next_generation()?;
    println!("Still life: {}", next.grid_equals(&block));

    Ok(())
}
