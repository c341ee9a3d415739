//! Command line interface for the Game of Life engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use game_of_life_engine::{
    config::{CliOverrides, OutputFormat, Settings},
    game_of_life::{create_example_patterns, Concurrency},
    simulation::{compare_strategies, Simulation},
    utils::{ColorOutput, GridFormatter},
};
use log::{debug, LevelFilter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "game_of_life_engine")]
#[command(about = "Concurrent Game of Life engine")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    Serial,
    Unbounded,
    Pool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Initial pattern file (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Random seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Rule such as 23/3 or B36/S23 (overrides config)
        #[arg(short, long)]
        rule: Option<String>,

        /// Stepping strategy (overrides config)
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,

        /// Worker pool size used with --strategy pool
        #[arg(long, default_value_t = 10)]
        pool_size: usize,

        /// Report format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Write the JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Compare stepping strategies on the configured automaton
    Compare {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Worker pool size for the pool strategy
        #[arg(long, default_value_t = 10)]
        pool_size: usize,
    },
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            pattern,
            generations,
            seed,
            rule,
            strategy,
            pool_size,
            format,
            output,
        } => {
            let overrides = CliOverrides {
                generations,
                seed,
                pattern_file: pattern,
                rule,
                concurrency: strategy.map(|s| concurrency_for(s, pool_size)),
                format: format.map(|f| match f {
                    Format::Text => OutputFormat::Text,
                    Format::Json => OutputFormat::Json,
                }),
            };
            run_command(config, overrides, output)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Compare {
            config,
            generations,
            pool_size,
        } => compare_command(config, generations, pool_size),
    }
}

fn concurrency_for(strategy: Strategy, pool_size: usize) -> Concurrency {
    match strategy {
        Strategy::Serial => Concurrency::Serial,
        Strategy::Unbounded => Concurrency::Parallel { pool_size: 0 },
        Strategy::Pool => Concurrency::Parallel { pool_size: pool_size.max(1) },
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, output: Option<PathBuf>) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;
    debug!("Effective settings: {:?}", settings);

    let format = settings.output.format;
    let simulation = Simulation::new(settings).context("Failed to build automaton")?;
    if format == OutputFormat::Text {
        println!("{}", ColorOutput::info(&format!("Starting {}", simulation.initial().name())));
        println!("{}", GridFormatter::format_grid_compact(simulation.initial().grid()));
    }

    let (last, report) = simulation.run().context("Simulation failed")?;

    match format {
        OutputFormat::Text => {
            println!("{}", GridFormatter::format_report(&report));
            println!("\nFinal State:");
            println!("{}", GridFormatter::format_grid_compact(last.grid()));
        }
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if let Some(path) = output {
        report.save_to_file(&path)?;
        println!("{}", ColorOutput::success(&format!("Report saved to {}", path.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&patterns_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut blinker = Settings::default();
    blinker.automaton.name = "Blinker".to_string();
    blinker.automaton.concurrency = Concurrency::Serial;
    blinker.simulation.generations = 2;
    blinker.simulation.pattern_file = Some(PathBuf::from("patterns/blinker.txt"));
    blinker.output.print_every = Some(1);
    blinker.to_file(&examples_dir.join("blinker.yaml"))?;

    let mut torus = Settings::default();
    torus.automaton.name = "Glider on a torus".to_string();
    torus.automaton.wrap_rows = true;
    torus.automaton.wrap_cols = true;
    torus.simulation.generations = 20;
    torus.simulation.pattern_file = Some(PathBuf::from("patterns/glider.txt"));
    torus.output.print_every = Some(4);
    torus.to_file(&examples_dir.join("glider_torus.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your patterns to {}", patterns_dir.display());
    println!("3. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

fn compare_command(config_path: PathBuf, generations: Option<usize>, pool_size: usize) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let generations = generations.unwrap_or(settings.simulation.generations);

    let gol = Simulation::new(settings)?.initial().clone();

    println!(
        "{}",
        ColorOutput::info(&format!(
            "Comparing strategies on {}x{} for {} generations",
            gol.rows(),
            gol.cols(),
            generations
        ))
    );
    let comparison = compare_strategies(&gol, generations, pool_size)?;
    println!("{}", GridFormatter::format_comparison(&comparison));

    if comparison.all_agree() {
        println!("{}", ColorOutput::success("All strategies produced identical grids"));
        Ok(())
    } else {
        println!("{}", ColorOutput::error("Strategies disagree"));
        anyhow::bail!("strategy mismatch")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "game_of_life_engine",
            "run",
            "--config",
            "test.yaml",
            "--generations",
            "5",
            "--strategy",
            "pool",
            "--pool-size",
            "4",
        ]);
        assert!(cli.is_ok());

        let bad = Cli::try_parse_from(["game_of_life_engine", "run", "--strategy", "fastest"]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_concurrency_for() {
        assert_eq!(concurrency_for(Strategy::Serial, 3), Concurrency::Serial);
        assert_eq!(concurrency_for(Strategy::Unbounded, 3), Concurrency::Parallel { pool_size: 0 });
        assert_eq!(concurrency_for(Strategy::Pool, 0), Concurrency::Parallel { pool_size: 1 });
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/examples/blinker.yaml").exists());
        assert!(temp_dir.path().join("patterns/glider.txt").exists());

        let settings = Settings::from_file(&temp_dir.path().join("config/default.yaml")).unwrap();
        assert_eq!(settings.simulation.generations, 10);
    }

    #[test]
    fn test_run_command_writes_report() {
        let temp_dir = tempdir().unwrap();
        let config = temp_dir.path().join("missing.yaml");
        let report = temp_dir.path().join("report.json");
        let overrides = CliOverrides {
            generations: Some(3),
            concurrency: Some(Concurrency::Serial),
            format: Some(OutputFormat::Json),
            ..CliOverrides::default()
        };
        run_command(config, overrides, Some(report.clone())).unwrap();

        let json = std::fs::read_to_string(report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["end_generation"], 3);
    }
}
