//! Settings-driven simulation runs

use crate::config::Settings;
use crate::game_of_life::{io, Gol, Rule};
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A configured automaton ready to run
pub struct Simulation {
    settings: Settings,
    initial: Gol,
}

/// Population after one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: u64,
    pub population: usize,
}

/// A rendered grid kept for output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub generation: u64,
    pub grid: String,
}

/// Result of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub name: String,
    pub rule: String,
    pub neighborhood: String,
    pub strategy: String,
    pub rows: usize,
    pub cols: usize,
    pub start_generation: u64,
    pub end_generation: u64,
    /// Population of the initial grid followed by one entry per step
    pub history: Vec<GenerationRecord>,
    /// Grids captured every `print_every` generations
    pub frames: Vec<Frame>,
    pub elapsed_ms: u64,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunReport {
    pub fn initial_population(&self) -> usize {
        self.history.first().map_or(0, |record| record.population)
    }

    pub fn final_population(&self) -> usize {
        self.history.last().map_or(0, |record| record.population)
    }

    pub fn generations(&self) -> u64 {
        self.end_generation - self.start_generation
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file as JSON
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report: {}", path.as_ref().display()))?;
        Ok(())
    }
}

impl Simulation {
    /// Build the initial automaton: pattern file first, then a seeded random
    /// grid, otherwise a blank one.
    pub fn new(settings: Settings) -> Result<Self> {
        let config = &settings.automaton;
        let initial = match (&settings.simulation.pattern_file, settings.simulation.seed) {
            (Some(pattern), _) => {
                let grid = io::load_grid_from_file(pattern, config.storage, config.topology())?;
                let rule = Rule::parse(&config.rule)?;
                Gol::with_grid(
                    &config.name,
                    &config.description,
                    config.generation,
                    rule,
                    config.neighborhood,
                    config.concurrency,
                    grid,
                )?
            }
            (None, Some(seed)) => Gol::random(config, seed)?,
            (None, None) => Gol::new(config)?,
        };
        Ok(Self { settings, initial })
    }

    /// Run an automaton built elsewhere under `settings`
    pub fn with_gol(settings: Settings, initial: Gol) -> Self {
        Self { settings, initial }
    }

    pub fn initial(&self) -> &Gol {
        &self.initial
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Step the configured number of generations. Returns the final
    /// automaton and the report.
    pub fn run(&self) -> Result<(Gol, RunReport)> {
        let generations = self.settings.simulation.generations;
        let print_every = self.settings.output.print_every;
        let start_time = Instant::now();

        info!(
            "Running {} for {} generations ({}x{}, rule {}, {} strategy)",
            self.initial.name(),
            generations,
            self.initial.rows(),
            self.initial.cols(),
            self.initial.rule(),
            self.initial.concurrency().strategy_name()
        );

        let mut history = Vec::with_capacity(generations + 1);
        let mut frames = Vec::new();
        let mut current = self.initial.clone();
        history.push(Self::record(&current));
        if print_every.is_some() {
            frames.push(Self::frame(&current));
        }

        for step in 1..=generations {
            let target = current.generation() + 1;
            current = current
                .next_generation()
                .with_context(|| format!("Failed to compute generation {}", target))?;
            history.push(Self::record(&current));
            if print_every.is_some_and(|every| step % every == 0) {
                frames.push(Self::frame(&current));
            }
        }

        let elapsed = start_time.elapsed();
        info!(
            "Finished {} at generation {} in {:.3}s, population {}",
            current.name(),
            current.generation(),
            elapsed.as_secs_f64(),
            current.living_count()
        );

        let report = RunReport {
            name: current.name().to_string(),
            rule: current.rule_string().to_string(),
            neighborhood: current.neighborhood_name().to_string(),
            strategy: current.concurrency().strategy_name().to_string(),
            rows: current.rows(),
            cols: current.cols(),
            start_generation: self.initial.generation(),
            end_generation: current.generation(),
            history,
            frames,
            elapsed_ms: elapsed.as_millis() as u64,
            elapsed,
        };
        Ok((current, report))
    }

    fn record(gol: &Gol) -> GenerationRecord {
        GenerationRecord {
            generation: gol.generation(),
            population: gol.living_count(),
        }
    }

    fn frame(gol: &Gol) -> Frame {
        Frame {
            generation: gol.generation(),
            grid: gol.grid().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::Concurrency;
    use tempfile::TempDir;

    fn blinker_settings(dir: &TempDir) -> Settings {
        let pattern = dir.path().join("blinker.txt");
        std::fs::write(&pattern, "00000\n00000\n01110\n00000\n00000\n").unwrap();
        let mut settings = Settings::default();
        settings.automaton.name = "Blinker".to_string();
        settings.automaton.concurrency = Concurrency::Serial;
        settings.simulation.generations = 4;
        settings.simulation.pattern_file = Some(pattern);
        settings.output.print_every = Some(2);
        settings
    }

    #[test]
    fn test_pattern_run() {
        let dir = TempDir::new().unwrap();
        let simulation = Simulation::new(blinker_settings(&dir)).unwrap();
        assert_eq!(simulation.initial().rows(), 5);

        let (last, report) = simulation.run().unwrap();
        assert_eq!(last.generation(), 4);
        assert!(last.grid_equals(simulation.initial()));
        assert_eq!(report.generations(), 4);
        assert_eq!(report.history.len(), 5);
        assert!(report.history.iter().all(|record| record.population == 3));
        assert_eq!(report.frames.iter().map(|f| f.generation).collect::<Vec<_>>(), vec![0, 2, 4]);
        assert_eq!(report.strategy, "serial");
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut settings = Settings::default();
        settings.automaton.rows = 16;
        settings.automaton.cols = 16;
        settings.simulation.generations = 5;

        let (a, report_a) = Simulation::new(settings.clone()).unwrap().run().unwrap();
        settings.automaton.concurrency = Concurrency::Serial;
        let (b, report_b) = Simulation::new(settings).unwrap().run().unwrap();
        assert!(a.grid_equals(&b));
        assert_eq!(report_a.history, report_b.history);
        assert!(report_a.frames.is_empty());
    }

    #[test]
    fn test_blank_run_and_json() {
        let mut settings = Settings::default();
        settings.simulation.seed = None;
        settings.automaton.rows = 4;
        settings.automaton.cols = 6;
        settings.simulation.generations = 2;

        let (_, report) = Simulation::new(settings).unwrap().run().unwrap();
        assert_eq!(report.final_population(), 0);

        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["end_generation"], 2);
        assert_eq!(value["rule"], "23/3");
        assert!(value.get("elapsed").is_none());
    }
}
