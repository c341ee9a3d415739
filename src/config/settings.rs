//! Configuration settings for the automaton engine

use crate::game_of_life::grid::Topology;
use crate::game_of_life::neighborhood::Neighborhood;
use crate::game_of_life::rules::{Rule, CONWAY};
use crate::game_of_life::stepper::Concurrency;
use crate::game_of_life::storage::StorageKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub automaton: AutomatonConfig,
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

/// Everything needed to construct a `Gol`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    pub name: String,
    pub description: String,
    pub rows: usize,
    pub cols: usize,
    pub generation: u64,
    pub neighborhood: Neighborhood,
    pub rule: String,
    pub storage: StorageKind,
    pub wrap_rows: bool,
    pub wrap_cols: bool,
    pub concurrency: Concurrency,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            name: "Game of Life".to_string(),
            description: String::new(),
            rows: 64,
            cols: 64,
            generation: 0,
            neighborhood: Neighborhood::Moore,
            rule: CONWAY.to_string(),
            storage: StorageKind::Sparse,
            wrap_rows: false,
            wrap_cols: false,
            concurrency: Concurrency::default(),
        }
    }
}

impl AutomatonConfig {
    /// Defaults with the given dimensions
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn topology(&self) -> Topology {
        Topology {
            wrap_rows: self.wrap_rows,
            wrap_cols: self.wrap_cols,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub generations: usize,
    /// Seed for a random initial grid; ignored when `pattern_file` is set
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub pattern_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Print the grid every N generations
    #[serde(default)]
    pub print_every: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            automaton: AutomatonConfig {
                name: "Random".to_string(),
                ..AutomatonConfig::default()
            },
            simulation: SimulationConfig {
                generations: 10,
                seed: Some(42),
                pattern_file: None,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                print_every: None,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        match &self.simulation.pattern_file {
            Some(pattern) => {
                if !pattern.exists() {
                    anyhow::bail!("Pattern file does not exist: {}", pattern.display());
                }
            }
            None => {
                if self.automaton.rows == 0 || self.automaton.cols == 0 {
                    anyhow::bail!(
                        "Grid dimensions must be positive, got {}x{}",
                        self.automaton.rows,
                        self.automaton.cols
                    );
                }
            }
        }

        Rule::parse(&self.automaton.rule)
            .with_context(|| format!("Invalid rule in config: {}", self.automaton.rule))?;

        if self.output.print_every == Some(0) {
            anyhow::bail!("print_every must be positive when set");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(seed) = cli_overrides.seed {
            self.simulation.seed = Some(seed);
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.simulation.pattern_file = Some(pattern_file.clone());
        }
        if let Some(ref rule) = cli_overrides.rule {
            self.automaton.rule = rule.clone();
        }
        if let Some(concurrency) = cli_overrides.concurrency {
            self.automaton.concurrency = concurrency;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub generations: Option<usize>,
    pub seed: Option<u64>,
    pub pattern_file: Option<PathBuf>,
    pub rule: Option<String>,
    pub concurrency: Option<Concurrency>,
    pub format: Option<OutputFormat>,
}
