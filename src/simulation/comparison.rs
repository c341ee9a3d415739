//! Side-by-side runs of the stepping strategies

use crate::game_of_life::{Concurrency, Gol};
use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Timing of one strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyTiming {
    pub strategy: String,
    pub concurrency: Concurrency,
    pub elapsed_ms: f64,
    pub final_population: usize,
}

/// Outcome of `compare_strategies`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub generations: usize,
    pub rows: usize,
    pub cols: usize,
    pub timings: Vec<StrategyTiming>,
    /// First difference against the serial result, if any
    pub mismatch: Option<String>,
}

impl StrategyComparison {
    pub fn all_agree(&self) -> bool {
        self.mismatch.is_none()
    }

    pub fn fastest(&self) -> Option<&StrategyTiming> {
        self.timings
            .iter()
            .min_by(|a, b| a.elapsed_ms.total_cmp(&b.elapsed_ms))
    }
}

/// The strategies compared: serial, unbounded and a `pool_size` worker pool
pub fn comparison_strategies(pool_size: usize) -> Vec<Concurrency> {
    vec![
        Concurrency::Serial,
        Concurrency::Parallel { pool_size: 0 },
        Concurrency::Parallel { pool_size: pool_size.max(1) },
    ]
}

/// Fast-forward `gol` by `generations` under every strategy and check that
/// the results are value-equal to the serial one.
pub fn compare_strategies(gol: &Gol, generations: usize, pool_size: usize) -> Result<StrategyComparison> {
    let mut timings = Vec::new();
    let mut reference: Option<Gol> = None;
    let mut mismatch = None;

    for concurrency in comparison_strategies(pool_size) {
        let mut candidate = gol.clone();
        candidate
            .set_concurrency(concurrency)
            .with_context(|| format!("Failed to configure {} strategy", concurrency.strategy_name()))?;

        let start_time = Instant::now();
        let result = candidate
            .fast_forward(generations)
            .with_context(|| format!("{} strategy failed", concurrency.strategy_name()))?;
        let elapsed = start_time.elapsed();

        info!(
            "{} strategy: {} generations in {:.3}ms",
            concurrency.strategy_name(),
            generations,
            elapsed.as_secs_f64() * 1000.0
        );

        timings.push(StrategyTiming {
            strategy: concurrency.strategy_name().to_string(),
            concurrency,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            final_population: result.living_count(),
        });

        match &reference {
            None => reference = Some(result),
            Some(expected) => {
                if mismatch.is_none() {
                    if let Err(e) = expected.grid_equals_error(&result) {
                        warn!("{} strategy disagrees with serial: {}", concurrency.strategy_name(), e);
                        mismatch = Some(format!("{}: {}", concurrency.strategy_name(), e));
                    }
                }
            }
        }
    }

    Ok(StrategyComparison {
        generations,
        rows: gol.rows(),
        cols: gol.cols(),
        timings,
        mismatch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AutomatonConfig;
    use crate::game_of_life::StorageKind;

    #[test]
    fn test_strategies_agree() {
        let config = AutomatonConfig {
            storage: StorageKind::Dense,
            wrap_rows: true,
            wrap_cols: true,
            ..AutomatonConfig::new(24, 24)
        };
        let gol = Gol::random(&config, 2024).unwrap();
        let comparison = compare_strategies(&gol, 6, 4).unwrap();

        assert!(comparison.all_agree());
        assert_eq!(comparison.timings.len(), 3);
        assert_eq!(
            comparison.timings.iter().map(|t| t.strategy.as_str()).collect::<Vec<_>>(),
            vec!["serial", "unbounded", "worker-pool"]
        );
        let populations: Vec<usize> = comparison.timings.iter().map(|t| t.final_population).collect();
        assert!(populations.windows(2).all(|w| w[0] == w[1]));
        assert!(comparison.fastest().is_some());
    }

    #[test]
    fn test_zero_pool_size_is_clamped() {
        assert_eq!(comparison_strategies(0)[2], Concurrency::Parallel { pool_size: 1 });
    }
}
