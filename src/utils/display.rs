//! Display and output formatting utilities

use crate::game_of_life::{Grid, ALIVE, DEAD};
use crate::simulation::{RunReport, StrategyComparison};

/// Format grids and reports for the console
pub struct GridFormatter;

impl GridFormatter {
    fn cell_char(value: Option<u8>) -> char {
        match value {
            Some(ALIVE) => '█',
            Some(DEAD) | None => '·',
            Some(other) => char::from_digit(u32::from(other), 10).unwrap_or('?'),
        }
    }

    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::new();
        for i in 0..grid.rows() as isize {
            for j in 0..grid.cols() as isize {
                output.push(Self::cell_char(grid.get(i, j)));
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for j in 0..grid.cols() {
            output.push_str(&format!("{:2}", j % 10));
        }
        output.push('\n');

        for i in 0..grid.rows() {
            output.push_str(&format!("{:2} ", i));
            for j in 0..grid.cols() {
                let c = Self::cell_char(grid.get(i as isize, j as isize));
                output.push(c);
                output.push(c);
            }
            output.push('\n');
        }

        output
    }

    /// Format a run report for console output
    pub fn format_report(report: &RunReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== {} ===\n", report.name));
        output.push_str(&format!(
            "Grid: {}x{} | Rule: {} | Neighborhood: {}\n",
            report.rows, report.cols, report.rule, report.neighborhood
        ));
        output.push_str(&format!("Strategy: {}\n", report.strategy));
        output.push_str(&format!(
            "Generations: {} → {}\n",
            report.start_generation, report.end_generation
        ));
        output.push_str(&format!(
            "Living Cells: {} → {}\n",
            report.initial_population(),
            report.final_population()
        ));
        output.push_str(&format!("Run Time: {:.3}s\n", report.elapsed.as_secs_f64()));

        for frame in &report.frames {
            output.push_str(&format!("\nGeneration {}:\n", frame.generation));
            output.push_str(&frame.grid);
        }

        output
    }

    /// Format a strategy comparison as a table
    pub fn format_comparison(comparison: &StrategyComparison) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Strategy comparison: {}x{}, {} generations\n",
            comparison.rows, comparison.cols, comparison.generations
        ));
        output.push_str("Strategy     | Time(ms) | Living\n");
        output.push_str("-------------|----------|-------\n");
        for timing in &comparison.timings {
            output.push_str(&format!(
                "{:12} | {:8.2} | {:6}\n",
                timing.strategy, timing.elapsed_ms, timing.final_population
            ));
        }

        match &comparison.mismatch {
            None => output.push_str("All strategies agree\n"),
            Some(mismatch) => output.push_str(&format!("Mismatch: {}\n", mismatch)),
        }

        output
    }
}

const RED: u8 = 31;
const GREEN: u8 = 32;
const YELLOW: u8 = 33;
const BLUE: u8 = 34;

/// Status lines for the console, ANSI-colored unless `NO_COLOR` is set or
/// `TERM` is `dumb`
pub struct ColorOutput;

impl ColorOutput {
    pub fn success(text: &str) -> String {
        Self::paint(text, GREEN)
    }

    pub fn error(text: &str) -> String {
        Self::paint(text, RED)
    }

    pub fn warning(text: &str) -> String {
        Self::paint(text, YELLOW)
    }

    pub fn info(text: &str) -> String {
        Self::paint(text, BLUE)
    }

    fn paint(text: &str, code: u8) -> String {
        let enabled = std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb");
        if enabled {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::{StorageKind, Topology};

    #[test]
    fn test_grid_formatting() {
        let mut grid = Grid::new(3, 3, StorageKind::Dense, Topology::bounded()).unwrap();
        for (i, j) in [(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)] {
            grid.set(i, j, ALIVE).unwrap();
        }

        let compact = GridFormatter::format_grid_compact(&grid);
        assert_eq!(compact, "█·█\n·█·\n█·█\n");

        let with_coords = GridFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ··██··"));
    }

    #[test]
    fn test_color_output() {
        assert!(ColorOutput::success("OK").contains("OK"));
        assert!(ColorOutput::error("failed").contains("failed"));
        assert!(ColorOutput::warning("careful").contains("careful"));
        assert!(ColorOutput::info("note").contains("note"));
    }
}
