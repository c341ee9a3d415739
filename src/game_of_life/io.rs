//! Plain-text pattern files
//!
//! Each line is a row and each character a cell value digit: '0' dead,
//! '1' alive. Other digits are stored as-is and rejected when stepped.

use super::grid::{Grid, Topology};
use super::status::DEAD;
use super::storage::StorageKind;
use anyhow::{Context, Result};
use log::warn;
use std::path::Path;

/// Load a grid from a text file
pub fn load_grid_from_file<P: AsRef<Path>>(
    path: P,
    kind: StorageKind,
    topology: Topology,
) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content, kind, topology)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

/// Parse a grid from a string representation
pub fn parse_grid_from_string(content: &str, kind: StorageKind, topology: Topology) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Grid file is empty or contains no valid rows");
    }

    let rows = lines.len();
    let cols = lines[0].chars().count();

    let mut grid = Grid::new(rows, cols, kind, topology)?;

    for (row_idx, line) in lines.iter().enumerate() {
        let len = line.chars().count();
        if len != cols {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                len,
                cols
            );
        }

        for (col_idx, ch) in line.chars().enumerate() {
            let value = ch.to_digit(10).with_context(|| {
                format!(
                    "Invalid character '{}' at position ({}, {}). Only digits are allowed",
                    ch, row_idx, col_idx
                )
            })? as u8;
            if value != DEAD {
                grid.set(row_idx as isize, col_idx as isize, value)?;
            }
        }
    }

    Ok(grid)
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = grid_to_string(grid);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to string representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.rows() * (grid.cols() + 1));

    for i in 0..grid.rows() {
        for j in 0..grid.cols() {
            let value = grid.get(i as isize, j as isize).unwrap_or(DEAD);
            result.push(char::from_digit(u32::from(value), 10).unwrap_or('?'));
        }
        result.push('\n');
    }

    result
}

/// Load every `.txt` pattern in a directory, sorted by file stem.
/// Unreadable files are skipped with a warning.
pub fn load_grids_from_directory<P: AsRef<Path>>(
    dir_path: P,
    kind: StorageKind,
    topology: Topology,
) -> Result<Vec<(String, Grid)>> {
    let dir = std::fs::read_dir(&dir_path)
        .with_context(|| format!("Failed to read directory: {}", dir_path.as_ref().display()))?;

    let mut grids = Vec::new();

    for entry in dir {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match load_grid_from_file(&path, kind, topology) {
                Ok(grid) => grids.push((name, grid)),
                Err(e) => warn!("Failed to load {}: {:#}", path.display(), e),
            }
        }
    }

    grids.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(grids)
}

/// Patterns written by `create_example_patterns`, as (file stem, content)
pub const EXAMPLE_PATTERNS: [(&str, &str); 5] = [
    ("glider", "00100\n10100\n01100\n00000\n00000\n"),
    ("blinker", "00000\n00000\n01110\n00000\n00000\n"),
    ("block", "0000\n0110\n0110\n0000\n"),
    ("beacon", "110000\n110000\n001100\n001100\n000000\n000000\n"),
    ("toad", "000000\n000000\n001110\n011100\n000000\n000000\n"),
];

/// Create example pattern files
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for (name, content) in EXAMPLE_PATTERNS {
        std::fs::write(dir.join(format!("{}.txt", name)), content)
            .with_context(|| format!("Failed to write {}.txt", name))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::grid::Equality;
    use crate::game_of_life::status::ALIVE;
    use tempfile::tempdir;

    #[test]
    fn test_parse_grid_from_string() {
        let content = "010\n101\n010\n";
        let grid = parse_grid_from_string(content, StorageKind::Sparse, Topology::bounded()).unwrap();

        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.rows(), 3);

        assert_eq!(grid.living_cells(), vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
        assert_eq!(grid.storage_kind(), StorageKind::Sparse);
    }

    #[test]
    fn test_grid_to_string() {
        let mut grid = Grid::new(2, 3, StorageKind::Dense, Topology::bounded()).unwrap();
        grid.set(0, 1, ALIVE).unwrap();
        grid.set(1, 2, 2).unwrap();

        assert_eq!(grid_to_string(&grid), "010\n002\n");
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("patterns").join("test_grid.txt");

        let written = parse_grid_from_string("101\n010\n", StorageKind::Dense, Topology::bounded()).unwrap();
        save_grid_to_file(&written, &file_path).unwrap();

        let loaded = load_grid_from_file(&file_path, StorageKind::Sparse, Topology::toroidal()).unwrap();
        assert_eq!((loaded.rows(), loaded.cols()), (2, 3));
        assert!(loaded.storage().value_equals(written.storage()));
        assert!(!loaded.equals(&written, Equality::Values));
    }

    #[test]
    fn test_invalid_input() {
        let kind = StorageKind::Dense;
        let topology = Topology::bounded();
        assert!(parse_grid_from_string("010\n1X1\n010\n", kind, topology).is_err());
        assert!(parse_grid_from_string("010\n11\n010\n", kind, topology).is_err());
        assert!(parse_grid_from_string("", kind, topology).is_err());
        assert!(parse_grid_from_string("\n  \n", kind, topology).is_err());
    }

    #[test]
    fn test_create_example_patterns() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();
        std::fs::write(temp_dir.path().join("broken.txt"), "01\n0").unwrap();
        std::fs::write(temp_dir.path().join("notes.md"), "not a pattern").unwrap();

        let grids = load_grids_from_directory(temp_dir.path(), StorageKind::Sparse, Topology::bounded()).unwrap();
        let names: Vec<&str> = grids.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["beacon", "blinker", "block", "glider", "toad"]);

        let glider = &grids[3].1;
        assert_eq!((glider.rows(), glider.cols()), (5, 5));
        assert_eq!(glider.living_count(), 5);
    }
}
