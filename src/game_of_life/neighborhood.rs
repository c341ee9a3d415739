//! Neighborhood strategies

use super::grid::Grid;
use crate::error::GolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const VON_NEUMANN_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Which surrounding cells count as neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Neighborhood {
    /// The 8 orthogonally and diagonally adjacent cells
    #[default]
    Moore,
    /// The 4 orthogonally adjacent cells
    VonNeumann,
}

impl Neighborhood {
    /// Relative coordinates of the neighbors
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Neighborhood::Moore => &MOORE_OFFSETS,
            Neighborhood::VonNeumann => &VON_NEUMANN_OFFSETS,
        }
    }

    /// Config-file spelling
    pub fn as_str(self) -> &'static str {
        match self {
            Neighborhood::Moore => "moore",
            Neighborhood::VonNeumann => "von_neumann",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Neighborhood::Moore => "Moore",
            Neighborhood::VonNeumann => "Von Neumann",
        }
    }

    /// Values of the neighbors of `(i, j)`; `None` marks a void position
    /// past a bounded edge.
    pub fn neighbors(self, grid: &Grid, i: isize, j: isize) -> Vec<Option<u8>> {
        self.offsets()
            .iter()
            .map(|&(di, dj)| grid.get(i + di, j + dj))
            .collect()
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Neighborhood {
    type Err = GolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "moore" => Ok(Neighborhood::Moore),
            "vonneumann" => Ok(Neighborhood::VonNeumann),
            _ => Err(GolError::NeighborhoodKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for Neighborhood {
    type Error = GolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Neighborhood> for String {
    fn from(neighborhood: Neighborhood) -> Self {
        neighborhood.as_str().to_string()
    }
}

/// Count the neighbors of `(i, j)` holding `status`. Void positions never
/// match, so they drop out of the count.
#[inline]
pub fn neighbors_count(grid: &Grid, i: isize, j: isize, status: u8, offsets: &[(isize, isize)]) -> usize {
    offsets
        .iter()
        .filter(|&&(di, dj)| grid.get(i + di, j + dj) == Some(status))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::grid::Topology;
    use crate::game_of_life::status::{ALIVE, DEAD};
    use crate::game_of_life::StorageKind;

    fn full_grid(topology: Topology) -> Grid {
        let mut grid = Grid::new(3, 3, StorageKind::Dense, topology).unwrap();
        grid.set_all(ALIVE);
        grid
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("moore".parse::<Neighborhood>().unwrap(), Neighborhood::Moore);
        assert_eq!("Von Neumann".parse::<Neighborhood>().unwrap(), Neighborhood::VonNeumann);
        assert_eq!("von_neumann".parse::<Neighborhood>().unwrap(), Neighborhood::VonNeumann);
        assert!("hexagonal".parse::<Neighborhood>().is_err());
        assert_eq!(Neighborhood::VonNeumann.to_string(), "Von Neumann");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Neighborhood::VonNeumann).unwrap();
        assert_eq!(json, "\"von_neumann\"");
        assert_eq!(serde_json::from_str::<Neighborhood>(&json).unwrap(), Neighborhood::VonNeumann);
        assert_eq!(
            serde_json::from_str::<Neighborhood>("\"Von Neumann\"").unwrap(),
            Neighborhood::VonNeumann
        );

        let err = serde_json::from_str::<Neighborhood>("\"hexagonal\"").unwrap_err();
        assert!(err
            .to_string()
            .contains(&GolError::NeighborhoodKind("hexagonal".to_string()).to_string()));
    }

    #[test]
    fn test_bounded_corner_neighbors() {
        let grid = full_grid(Topology::bounded());
        let neighbors = Neighborhood::Moore.neighbors(&grid, 0, 0);
        assert_eq!(neighbors.len(), 8);
        assert_eq!(neighbors.iter().filter(|n| n.is_none()).count(), 5);

        let offsets = Neighborhood::Moore.offsets();
        assert_eq!(neighbors_count(&grid, 0, 0, ALIVE, offsets), 3);
        assert_eq!(neighbors_count(&grid, 0, 0, DEAD, offsets), 0);
        assert_eq!(neighbors_count(&grid, 1, 1, ALIVE, offsets), 8);
    }

    #[test]
    fn test_toroidal_corner_neighbors() {
        let grid = full_grid(Topology::toroidal());
        let offsets = Neighborhood::Moore.offsets();
        assert_eq!(neighbors_count(&grid, 0, 0, ALIVE, offsets), 8);
        assert_eq!(neighbors_count(&grid, 2, 2, ALIVE, offsets), 8);
    }

    #[test]
    fn test_von_neumann() {
        let grid = full_grid(Topology::bounded());
        let offsets = Neighborhood::VonNeumann.offsets();
        assert_eq!(neighbors_count(&grid, 1, 1, ALIVE, offsets), 4);
        assert_eq!(neighbors_count(&grid, 0, 0, ALIVE, offsets), 2);
        assert_eq!(Neighborhood::VonNeumann.neighbors(&grid, 0, 1).len(), 4);
    }

    #[test]
    fn test_neighbor_counting_pattern() {
        // 2x2 pattern: alive on the diagonal
        let mut grid = Grid::new(2, 2, StorageKind::Sparse, Topology::bounded()).unwrap();
        grid.set(0, 0, ALIVE).unwrap();
        grid.set(1, 1, ALIVE).unwrap();
        let offsets = Neighborhood::Moore.offsets();
        assert_eq!(neighbors_count(&grid, 0, 0, ALIVE, offsets), 1);

        let mut wrapped = Grid::new(2, 2, StorageKind::Sparse, Topology::toroidal()).unwrap();
        wrapped.set(0, 0, ALIVE).unwrap();
        wrapped.set(1, 1, ALIVE).unwrap();
        // Four of the wrapped positions land on (1,1)
        assert_eq!(neighbors_count(&wrapped, 0, 0, ALIVE, offsets), 4);
    }
}
