//! Survival/birth rules
//!
//! Accepted notations:
//! * `S/B` digits, e.g. `23/3`: survive on 2 or 3 live neighbors, birth on 3
//! * `B3/S23` (or `S23/B3`), letter-prefixed and case-insensitive

use super::status::{ALIVE, DEAD};
use crate::error::{GolError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest neighbor count any 2-D neighborhood can produce
const MAX_NEIGHBORS: u8 = 8;

/// Conway's Game of Life
pub const CONWAY: &str = "23/3";

/// Parsed survival and birth neighbor-count sets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    notation: String,
    survive: u16,
    birth: u16,
}

impl Rule {
    pub fn parse(notation: &str) -> Result<Self> {
        let trimmed = notation.trim();
        let error = |reason: &str| GolError::RuleParse {
            rule: notation.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = trimmed.split('/');
        let (left, right) = match (parts.next(), parts.next(), parts.next()) {
            (Some(left), Some(right), None) => (left, right),
            (_, None, _) => return Err(error("missing '/' separator")),
            _ => return Err(error("more than one '/' separator")),
        };

        let (survive, birth) = match (Self::prefix(left), Self::prefix(right)) {
            (None, None) => (left, right),
            (Some('S'), Some('B')) => (&left[1..], &right[1..]),
            (Some('B'), Some('S')) => (&right[1..], &left[1..]),
            _ => return Err(error("expected S/B digits or B.../S... letter prefixes")),
        };

        Ok(Self {
            notation: trimmed.to_string(),
            survive: Self::parse_counts(survive).map_err(|reason| error(&format!("survival {}", reason)))?,
            birth: Self::parse_counts(birth).map_err(|reason| error(&format!("birth {}", reason)))?,
        })
    }

    fn prefix(part: &str) -> Option<char> {
        part.chars()
            .next()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
    }

    fn parse_counts(digits: &str) -> std::result::Result<u16, String> {
        if digits.is_empty() {
            return Err("side is empty".to_string());
        }
        let mut mask = 0u16;
        for c in digits.chars() {
            let count = c
                .to_digit(10)
                .ok_or_else(|| format!("side has non-digit character '{}'", c))? as u8;
            if count > MAX_NEIGHBORS {
                return Err(format!("count {} exceeds {}", count, MAX_NEIGHBORS));
            }
            mask |= 1 << count;
        }
        Ok(mask)
    }

    /// Conway's 23/3
    pub fn conway() -> Self {
        Self {
            notation: CONWAY.to_string(),
            survive: (1 << 2) | (1 << 3),
            birth: 1 << 3,
        }
    }

    /// The notation as given (trimmed)
    pub fn notation(&self) -> &str {
        &self.notation
    }

    #[inline]
    pub fn survives(&self, alive_neighbors: usize) -> bool {
        alive_neighbors <= MAX_NEIGHBORS as usize && self.survive & (1 << alive_neighbors) != 0
    }

    #[inline]
    pub fn is_born(&self, alive_neighbors: usize) -> bool {
        alive_neighbors <= MAX_NEIGHBORS as usize && self.birth & (1 << alive_neighbors) != 0
    }

    pub fn survival_counts(&self) -> Vec<u8> {
        Self::counts(self.survive)
    }

    pub fn birth_counts(&self) -> Vec<u8> {
        Self::counts(self.birth)
    }

    fn counts(mask: u16) -> Vec<u8> {
        (0..=MAX_NEIGHBORS).filter(|&n| mask & (1 << n) != 0).collect()
    }

    /// Status of a cell in the next generation, `None` if `current` is
    /// neither alive nor dead.
    #[inline]
    pub fn next_status(&self, current: u8, alive_neighbors: usize) -> Option<u8> {
        let alive = match current {
            ALIVE => self.survives(alive_neighbors),
            DEAD => self.is_born(alive_neighbors),
            _ => return None,
        };
        Some(if alive { ALIVE } else { DEAD })
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::conway()
    }
}

impl FromStr for Rule {
    type Err = GolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Rule {
    type Error = GolError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.notation
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation)
    }
}
