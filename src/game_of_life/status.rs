//! Canonical cell statuses
//!
//! Storage is status-agnostic and holds any `u8`; the two-state rules only
//! know how to evolve these two values.

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;
