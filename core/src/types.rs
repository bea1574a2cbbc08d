//! Shared primitive types used across the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a comparison a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Baseline,
    Reform,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Baseline => f.write_str("baseline"),
            Side::Reform => f.write_str("reform"),
        }
    }
}

/// A population decile bucket in the distribution table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Decile {
    /// Deciles 1 through 10.
    Nth(u8),
    /// The aggregate row.
    All,
}

impl Decile {
    /// Deciles in display order: 1..=10, then ALL.
    pub fn display_order() -> Vec<Decile> {
        (1..=10).map(Decile::Nth).chain([Decile::All]).collect()
    }

    pub fn parse(raw: &str) -> Option<Decile> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("all") {
            return Some(Decile::All);
        }
        // Some exports write deciles as floats ("3.0").
        let n: f64 = raw.parse().ok()?;
        if n.fract() == 0.0 && (1.0..=10.0).contains(&n) {
            Some(Decile::Nth(n as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Decile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decile::Nth(n) => write!(f, "{n}"),
            Decile::All => f.write_str("ALL"),
        }
    }
}
