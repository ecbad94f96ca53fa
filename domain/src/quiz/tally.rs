//! Per-house answer counts accumulated over a session.

use crate::core::house::House;
use serde::{Deserialize, Serialize};

/// Count of answers given for each house, in [`House::ALL`] order.
///
/// Invariant: the sum of all counts equals the number of answers accepted so
/// far (exactly one increment per accepted answer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    counts: [u32; House::COUNT],
}

impl Tally {
    /// A zeroed tally, as seeded on session start.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, house: House) -> u32 {
        self.counts[house.index()]
    }

    pub fn increment(&mut self, house: House) {
        self.counts[house.index()] += 1;
    }

    /// Total answers recorded.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Iterate (house, count) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (House, u32)> + '_ {
        House::ALL.iter().map(|&h| (h, self.counts[h.index()]))
    }

    /// The highest single count (0 for an empty tally).
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(h, c)| format!("{}: {}", h, c))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
