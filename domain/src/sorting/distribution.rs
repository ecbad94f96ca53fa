//! Probability distribution over the houses.

use crate::core::house::House;

/// Tolerance used when asserting that probabilities sum to 1.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// House → probability, stored in [`House::ALL`] order.
///
/// A normalized distribution sums to 1 within [`SUM_TOLERANCE`] and keeps
/// every entry strictly positive, so no house is mathematically unreachable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseDistribution {
    probs: [f64; House::COUNT],
}

impl HouseDistribution {
    /// Build from raw weights in canonical order (no normalization applied).
    pub fn from_weights(probs: [f64; House::COUNT]) -> Self {
        Self { probs }
    }

    pub fn get(&self, house: House) -> f64 {
        self.probs[house.index()]
    }

    /// Iterate (house, probability) in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (House, f64)> + '_ {
        House::ALL.iter().map(|&h| (h, self.probs[h.index()]))
    }

    pub fn sum(&self) -> f64 {
        self.probs.iter().sum()
    }

    /// Smallest entry.
    pub fn min(&self) -> f64 {
        self.probs.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Divide every entry by the current sum so the result sums to 1.
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        debug_assert!(sum > 0.0);
        let mut probs = self.probs;
        for p in &mut probs {
            *p /= sum;
        }
        Self { probs }
    }

    /// Houses with their probabilities, highest first.
    ///
    /// Ties keep canonical order (stable sort).
    pub fn ranked(&self) -> Vec<(House, f64)> {
        let mut entries: Vec<(House, f64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries
    }
}
