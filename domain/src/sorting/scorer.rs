//! Tally → probability transform.
//!
//! A pure argmax over the tally would make the quiz fully deterministic and
//! guessable. The scorer instead runs a temperature-scaled softmax and adds
//! a bounded jitter, so the top-scoring house stays favored but never
//! certain.

use crate::core::house::House;
use crate::quiz::tally::Tally;
use crate::sorting::distribution::HouseDistribution;
use crate::sorting::rng::RandomSource;

/// Softmax-with-noise outcome scorer.
///
/// The constants are empirical product tuning, supplied by configuration:
/// temperature above 1 biases toward randomness, below 1 toward determinism.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    temperature: f64,
    noise_band: f64,
    floor: f64,
}

impl Scorer {
    pub fn new(temperature: f64, noise_band: f64, floor: f64) -> Self {
        debug_assert!(temperature > 0.0);
        debug_assert!(noise_band >= 0.0);
        debug_assert!(floor > 0.0);
        Self {
            temperature,
            noise_band,
            floor,
        }
    }

    /// The base softmax distribution, before any noise.
    ///
    /// The maximum raw tally is subtracted inside the exponent for numeric
    /// stability; ratios are unaffected. The house with the most answers is
    /// guaranteed the highest (not necessarily unique) base probability.
    pub fn base(&self, tally: &Tally) -> HouseDistribution {
        let max = tally.max_count() as f64;

        let mut weights = [0.0; House::COUNT];
        for (house, count) in tally.iter() {
            weights[house.index()] = ((count as f64 - max) / self.temperature).exp();
        }

        HouseDistribution::from_weights(weights).normalized()
    }

    /// The final distribution: base softmax, plus uniform noise in
    /// `±noise_band`, clamped to the positive floor, renormalized.
    pub fn distribution(&self, tally: &Tally, rng: &mut dyn RandomSource) -> HouseDistribution {
        let base = self.base(tally);

        let mut weights = [0.0; House::COUNT];
        for (house, p) in base.iter() {
            let noise = (rng.next_f64() * 2.0 - 1.0) * self.noise_band;
            weights[house.index()] = (p + noise).max(self.floor);
        }

        HouseDistribution::from_weights(weights).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::distribution::SUM_TOLERANCE;
    use crate::sorting::rng::SequenceSource;

    fn scorer() -> Scorer {
        Scorer::new(1.15, 0.03, 0.01)
    }

    fn tally(counts: [u32; 4]) -> Tally {
        let mut t = Tally::new();
        for (house, &n) in House::ALL.iter().zip(counts.iter()) {
            for _ in 0..n {
                t.increment(*house);
            }
        }
        t
    }

    #[test]
    fn test_base_sums_to_one_with_positive_entries() {
        for counts in [[0, 0, 0, 0], [3, 0, 0, 0], [5, 2, 2, 1], [0, 7, 1, 0]] {
            let dist = scorer().base(&tally(counts));
            assert!((dist.sum() - 1.0).abs() < SUM_TOLERANCE, "{:?}", counts);
            assert!(dist.min() > 0.0, "{:?}", counts);
        }
    }

    #[test]
    fn test_base_favors_top_tally() {
        let dist = scorer().base(&tally([1, 3, 0, 2]));
        let top = dist.get(House::Serpeverde);
        for house in House::ALL {
            assert!(top >= dist.get(house));
        }
    }

    #[test]
    fn test_empty_tally_is_uniform() {
        let dist = scorer().base(&Tally::new());
        for house in House::ALL {
            assert!((dist.get(house) - 0.25).abs() < SUM_TOLERANCE);
        }
    }

    #[test]
    fn test_perturbed_keeps_sum_and_floor_invariants() {
        let mut rng = SequenceSource::new(vec![0.0, 1.0 - f64::EPSILON, 0.5, 0.25]);
        let dist = scorer().distribution(&tally([3, 0, 0, 0]), &mut rng);

        assert!((dist.sum() - 1.0).abs() < SUM_TOLERANCE);
        assert!(dist.min() > 0.0);
    }

    #[test]
    fn test_floor_keeps_trailing_houses_reachable() {
        // One house has every answer; the rest still get probability mass.
        let mut rng = SequenceSource::constant(0.0); // noise at full -band
        let dist = scorer().distribution(&tally([10, 0, 0, 0]), &mut rng);

        for house in House::ALL {
            assert!(dist.get(house) > 0.0, "{} unreachable", house);
        }
    }

    #[test]
    fn test_zero_noise_matches_base() {
        let scorer = Scorer::new(1.15, 0.0, 1e-6);
        let t = tally([2, 1, 0, 0]);
        let base = scorer.base(&t);
        let mut rng = SequenceSource::constant(0.5);
        let dist = scorer.distribution(&t, &mut rng);

        for house in House::ALL {
            assert!((dist.get(house) - base.get(house)).abs() < 1e-6);
        }
    }
}
