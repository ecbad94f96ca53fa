//! Final draw and verdict narrative.

use crate::core::house::House;
use crate::sorting::distribution::HouseDistribution;
use crate::sorting::rng::RandomSource;

/// Flavor lines the hat mutters before announcing the verdict.
pub const HAT_LINES: [&str; 4] = [
    "Hmm… interessante… molto interessante…",
    "Vedo coraggio, ambizione, intelletto… e lealtà…",
    "La scelta non è banale… ma il Cappello decide!",
    "Ah! Qui c'è del potenziale…",
];

/// Draw one flavor line.
pub fn hat_line(rng: &mut dyn RandomSource) -> &'static str {
    let idx = (rng.next_f64() * HAT_LINES.len() as f64) as usize;
    HAT_LINES[idx.min(HAT_LINES.len() - 1)]
}

/// Draw one house from the distribution by cumulative-weight sampling.
///
/// Walks the houses in canonical order subtracting each probability from a
/// uniform draw; the house where the remainder first crosses zero wins. The
/// last house absorbs any floating-point residue so the walk always lands.
pub fn weighted_pick(dist: &HouseDistribution, rng: &mut dyn RandomSource) -> House {
    let mut remainder = rng.next_f64();
    for (house, p) in dist.iter() {
        remainder -= p;
        if remainder <= 0.0 {
            return house;
        }
    }
    *House::ALL.last().expect("House::ALL is non-empty")
}

/// How the verdict is narrated, based on the margin at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrative {
    /// One house clearly ahead.
    Clear { house: House },
    /// The top two are within the closeness threshold.
    Torn { first: House, second: House },
}

impl Narrative {
    /// Classify the distribution: a gap between the top two probabilities
    /// below `closeness_threshold` reads as a torn decision.
    ///
    /// Pure presentation logic, no side effects; the actual winner still
    /// comes from [`weighted_pick`].
    pub fn from_distribution(dist: &HouseDistribution, closeness_threshold: f64) -> Self {
        let ranked = dist.ranked();
        let (first, p_first) = ranked[0];
        let (second, p_second) = ranked[1];

        if p_first - p_second < closeness_threshold {
            Narrative::Torn { first, second }
        } else {
            Narrative::Clear { house: first }
        }
    }

    /// Houses named by the narrative.
    pub fn mentions(&self) -> Vec<House> {
        match self {
            Narrative::Clear { house } => vec![*house],
            Narrative::Torn { first, second } => vec![*first, *second],
        }
    }
}

impl std::fmt::Display for Narrative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Narrative::Clear { house } => {
                write!(f, "La tua strada è chiara: vedo solo {}…", house)
            }
            Narrative::Torn { first, second } => write!(
                f,
                "Difficile, molto difficile… sei conteso tra {} e {}…",
                first, second
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::rng::SequenceSource;

    #[test]
    fn test_degenerate_distribution_always_wins() {
        let dist = HouseDistribution::from_weights([1.0, 0.0, 0.0, 0.0]);
        for r in [0.0, 0.3, 0.999_999] {
            let mut rng = SequenceSource::constant(r);
            assert_eq!(weighted_pick(&dist, &mut rng), House::Grifondoro);
        }
    }

    #[test]
    fn test_half_split_picks_by_threshold() {
        let dist = HouseDistribution::from_weights([0.5, 0.5, 0.0, 0.0]);

        let mut rng = SequenceSource::constant(0.25);
        assert_eq!(weighted_pick(&dist, &mut rng), House::Grifondoro);

        let mut rng = SequenceSource::constant(0.75);
        assert_eq!(weighted_pick(&dist, &mut rng), House::Serpeverde);
    }

    #[test]
    fn test_zero_draw_takes_first_entry_in_canonical_order() {
        let dist = HouseDistribution::from_weights([0.25, 0.25, 0.25, 0.25]);
        let mut rng = SequenceSource::constant(0.0);
        assert_eq!(weighted_pick(&dist, &mut rng), House::Grifondoro);
    }

    #[test]
    fn test_residual_draw_falls_back_to_last_house() {
        // Weights sum slightly under the draw; the walk must still land.
        let dist = HouseDistribution::from_weights([0.25, 0.25, 0.25, 0.249_999]);
        let mut rng = SequenceSource::constant(0.999_999_9);
        assert_eq!(weighted_pick(&dist, &mut rng), House::Tassorosso);
    }

    #[test]
    fn test_close_race_narrates_both_houses() {
        let dist = HouseDistribution::from_weights([0.5, 0.45, 0.03, 0.02]);
        let narrative = Narrative::from_distribution(&dist, 0.12);

        assert_eq!(
            narrative,
            Narrative::Torn {
                first: House::Grifondoro,
                second: House::Serpeverde,
            }
        );
        let text = narrative.to_string();
        assert!(text.contains("Grifondoro"));
        assert!(text.contains("Serpeverde"));
    }

    #[test]
    fn test_clear_race_names_only_the_winner() {
        let dist = HouseDistribution::from_weights([0.7, 0.1, 0.1, 0.1]);
        let narrative = Narrative::from_distribution(&dist, 0.12);

        assert_eq!(
            narrative,
            Narrative::Clear {
                house: House::Grifondoro
            }
        );
        let text = narrative.to_string();
        assert!(text.contains("Grifondoro"));
        assert!(!text.contains("Serpeverde"));
        assert!(!text.contains("Corvonero"));
        assert!(!text.contains("Tassorosso"));
    }

    #[test]
    fn test_hat_line_draw_stays_in_bounds() {
        let mut rng = SequenceSource::new(vec![0.0, 0.5, 0.999_999]);
        for _ in 0..3 {
            let line = hat_line(&mut rng);
            assert!(HAT_LINES.contains(&line));
        }
    }
}
