//! The sorting math: scorer, selector, randomness seam.

pub mod distribution;
pub mod rng;
pub mod scorer;
pub mod selector;

pub use distribution::HouseDistribution;
pub use rng::{RandomSource, SequenceSource};
pub use scorer::Scorer;
pub use selector::{HAT_LINES, Narrative, hat_line, weighted_pick};
