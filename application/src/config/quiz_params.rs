//! Quiz tuning parameters.
//!
//! [`QuizParams`] groups the static knobs consumed by the session store and
//! the orchestrator. All of them are supplied at process start and never
//! mutated at runtime.

use cappello_domain::Scorer;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Static quiz configuration.
///
/// The temperature and closeness threshold are empirical product constants
/// with no documented derivation; they are kept configurable rather than
/// recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizParams {
    /// Time a session may stay live before automatic expiry.
    pub session_ttl: Duration,
    /// Questions drawn per session (capped by the bank size).
    pub questions_per_session: usize,
    /// Softmax temperature; above 1 biases toward randomness.
    pub temperature: f64,
    /// Half-width of the uniform noise added to each probability.
    pub noise_band: f64,
    /// Gap between the top two probabilities below which the narrative
    /// reads as torn between two houses.
    pub closeness_threshold: f64,
    /// Positive floor applied before renormalization so no house is
    /// unreachable.
    pub probability_floor: f64,
}

impl Default for QuizParams {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(5 * 60),
            questions_per_session: 3,
            temperature: 1.15,
            noise_band: 0.03,
            closeness_threshold: 0.12,
            probability_floor: 0.01,
        }
    }
}

impl QuizParams {
    // ==================== Builder Methods ====================

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn with_questions_per_session(mut self, count: usize) -> Self {
        self.questions_per_session = count;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_noise_band(mut self, band: f64) -> Self {
        self.noise_band = band;
        self
    }

    pub fn with_closeness_threshold(mut self, threshold: f64) -> Self {
        self.closeness_threshold = threshold;
        self
    }

    /// Build the scorer configured by these parameters.
    pub fn scorer(&self) -> Scorer {
        Scorer::new(self.temperature, self.noise_band, self.probability_floor)
    }
}
