//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types.

use cappello_application::QuizParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Severity of a configuration problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One detected configuration problem.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// `[bot]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBotConfig {
    /// Label of the channel the quiz runs in (used by the console adapter
    /// as a message prefix; the real platform adapter maps it to an id).
    pub quiz_channel: String,
}

impl Default for FileBotConfig {
    fn default() -> Self {
        Self {
            quiz_channel: "smistamento".to_string(),
        }
    }
}

/// `[quiz]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuizConfig {
    /// Session time-to-live in seconds.
    pub session_ttl_secs: u64,
    /// Questions drawn per session.
    pub questions_per_session: usize,
    /// Softmax temperature.
    pub temperature: f64,
    /// Half-width of the probability jitter.
    pub noise_band: f64,
    /// Gap under which the verdict reads as torn between two houses.
    pub closeness_threshold: f64,
    /// Positive floor keeping every house reachable.
    pub probability_floor: f64,
}

impl Default for FileQuizConfig {
    fn default() -> Self {
        let params = QuizParams::default();
        Self {
            session_ttl_secs: params.session_ttl.as_secs(),
            questions_per_session: params.questions_per_session,
            temperature: params.temperature,
            noise_band: params.noise_band,
            closeness_threshold: params.closeness_threshold,
            probability_floor: params.probability_floor,
        }
    }
}

impl FileQuizConfig {
    /// Convert into the application-layer parameter set.
    pub fn to_params(&self) -> QuizParams {
        QuizParams {
            session_ttl: Duration::from_secs(self.session_ttl_secs),
            questions_per_session: self.questions_per_session,
            temperature: self.temperature,
            noise_band: self.noise_band,
            closeness_threshold: self.closeness_threshold,
            probability_floor: self.probability_floor,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Bot settings
    pub bot: FileBotConfig,
    /// Quiz tuning
    pub quiz: FileQuizConfig,
}

impl FileConfig {
    /// Validate the configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let quiz = &self.quiz;

        if quiz.session_ttl_secs == 0 {
            issues.push(ConfigIssue::error(
                "quiz.session_ttl_secs",
                "must be positive; sessions would expire immediately",
            ));
        }
        if quiz.questions_per_session == 0 {
            issues.push(ConfigIssue::error(
                "quiz.questions_per_session",
                "must be at least 1",
            ));
        }
        if quiz.temperature <= 0.0 {
            issues.push(ConfigIssue::error(
                "quiz.temperature",
                "must be positive (softmax is undefined otherwise)",
            ));
        }
        if quiz.noise_band < 0.0 || quiz.noise_band >= 0.5 {
            issues.push(ConfigIssue::error(
                "quiz.noise_band",
                "must be in [0, 0.5)",
            ));
        }
        if quiz.closeness_threshold < 0.0 || quiz.closeness_threshold > 1.0 {
            issues.push(ConfigIssue::error(
                "quiz.closeness_threshold",
                "must be in [0, 1]",
            ));
        }
        if quiz.probability_floor <= 0.0 || quiz.probability_floor >= 0.25 {
            issues.push(ConfigIssue::error(
                "quiz.probability_floor",
                "must be in (0, 0.25); at 0.25 the floor flattens all four houses",
            ));
        }
        if quiz.temperature > 5.0 {
            issues.push(ConfigIssue::warning(
                "quiz.temperature",
                "very high temperature makes the verdict close to uniform",
            ));
        }

        issues
    }

    /// Check whether any issues are errors (i.e. fatal).
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.quiz.session_ttl_secs, 300);
        assert_eq!(config.bot.quiz_channel, "smistamento");
    }

    #[test]
    fn test_deserialize_partial_config_keeps_defaults() {
        let toml_str = r#"
[quiz]
temperature = 0.9
questions_per_session = 5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.quiz.temperature, 0.9);
        assert_eq!(config.quiz.questions_per_session, 5);
        // Untouched fields keep their defaults.
        assert_eq!(config.quiz.session_ttl_secs, 300);
        assert_eq!(config.quiz.closeness_threshold, 0.12);
    }

    #[test]
    fn test_to_params_roundtrip() {
        let toml_str = r#"
[quiz]
session_ttl_secs = 120
noise_band = 0.05
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let params = config.quiz.to_params();
        assert_eq!(params.session_ttl, Duration::from_secs(120));
        assert_eq!(params.noise_band, 0.05);
        assert_eq!(params.temperature, 1.15);
    }

    #[test]
    fn test_validate_flags_bad_values() {
        let toml_str = r#"
[quiz]
session_ttl_secs = 0
temperature = -1.0
probability_floor = 0.5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(FileConfig::has_errors(&issues));
    }

    #[test]
    fn test_high_temperature_is_warning_only() {
        let toml_str = r#"
[quiz]
temperature = 10.0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(!FileConfig::has_errors(&issues));
    }
}
