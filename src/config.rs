use crate::PALETTE_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest face value the walker accepts
pub const MAX_FACE_VALUE: u8 = 64;

/// Largest number of copies per (number, suit) the enumerator accepts
pub const MAX_COPIES: u8 = 8;

/// How run transitions are credited during the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    /// One run lane per suit. A run is credited in full the step it reaches
    /// three tiles, then one face value per extension. Unfinished runs score
    /// nothing, so the best score never exceeds the total face value.
    #[default]
    Strict,
    /// Credits every tile added to a run as it is added, then the last three
    /// face values again when a run of three or more ends. Runs may consume
    /// several copies of one tile. Scores can exceed the total face value.
    Incremental,
}

/// Parameters bounding one solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Highest face value (N)
    pub max_value: u8,
    /// Number of suits in play (K), a prefix of the palette
    pub suit_count: usize,
    /// Expected copies of each tile (M)
    pub copies: u8,
    /// Fraction of the total face value the best score must reach
    pub threshold: f64,
    pub scoring: ScoringRule,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_value: 13,
            suit_count: PALETTE_SIZE,
            copies: 2,
            threshold: 0.8,
            scoring: ScoringRule::Strict,
        }
    }
}

impl SolverConfig {
    pub fn with_scoring(mut self, scoring: ScoringRule) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Reject configurations outside what the engine can represent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suit_count == 0 || self.suit_count > PALETTE_SIZE {
            return Err(ConfigError::SuitCount(self.suit_count));
        }
        if self.max_value == 0 || self.max_value > MAX_FACE_VALUE {
            return Err(ConfigError::MaxValue(self.max_value));
        }
        if self.copies == 0 || self.copies > MAX_COPIES {
            return Err(ConfigError::Copies(self.copies));
        }
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Threshold(self.threshold));
        }
        Ok(())
    }
}

/// A configuration the engine refuses to run with
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    SuitCount(usize),
    MaxValue(u8),
    Copies(u8),
    Threshold(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SuitCount(k) => {
                write!(f, "Suit count must be 1-{}, got {}", PALETTE_SIZE, k)
            }
            ConfigError::MaxValue(n) => {
                write!(f, "Max value must be 1-{}, got {}", MAX_FACE_VALUE, n)
            }
            ConfigError::Copies(m) => write!(f, "Copies must be 1-{}, got {}", MAX_COPIES, m),
            ConfigError::Threshold(t) => write!(f, "Threshold must be within 0.0-1.0, got {}", t),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SolverConfig::default();
        assert_eq!(config.max_value, 13);
        assert_eq!(config.suit_count, 4);
        assert_eq!(config.copies, 2);
        assert_eq!(config.scoring, ScoringRule::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_unsupported_suit_count() {
        let config = SolverConfig {
            suit_count: 5,
            ..SolverConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SuitCount(5)));

        let config = SolverConfig {
            suit_count: 0,
            ..SolverConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SuitCount(0)));
    }

    #[test]
    fn test_rejects_face_range_and_copies() {
        let config = SolverConfig {
            max_value: MAX_FACE_VALUE + 1,
            ..SolverConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MaxValue(MAX_FACE_VALUE + 1)));

        let config = SolverConfig {
            copies: 0,
            ..SolverConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Copies(0)));
    }

    #[test]
    fn test_rejects_bad_threshold() {
        assert!(SolverConfig::default().with_threshold(1.5).validate().is_err());
        assert!(SolverConfig::default().with_threshold(-0.1).validate().is_err());
        assert!(SolverConfig::default().with_threshold(f64::NAN).validate().is_err());
        assert!(SolverConfig::default().with_threshold(1.0).validate().is_ok());
    }

    #[test]
    fn test_error_messages_name_the_field() {
        assert_eq!(
            ConfigError::SuitCount(6).to_string(),
            "Suit count must be 1-4, got 6"
        );
        assert!(ConfigError::Threshold(2.0).to_string().contains("Threshold"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: SolverConfig =
            serde_json::from_str(r#"{"threshold": 1.0, "scoring": "incremental"}"#).unwrap();
        assert_eq!(config.threshold, 1.0);
        assert_eq!(config.scoring, ScoringRule::Incremental);
        assert_eq!(config.max_value, 13);
    }
}
