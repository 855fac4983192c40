//! Rewrite configuration: probability gates, strategy weights, and named
//! style profiles.
//!
//! Every probability is an independent gate in `[0, 1]`. The synonym
//! probability is accepted and validated for interface compatibility but
//! has no effect; synonym substitution is not part of this engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::services::hedging::DEFAULT_WEIGHTS;
use crate::ProsaicError;

/// Named probability presets. `Balanced` is the default profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StyleProfile {
    Academic,
    Formal,
    Casual,
    Technical,
    Creative,
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Per-sentence chance of attempting a hedge.
    pub hedging_probability: f64,
    /// Per-pair chance of attempting to combine adjacent sentences.
    pub sentence_combine_probability: f64,
    /// Per-sentence chance of prepending an academic transition.
    pub transition_probability: f64,
    /// Accepted but unused; kept so callers can share one config shape.
    pub synonym_probability: f64,
    /// Weights over the five hedging strategies, in catalog order.
    pub strategy_weights: [u32; 5],
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            hedging_probability: 0.15,
            sentence_combine_probability: 0.3,
            transition_probability: 0.2,
            synonym_probability: 0.2,
            strategy_weights: DEFAULT_WEIGHTS,
        }
    }
}

impl RewriteConfig {
    pub fn from_style(style: StyleProfile) -> Self {
        let base = Self::default();
        match style {
            StyleProfile::Academic => Self {
                hedging_probability: 0.3,
                transition_probability: 0.35,
                sentence_combine_probability: 0.2,
                ..base
            },
            StyleProfile::Formal => Self {
                hedging_probability: 0.2,
                transition_probability: 0.25,
                sentence_combine_probability: 0.15,
                ..base
            },
            StyleProfile::Casual => Self {
                hedging_probability: 0.1,
                transition_probability: 0.05,
                sentence_combine_probability: 0.45,
                ..base
            },
            StyleProfile::Technical => Self {
                hedging_probability: 0.05,
                transition_probability: 0.1,
                sentence_combine_probability: 0.15,
                ..base
            },
            StyleProfile::Creative => Self {
                hedging_probability: 0.2,
                transition_probability: 0.1,
                sentence_combine_probability: 0.4,
                ..base
            },
            StyleProfile::Balanced => base,
        }
    }

    /// Load from a TOML file. Missing fields fall back to defaults; the
    /// result is validated.
    pub fn from_toml_file(path: &Path) -> Result<Self, ProsaicError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ProsaicError::Config {
            message: format!("cannot read config file {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        let config: Self = toml::from_str(&raw).map_err(|e| ProsaicError::Config {
            message: format!("invalid config file {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProsaicError> {
        for (name, value) in [
            ("hedging_probability", self.hedging_probability),
            (
                "sentence_combine_probability",
                self.sentence_combine_probability,
            ),
            ("transition_probability", self.transition_probability),
            ("synonym_probability", self.synonym_probability),
        ] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(ProsaicError::Validation(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.strategy_weights.iter().all(|w| *w == 0) {
            return Err(ProsaicError::Validation(
                "strategy_weights must contain at least one non-zero weight".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = RewriteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.hedging_probability, 0.15);
        assert_eq!(config.sentence_combine_probability, 0.3);
    }

    #[test]
    fn test_every_style_profile_is_valid() {
        for style in [
            StyleProfile::Academic,
            StyleProfile::Formal,
            StyleProfile::Casual,
            StyleProfile::Technical,
            StyleProfile::Creative,
            StyleProfile::Balanced,
        ] {
            assert!(RewriteConfig::from_style(style).validate().is_ok());
        }
    }

    #[test]
    fn test_academic_hedges_more_than_technical() {
        let academic = RewriteConfig::from_style(StyleProfile::Academic);
        let technical = RewriteConfig::from_style(StyleProfile::Technical);
        assert!(academic.hedging_probability > technical.hedging_probability);
        assert!(academic.transition_probability > technical.transition_probability);
    }

    #[test]
    fn test_out_of_range_probability_rejected() {
        let config = RewriteConfig {
            hedging_probability: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RewriteConfig {
            transition_probability: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_weights_rejected() {
        let config = RewriteConfig {
            strategy_weights: [0; 5],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: RewriteConfig = toml::from_str("hedging_probability = 0.5").unwrap();
        assert_eq!(config.hedging_probability, 0.5);
        assert_eq!(config.sentence_combine_probability, 0.3);
        assert_eq!(config.strategy_weights, DEFAULT_WEIGHTS);
    }
}
