//! # Recommendation Configuration
//!
//! Scoring weights and request defaults for the engine.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VITRINA_RECS_MIN_CONFIDENCE=0.2                                    │
//! │     VITRINA_RECS_FREQUENCY_WEIGHT=0.7                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/vitrina-pos/recommendations.toml (Linux)                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [scoring]
//! frequency_weight = 0.6
//! category_weight = 0.3
//! history_weight = 0.4
//! upsell_weight = 0.2
//! min_support = 1
//!
//! [defaults]
//! min_confidence = 0.1
//! max_results = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use vitrina_core::validation::{validate_positive_count, validate_unit_value};
use vitrina_core::{DEFAULT_MAX_RESULTS, DEFAULT_MIN_CONFIDENCE};

use crate::error::{RecsError, RecsResult};

// =============================================================================
// Scoring Weights
// =============================================================================

/// How much each signal contributes to a suggestion's confidence.
///
/// ## Combination
/// ```text
/// confidence = min(1.0,  frequency_weight × co(A,B) / support(A)
///                      + category_weight  × [same category]
///                      + history_weight   × bought(B) / customer purchases
///                      + upsell_weight    × [same category, pricier])
/// ```
/// Every term is non-negative and non-decreasing in its input, so more
/// co-purchases never lower a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight of the normalised co-occurrence ratio.
    #[serde(default = "default_frequency_weight")]
    pub frequency_weight: f64,

    /// Flat boost for sharing a category with a cart item.
    #[serde(default = "default_category_weight")]
    pub category_weight: f64,

    /// Weight of the customer's own purchase frequency for the product.
    #[serde(default = "default_history_weight")]
    pub history_weight: f64,

    /// Flat boost for a pricier product in a cart item's category.
    #[serde(default = "default_upsell_weight")]
    pub upsell_weight: f64,

    /// Co-occurrences a pair needs before the frequency signal fires.
    #[serde(default = "default_min_support")]
    pub min_support: u32,
}

fn default_frequency_weight() -> f64 {
    0.6
}

fn default_category_weight() -> f64 {
    0.3
}

fn default_history_weight() -> f64 {
    0.4
}

fn default_upsell_weight() -> f64 {
    0.2
}

fn default_min_support() -> u32 {
    1
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            frequency_weight: default_frequency_weight(),
            category_weight: default_category_weight(),
            history_weight: default_history_weight(),
            upsell_weight: default_upsell_weight(),
            min_support: default_min_support(),
        }
    }
}

// =============================================================================
// Request Defaults
// =============================================================================

/// Values used when a caller leaves `min_confidence` / `max_results` out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDefaults {
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_min_confidence() -> f64 {
    DEFAULT_MIN_CONFIDENCE
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

impl Default for RequestDefaults {
    fn default() -> Self {
        RequestDefaults {
            min_confidence: default_min_confidence(),
            max_results: default_max_results(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete recommendation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecsConfig {
    #[serde(default)]
    pub scoring: ScoringWeights,

    #[serde(default)]
    pub defaults: RequestDefaults,
}

impl RecsConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (recommendations.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> RecsResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading recommendation config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load recommendation config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> RecsResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| RecsError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Recommendation config saved");
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// Weights and `min_confidence` must lie in `[0, 1]`; `max_results` and
    /// `min_support` must be at least one.
    pub fn validate(&self) -> RecsResult<()> {
        let s = &self.scoring;
        let unit_fields = [
            ("scoring.frequency_weight", s.frequency_weight),
            ("scoring.category_weight", s.category_weight),
            ("scoring.history_weight", s.history_weight),
            ("scoring.upsell_weight", s.upsell_weight),
            ("defaults.min_confidence", self.defaults.min_confidence),
        ];
        for (field, value) in unit_fields {
            validate_unit_value(field, value).map_err(RecsError::InvalidConfig)?;
        }

        validate_positive_count("scoring.min_support", s.min_support as usize)
            .map_err(RecsError::InvalidConfig)?;
        validate_positive_count("defaults.max_results", self.defaults.max_results)
            .map_err(RecsError::InvalidConfig)?;

        Ok(())
    }

    /// Applies `VITRINA_RECS_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let float = |key: &str, target: &mut f64| {
            if let Some(raw) = lookup(key) {
                match raw.trim().parse::<f64>() {
                    Ok(v) => {
                        debug!(key, value = v, "Overriding from environment");
                        *target = v;
                    }
                    Err(_) => warn!(key, value = %raw, "Ignoring non-numeric override"),
                }
            }
        };

        float("VITRINA_RECS_FREQUENCY_WEIGHT", &mut self.scoring.frequency_weight);
        float("VITRINA_RECS_CATEGORY_WEIGHT", &mut self.scoring.category_weight);
        float("VITRINA_RECS_HISTORY_WEIGHT", &mut self.scoring.history_weight);
        float("VITRINA_RECS_UPSELL_WEIGHT", &mut self.scoring.upsell_weight);
        float("VITRINA_RECS_MIN_CONFIDENCE", &mut self.defaults.min_confidence);

        if let Some(raw) = lookup("VITRINA_RECS_MAX_RESULTS") {
            match raw.trim().parse::<usize>() {
                Ok(v) => self.defaults.max_results = v,
                Err(_) => warn!(value = %raw, "Ignoring invalid VITRINA_RECS_MAX_RESULTS"),
            }
        }

        if let Some(raw) = lookup("VITRINA_RECS_MIN_SUPPORT") {
            match raw.trim().parse::<u32>() {
                Ok(v) => self.scoring.min_support = v,
                Err(_) => warn!(value = %raw, "Ignoring invalid VITRINA_RECS_MIN_SUPPORT"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vitrina", "pos")
            .map(|dirs| dirs.config_dir().join("recommendations.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = RecsConfig::default();
        assert_eq!(config.scoring.frequency_weight, 0.6);
        assert_eq!(config.scoring.min_support, 1);
        assert_eq!(config.defaults.max_results, DEFAULT_MAX_RESULTS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = RecsConfig::default();

        config.scoring.upsell_weight = 1.5;
        assert!(matches!(
            config.validate(),
            Err(RecsError::InvalidConfig(_))
        ));

        config.scoring.upsell_weight = 0.2;
        config.defaults.max_results = 0;
        assert!(config.validate().is_err());

        config.defaults.max_results = 3;
        config.scoring.min_support = 0;
        assert!(config.validate().is_err());

        config.scoring.min_support = 2;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: RecsConfig = toml::from_str(
            r#"
            [scoring]
            frequency_weight = 0.8

            [defaults]
            max_results = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.scoring.frequency_weight, 0.8);
        assert_eq!(config.scoring.category_weight, 0.3);
        assert_eq!(config.defaults.max_results, 3);
        assert_eq!(config.defaults.min_confidence, DEFAULT_MIN_CONFIDENCE);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("VITRINA_RECS_MIN_CONFIDENCE", "0.25"),
            ("VITRINA_RECS_MAX_RESULTS", "10"),
            ("VITRINA_RECS_HISTORY_WEIGHT", "not-a-number"),
            ("VITRINA_RECS_MIN_SUPPORT", "2"),
        ]
        .into_iter()
        .collect();

        let mut config = RecsConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.defaults.min_confidence, 0.25);
        assert_eq!(config.defaults.max_results, 10);
        assert_eq!(config.scoring.min_support, 2);
        // Bad value leaves the default alone
        assert_eq!(config.scoring.history_weight, 0.4);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("vitrina-recs-config-{}", std::process::id()));
        let path = dir.join("recommendations.toml");

        let mut config = RecsConfig::default();
        config.scoring.category_weight = 0.5;
        config.save(Some(path.clone())).unwrap();

        let loaded = RecsConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.scoring.category_weight, 0.5);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&RecsConfig::default()).unwrap();
        assert!(toml_str.contains("[scoring]"));
        assert!(toml_str.contains("[defaults]"));
    }
}
