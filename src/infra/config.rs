// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::errors::RefineError;
use crate::infra::paths;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub refinement: RefinementConfig,

    #[serde(default)]
    pub portfolio: PortfolioConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinementConfig {
    pub max_iterations: u32,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self { max_iterations: 5 }
    }
}

/// Constraint limits for the portfolio checker. All values are fractions of
/// total portfolio weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub max_position_size: f64,
    pub min_cash_reserve: f64,
    pub sum_tolerance: f64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            max_position_size: 0.25,
            min_cash_reserve: 0.05,
            sum_tolerance: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the refinement loop or the portfolio checks cannot use.
    pub fn validate(&self) -> Result<(), RefineError> {
        if self.refinement.max_iterations == 0 {
            return Err(RefineError::Config(
                "refinement.max_iterations must be at least 1".into(),
            ));
        }
        let fractions = [
            ("portfolio.max_position_size", self.portfolio.max_position_size),
            ("portfolio.min_cash_reserve", self.portfolio.min_cash_reserve),
            ("portfolio.sum_tolerance", self.portfolio.sum_tolerance),
        ];
        for (key, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(RefineError::Config(format!(
                    "{key} must be between 0 and 1, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
