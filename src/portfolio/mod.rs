// src/portfolio/mod.rs — Portfolio allocation as a refinement candidate

pub mod constraints;
pub mod rebalancer;
pub mod report;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::infra::config::PortfolioConfig;
use crate::infra::errors::RefineError;

pub use constraints::constraint_set;
pub use rebalancer::Rebalancer;

/// Ticker that holds the cash position.
pub const CASH: &str = "CASH";

/// Ticker → weight allocation. Weights are non-negative fractions; whether
/// they sum to 1.0 is up to the constraints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct Portfolio {
    holdings: BTreeMap<String, f64>,
}

impl Portfolio {
    pub fn new(holdings: BTreeMap<String, f64>) -> Result<Self, RefineError> {
        for (ticker, weight) in &holdings {
            if ticker.trim().is_empty() {
                return Err(RefineError::InvalidPortfolio("empty ticker".into()));
            }
            if !weight.is_finite() || *weight < 0.0 {
                return Err(RefineError::InvalidPortfolio(format!(
                    "{ticker} has invalid weight {weight}; weights must be finite and non-negative"
                )));
            }
        }
        Ok(Self { holdings })
    }

    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, RefineError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(k, w)| (k.into(), w)).collect())
    }

    /// Parse a JSON object of `{ticker: weight}`.
    pub fn from_json(json: &str) -> Result<Self, RefineError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(RefineError::InvalidPortfolio(
                "portfolio must be a JSON object of {ticker: weight}".into(),
            ));
        }
        let holdings: BTreeMap<String, f64> = serde_json::from_value(value)?;
        Self::new(holdings)
    }

    /// Weight of `ticker`, 0.0 when not held.
    pub fn weight(&self, ticker: &str) -> f64 {
        self.holdings.get(ticker).copied().unwrap_or(0.0)
    }

    pub fn cash(&self) -> f64 {
        self.weight(CASH)
    }

    pub fn total(&self) -> f64 {
        self.holdings.values().sum()
    }

    pub fn non_cash_total(&self) -> f64 {
        self.non_cash().map(|(_, w)| w).sum()
    }

    /// Holdings in ticker order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.holdings.iter().map(|(t, w)| (t.as_str(), *w))
    }

    /// Non-cash holdings in ticker order.
    pub fn non_cash(&self) -> impl Iterator<Item = (&str, f64)> {
        self.iter().filter(|(t, _)| *t != CASH)
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub(crate) fn into_holdings(self) -> BTreeMap<String, f64> {
        self.holdings
    }
}

impl TryFrom<BTreeMap<String, f64>> for Portfolio {
    type Error = RefineError;

    fn try_from(holdings: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(holdings)
    }
}

impl From<Portfolio> for BTreeMap<String, f64> {
    fn from(p: Portfolio) -> Self {
        p.holdings
    }
}

/// Limits the portfolio constraints enforce.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioLimits {
    pub max_position_size: f64,
    pub min_cash_reserve: f64,
    pub sum_tolerance: f64,
}

impl Default for PortfolioLimits {
    fn default() -> Self {
        Self::from(&PortfolioConfig::default())
    }
}

impl From<&PortfolioConfig> for PortfolioLimits {
    fn from(cfg: &PortfolioConfig) -> Self {
        Self {
            max_position_size: cfg.max_position_size,
            min_cash_reserve: cfg.min_cash_reserve,
            sum_tolerance: cfg.sum_tolerance,
        }
    }
}
