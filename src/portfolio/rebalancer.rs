// src/portfolio/rebalancer.rs — Rule-based reallocation policy

use super::constraints::{CASH_RESERVE, POSITION_SIZE};
use super::{Portfolio, PortfolioLimits, CASH};
use crate::core::adjust::{Adjusted, Adjuster};
use crate::core::types::Violation;
use crate::util::pct;

/// Moves a portfolio toward compliance in three passes:
///
/// 1. caps every oversized position at the limit and moves the excess to cash;
/// 2. when cash is short, scales non-cash positions down proportionally to fund it;
/// 3. when the weights no longer sum to 1.0 (within tolerance), normalises them.
///
/// Passes 1 and 2 only run when the matching constraint was violated.
#[derive(Debug, Clone)]
pub struct Rebalancer {
    limits: PortfolioLimits,
}

impl Rebalancer {
    pub fn new(limits: PortfolioLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &PortfolioLimits {
        &self.limits
    }
}

impl Adjuster<Portfolio> for Rebalancer {
    fn adjust(
        &self,
        candidate: &Portfolio,
        violations: &[Violation],
    ) -> anyhow::Result<Adjusted<Portfolio>> {
        let violated = |name: &str| violations.iter().any(|v| v.constraint_name == name);
        let max = self.limits.max_position_size;
        let mut holdings = candidate.clone().into_holdings();
        let mut notes: Vec<String> = Vec::new();

        if violated(POSITION_SIZE) {
            let mut freed = 0.0;
            for (ticker, weight) in holdings.iter_mut() {
                if ticker != CASH && *weight > max {
                    notes.push(format!("Reduced {ticker} from {} to {}", pct(*weight), pct(max)));
                    freed += *weight - max;
                    *weight = max;
                }
            }
            if freed > 0.0 {
                *holdings.entry(CASH.to_string()).or_insert(0.0) += freed;
                notes.push(format!("Moved {} to cash", pct(freed)));
            }
        }

        if violated(CASH_RESERVE) {
            let cash = holdings.get(CASH).copied().unwrap_or(0.0);
            let needed = self.limits.min_cash_reserve - cash;
            let non_cash_total: f64 = holdings
                .iter()
                .filter(|(t, _)| t.as_str() != CASH)
                .map(|(_, w)| *w)
                .sum();
            if needed > 0.0 && non_cash_total > 0.0 {
                let scale = ((non_cash_total - needed) / non_cash_total).max(0.0);
                for (ticker, weight) in holdings.iter_mut() {
                    if ticker != CASH {
                        *weight *= scale;
                    }
                }
                holdings.insert(CASH.to_string(), cash + needed);
                notes.push(format!(
                    "Increased cash reserve to {}",
                    pct(self.limits.min_cash_reserve)
                ));
            }
        }

        let total: f64 = holdings.values().sum();
        if total > 0.0 && (total - 1.0).abs() > self.limits.sum_tolerance {
            for weight in holdings.values_mut() {
                *weight /= total;
            }
            notes.push("Normalized portfolio to 100%".to_string());
        }

        if notes.is_empty() {
            tracing::debug!("Rebalancer found nothing to change");
            notes.push("No rebalancing rule applied".to_string());
        }

        let next = Portfolio::new(holdings)?;
        Ok(Adjusted::new(next).with_description(notes.join("; ")))
    }
}
