// src/portfolio/constraints.rs — Portfolio constraint rules

use super::{Portfolio, PortfolioLimits};
use crate::core::constraint::{Constraint, ConstraintSet};
use crate::util::pct;

pub const POSITION_SIZE: &str = "position_size";
pub const CASH_RESERVE: &str = "cash_reserve";
pub const SUM_TO_ONE: &str = "sum_to_one";

/// No single non-cash position may exceed `max`. One violation per offending ticker.
pub struct PositionSizeLimit {
    pub max: f64,
}

impl Constraint<Portfolio> for PositionSizeLimit {
    fn name(&self) -> &str {
        POSITION_SIZE
    }

    fn evaluate(&self, p: &Portfolio) -> anyhow::Result<Vec<String>> {
        Ok(p.non_cash()
            .filter(|(_, w)| *w > self.max)
            .map(|(ticker, w)| {
                format!(
                    "{ticker} position ({}) exceeds maximum allowed ({})",
                    pct(w),
                    pct(self.max)
                )
            })
            .collect())
    }
}

/// Cash must make up at least `min` of the portfolio.
pub struct CashReserve {
    pub min: f64,
}

impl Constraint<Portfolio> for CashReserve {
    fn name(&self) -> &str {
        CASH_RESERVE
    }

    fn evaluate(&self, p: &Portfolio) -> anyhow::Result<Vec<String>> {
        let cash = p.cash();
        if cash < self.min {
            Ok(vec![format!(
                "Cash reserve ({}) below minimum required ({})",
                pct(cash),
                pct(self.min)
            )])
        } else {
            Ok(vec![])
        }
    }
}

/// Weights must sum to 1.0 within `tolerance`.
pub struct WeightSum {
    pub tolerance: f64,
}

impl Constraint<Portfolio> for WeightSum {
    fn name(&self) -> &str {
        SUM_TO_ONE
    }

    fn evaluate(&self, p: &Portfolio) -> anyhow::Result<Vec<String>> {
        let total = p.total();
        if (total - 1.0).abs() > self.tolerance {
            Ok(vec![format!(
                "Portfolio weights sum to {} instead of 100%",
                pct(total)
            )])
        } else {
            Ok(vec![])
        }
    }
}

/// The standard portfolio checks, in evaluation order: position size, cash
/// reserve, weight sum.
pub fn constraint_set(limits: &PortfolioLimits) -> ConstraintSet<Portfolio> {
    ConstraintSet::new()
        .with(PositionSizeLimit {
            max: limits.max_position_size,
        })
        .with(CashReserve {
            min: limits.min_cash_reserve,
        })
        .with(WeightSum {
            tolerance: limits.sum_tolerance,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portfolio(pairs: &[(&str, f64)]) -> Portfolio {
        Portfolio::from_pairs(pairs.iter().map(|(t, w)| (*t, *w))).unwrap()
    }

    #[test]
    fn test_position_size_reports_each_ticker() {
        let c = PositionSizeLimit { max: 0.25 };
        let p = portfolio(&[("AAPL", 0.4), ("MSFT", 0.3), ("GOOGL", 0.2), ("CASH", 0.1)]);
        let v = c.evaluate(&p).unwrap();
        assert_eq!(
            v,
            vec![
                "AAPL position (40.0%) exceeds maximum allowed (25.0%)".to_string(),
                "MSFT position (30.0%) exceeds maximum allowed (25.0%)".to_string(),
            ]
        );
    }

    #[test]
    fn test_position_size_ignores_cash() {
        let c = PositionSizeLimit { max: 0.25 };
        let p = portfolio(&[("AAPL", 0.2), ("CASH", 0.8)]);
        assert!(c.evaluate(&p).unwrap().is_empty());
    }

    #[test]
    fn test_position_size_at_limit_passes() {
        let c = PositionSizeLimit { max: 0.30 };
        let p = portfolio(&[("GOOGL", 0.30), ("CASH", 0.70)]);
        assert!(c.evaluate(&p).unwrap().is_empty());
    }

    #[test]
    fn test_cash_reserve() {
        let c = CashReserve { min: 0.05 };
        assert_eq!(
            c.evaluate(&portfolio(&[("AAPL", 0.98), ("CASH", 0.02)])).unwrap(),
            vec!["Cash reserve (2.0%) below minimum required (5.0%)".to_string()]
        );
        assert!(c
            .evaluate(&portfolio(&[("AAPL", 0.9), ("CASH", 0.1)]))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_cash_reserve_missing_cash() {
        let c = CashReserve { min: 0.05 };
        assert_eq!(c.evaluate(&portfolio(&[("AAPL", 1.0)])).unwrap().len(), 1);
    }

    #[test]
    fn test_weight_sum() {
        let c = WeightSum { tolerance: 0.01 };
        assert_eq!(
            c.evaluate(&portfolio(&[("AAPL", 0.5), ("CASH", 0.3)])).unwrap(),
            vec!["Portfolio weights sum to 80.0% instead of 100%".to_string()]
        );
        assert!(c
            .evaluate(&portfolio(&[("AAPL", 0.5), ("CASH", 0.495)]))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_constraint_set_order() {
        let set = constraint_set(&PortfolioLimits::default());
        assert_eq!(set.names(), vec![POSITION_SIZE, CASH_RESERVE, SUM_TO_ONE]);
    }
}
