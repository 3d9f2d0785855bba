// src/cli/approval.rs — Interactive review of proposed adjustments

use crate::core::adjust::Adjusted;
use crate::core::types::Violation;
use crate::portfolio::Portfolio;
use crate::util::{pct, truncate_str};

/// Lines shown to the reviewer before they approve or reject a proposal.
pub fn describe_proposal(
    current: &Portfolio,
    proposal: &Adjusted<Portfolio>,
    violations: &[Violation],
) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("{} violation(s):", violations.len()));
    for v in violations {
        lines.push(format!("  - {}", truncate_str(&v.description, 120)));
    }
    if let Some(ref d) = proposal.description {
        lines.push(format!("Proposed: {d}"));
    }
    for (ticker, after) in proposal.candidate.iter() {
        let before = current.weight(ticker);
        if (after - before).abs() > f64::EPSILON {
            lines.push(format!("  {ticker}: {} -> {}", pct(before), pct(after)));
        }
    }
    lines
}

/// Reviewer for `ApprovalGate`: prints the proposal to stderr and asks for
/// confirmation on the terminal.
pub fn confirm_adjustment(
    current: &Portfolio,
    proposal: &Adjusted<Portfolio>,
    violations: &[Violation],
) -> anyhow::Result<bool> {
    for line in describe_proposal(current, proposal, violations) {
        eprintln!("{line}");
    }
    let approved = inquire::Confirm::new("Apply this adjustment?")
        .with_default(true)
        .prompt()?;
    if !approved {
        tracing::info!("Adjustment rejected by reviewer");
    }
    Ok(approved)
}
