// src/portfolio/report.rs — Plain-text rendering of a refinement run

use std::fmt::Write;

use super::{Portfolio, PortfolioLimits};
use crate::core::types::{RefinementResult, StopReason};
use crate::util::pct;

/// Render the initial portfolio, the adjustment trace, the final portfolio
/// and the terminal status as a Markdown-flavoured report.
pub fn render(
    initial: &Portfolio,
    result: &RefinementResult<Portfolio>,
    limits: &PortfolioLimits,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# PORTFOLIO CONSTRAINT ANALYSIS\n");

    let _ = writeln!(out, "## Initial Portfolio");
    write_holdings(&mut out, initial);

    let _ = writeln!(out, "## Iteration Summary");
    let _ = writeln!(out, "**Total Iterations**: {}\n", result.iterations_used);

    let remaining = result.remaining_violations();
    if !remaining.is_empty() {
        let _ = writeln!(out, "## Remaining Violations");
        for v in remaining {
            let _ = writeln!(out, "- {}", v.description);
        }
        out.push('\n');
    }

    if !result.adjustments.is_empty() {
        let _ = writeln!(out, "## Adjustments Made");
        for adj in &result.adjustments {
            let _ = writeln!(
                out,
                "- Iteration {}: {}",
                adj.iteration_index + 1,
                adj.description
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "## Final Portfolio");
    write_holdings(&mut out, &result.final_candidate);

    match result.stopped_reason {
        StopReason::Converged => {
            let _ = writeln!(out, "## Status: ALL CONSTRAINTS SATISFIED\n");
            let _ = writeln!(out, "The portfolio meets all defined constraints:");
            let _ = writeln!(
                out,
                "- No position exceeds {}",
                pct(limits.max_position_size)
            );
            let _ = writeln!(
                out,
                "- Cash reserve at or above {}",
                pct(limits.min_cash_reserve)
            );
            let _ = writeln!(out, "- Portfolio sums to 100%");
        }
        StopReason::MaxIterations => {
            let _ = writeln!(out, "## Status: MAXIMUM ITERATIONS REACHED\n");
            let _ = writeln!(
                out,
                "Could not satisfy all constraints within {} iteration(s).",
                result.iterations_used
            );
            let _ = writeln!(out, "Manual review recommended.");
        }
    }

    out
}

fn write_holdings(out: &mut String, p: &Portfolio) {
    for (ticker, weight) in p.iter() {
        let _ = writeln!(out, "- **{ticker}**: {}", pct(weight));
    }
    let _ = writeln!(out, "\n**Total**: {}\n", pct(p.total()));
}
