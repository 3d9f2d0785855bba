// src/cli/check.rs — `refiner check`: refine one portfolio

use super::{approval, export, progress, CheckArgs, OutputFormat};
use crate::core::adjust::ApprovalGate;
use crate::core::refiner::Refiner;
use crate::core::types::RefinementResult;
use crate::infra::config::Config;
use crate::portfolio::{self, report, Portfolio, PortfolioLimits, Rebalancer};

/// Limits from config with any CLI overrides applied.
pub fn effective_limits(args: &CheckArgs, config: &Config) -> anyhow::Result<PortfolioLimits> {
    let mut limits = PortfolioLimits::from(&config.portfolio);
    if let Some(max) = args.max_position {
        limits.max_position_size = max;
    }
    if let Some(min) = args.min_cash {
        limits.min_cash_reserve = min;
    }
    for (flag, value) in [
        ("--max-position", limits.max_position_size),
        ("--min-cash", limits.min_cash_reserve),
    ] {
        if !(0.0..=1.0).contains(&value) {
            anyhow::bail!("{flag} must be between 0 and 1, got {value}");
        }
    }
    Ok(limits)
}

fn read_portfolio(args: &CheckArgs) -> anyhow::Result<Portfolio> {
    let raw = match (&args.portfolio, &args.file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?,
        (None, None) => anyhow::bail!("Provide a portfolio as JSON or with --file"),
    };
    Ok(Portfolio::from_json(&raw)?)
}

/// Run the loop for `initial` with the standard portfolio constraints.
pub fn refine_portfolio(
    initial: &Portfolio,
    limits: &PortfolioLimits,
    max_iterations: u32,
    show_progress: bool,
    approve: bool,
) -> anyhow::Result<RefinementResult<Portfolio>> {
    let mut refiner = Refiner::new(portfolio::constraint_set(limits), max_iterations);
    if show_progress {
        refiner = refiner.with_progress(progress::terminal_progress());
    }
    let rebalancer = Rebalancer::new(limits.clone());

    let result = if approve {
        let gate = ApprovalGate::new(rebalancer, approval::confirm_adjustment);
        refiner.run(initial, &gate)?
    } else {
        refiner.run(initial, &rebalancer)?
    };
    Ok(result)
}

pub fn run_check(args: &CheckArgs, config: &Config) -> anyhow::Result<()> {
    let initial = read_portfolio(args)?;
    let limits = effective_limits(args, config)?;
    let max_iterations = args
        .max_iterations
        .unwrap_or(config.refinement.max_iterations);

    tracing::debug!(
        holdings = initial.len(),
        max_iterations,
        "Starting portfolio check"
    );

    let result = refine_portfolio(&initial, &limits, max_iterations, !args.quiet, args.approve)?;

    let rendered = match args.format {
        OutputFormat::Text => report::render(&initial, &result, &limits),
        structured => export::render(&initial, &result, structured)?,
    };
    export::write_output(&rendered, args.output.as_deref())
}
