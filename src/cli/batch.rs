// src/cli/batch.rs — `refiner batch`: refine many portfolio files concurrently
//
// Each file gets its own blocking task on the runtime's blocking pool. Runs
// share nothing but the (immutable) limits.

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::refiner::Refiner;
use crate::core::types::{RefinementResult, StopReason};
use crate::infra::config::Config;
use crate::portfolio::{self, Portfolio, PortfolioLimits, Rebalancer};
use crate::util::pct;

/// Outcome of one file in a batch, in input order.
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub outcome: Result<RefinementResult<Portfolio>, String>,
}

impl BatchEntry {
    pub fn summary_line(&self) -> String {
        let name = self.path.display();
        match &self.outcome {
            Ok(r) => {
                let status = match r.stopped_reason {
                    StopReason::Converged => "ok",
                    StopReason::MaxIterations => "UNRESOLVED",
                };
                format!(
                    "{name}: {status} iterations={} remaining={} cash={}",
                    r.iterations_used,
                    r.remaining_violations().len(),
                    pct(r.final_candidate.cash()),
                )
            }
            Err(e) => format!("{name}: error: {e}"),
        }
    }
}

fn refine_file(
    path: &std::path::Path,
    limits: &PortfolioLimits,
    max_iterations: u32,
) -> anyhow::Result<RefinementResult<Portfolio>> {
    let raw = std::fs::read_to_string(path)?;
    let initial = Portfolio::from_json(&raw)?;
    let refiner = Refiner::new(portfolio::constraint_set(limits), max_iterations);
    Ok(refiner.run(&initial, &Rebalancer::new(limits.clone()))?)
}

/// Refine every file concurrently. Per-file failures are reported in the
/// entry, not returned as an error.
pub async fn refine_files(
    files: Vec<PathBuf>,
    limits: PortfolioLimits,
    max_iterations: u32,
) -> Vec<BatchEntry> {
    let limits = Arc::new(limits);
    let handles: Vec<_> = files
        .into_iter()
        .map(|path| {
            let limits = limits.clone();
            let task_path = path.clone();
            let handle = tokio::task::spawn_blocking(move || {
                refine_file(&task_path, &limits, max_iterations).map_err(|e| format!("{e:#}"))
            });
            (path, handle)
        })
        .collect();

    let (paths, tasks): (Vec<PathBuf>, Vec<_>) = handles.into_iter().unzip();
    let joined = futures::future::join_all(tasks).await;

    paths
        .into_iter()
        .zip(joined)
        .map(|(path, joined)| {
            let outcome = joined.unwrap_or_else(|e| Err(format!("task failed: {e}")));
            BatchEntry { path, outcome }
        })
        .collect()
}

pub async fn run_batch(
    files: Vec<PathBuf>,
    max_iterations: Option<u32>,
    config: &Config,
) -> anyhow::Result<()> {
    let limits = PortfolioLimits::from(&config.portfolio);
    let max_iterations = max_iterations.unwrap_or(config.refinement.max_iterations);
    let total = files.len();

    let entries = refine_files(files, limits, max_iterations).await;

    let mut failed = 0;
    for entry in &entries {
        if entry.outcome.is_err() {
            failed += 1;
        }
        println!("{}", entry.summary_line());
    }
    tracing::info!(total, failed, "Batch finished");

    if failed > 0 {
        anyhow::bail!("{failed} of {total} portfolio(s) could not be processed");
    }
    Ok(())
}
