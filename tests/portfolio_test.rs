// tests/portfolio_test.rs — Integration test: portfolio checks end to end

use pretty_assertions::assert_eq;

use refiner::cli::batch::refine_files;
use refiner::cli::check::refine_portfolio;
use refiner::cli::progress::format_event;
use refiner::core::refiner::Refiner;
use refiner::core::types::{ProgressEvent, StopReason};
use refiner::infra::config::Config;
use refiner::portfolio::{self, report, Portfolio, PortfolioLimits, Rebalancer, CASH};

fn write(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// ─── Rebalancing ────────────────────────────────────────────────

#[test]
fn test_concentrated_portfolio_reaches_compliance() {
    let initial =
        Portfolio::from_json(r#"{"AAPL": 0.30, "GOOGL": 0.25, "MSFT": 0.20, "CASH": 0.25}"#)
            .unwrap();
    let limits = PortfolioLimits::default();
    let result = refine_portfolio(&initial, &limits, 5, false, false).unwrap();

    assert!(result.satisfied);
    assert!(result
        .final_candidate
        .non_cash()
        .all(|(_, w)| w <= limits.max_position_size));
    assert!(result.final_candidate.cash() >= limits.min_cash_reserve);
    assert!((result.final_candidate.total() - 1.0).abs() <= limits.sum_tolerance);
}

#[test]
fn test_cashless_portfolio_gets_reserve() {
    let initial = Portfolio::from_pairs([
        ("AAPL", 0.25),
        ("MSFT", 0.25),
        ("NVDA", 0.25),
        ("AMZN", 0.25),
    ])
    .unwrap();
    let limits = PortfolioLimits::default();
    let result = Refiner::new(portfolio::constraint_set(&limits), 5)
        .run(&initial, &Rebalancer::new(limits.clone()))
        .unwrap();

    assert_eq!(result.stopped_reason, StopReason::Converged);
    assert_eq!(result.violations[0].constraint_name, "cash_reserve");
    assert!(result.final_candidate.cash() >= limits.min_cash_reserve - 1e-9);
}

#[test]
fn test_underweight_portfolio_is_normalized() {
    let initial = Portfolio::from_pairs([("AAPL", 0.10), ("MSFT", 0.10), (CASH, 0.20)]).unwrap();
    let limits = PortfolioLimits {
        max_position_size: 0.5,
        ..PortfolioLimits::default()
    };
    let result = Refiner::new(portfolio::constraint_set(&limits), 3)
        .run(&initial, &Rebalancer::new(limits))
        .unwrap();

    assert!(result.satisfied);
    assert_eq!(result.iterations_used, 1);
    assert_eq!(result.adjustments[0].description, "Normalized portfolio to 100%");
    assert!((result.final_candidate.cash() - 0.5).abs() < 1e-9);
}

// ─── Report ─────────────────────────────────────────────────────

#[test]
fn test_report_for_converged_run() {
    let initial = Portfolio::from_json(r#"{"AAPL": 0.35, "CASH": 0.65}"#).unwrap();
    let limits = PortfolioLimits::default();
    let result = refine_portfolio(&initial, &limits, 5, false, false).unwrap();
    let text = report::render(&initial, &result, &limits);

    assert!(text.starts_with("# PORTFOLIO CONSTRAINT ANALYSIS"));
    assert!(text.contains("## Initial Portfolio"));
    assert!(text.contains("**Total Iterations**: 1"));
    assert!(text.contains("- Iteration 1: Reduced AAPL from 35.0% to 25.0%"));
    assert!(text.contains("## Status: ALL CONSTRAINTS SATISFIED"));
    assert!(!text.contains("## Remaining Violations"));
}

#[test]
fn test_report_for_exhausted_run() {
    // capping then normalising pushes AAPL back over the limit
    let initial = Portfolio::from_pairs([("AAPL", 0.90)]).unwrap();
    let limits = PortfolioLimits::default();
    let result = refine_portfolio(&initial, &limits, 1, false, false).unwrap();
    let text = report::render(&initial, &result, &limits);

    assert_eq!(result.stopped_reason, StopReason::MaxIterations);
    assert!(text.contains("## Remaining Violations"));
    assert!(text.contains("## Status: MAXIMUM ITERATIONS REACHED"));
    assert!(text.contains("Could not satisfy all constraints within 1 iteration(s)."));
}

// ─── Config ─────────────────────────────────────────────────────

#[test]
fn test_config_file_drives_limits() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "config.toml",
        "[refinement]\nmax_iterations = 2\n\n[portfolio]\nmax_position_size = 0.40\n",
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.refinement.max_iterations, 2);

    let limits = PortfolioLimits::from(&config.portfolio);
    assert!((limits.max_position_size - 0.40).abs() < 1e-9);
    assert!((limits.min_cash_reserve - 0.05).abs() < 1e-9);

    let initial = Portfolio::from_pairs([("AAPL", 0.35), ("CASH", 0.65)]).unwrap();
    let result = Refiner::from_config(portfolio::constraint_set(&limits), &config.refinement)
        .run(&initial, &Rebalancer::new(limits))
        .unwrap();
    assert_eq!(result.iterations_used, 0);
}

#[test]
fn test_invalid_config_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "config.toml", "[refinement]\nmax_iterations = 0\n");
    assert!(Config::load_from(&path).is_err());
}

// ─── Batch ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_batch_reports_each_file() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.json", r#"{"AAPL": 0.35, "CASH": 0.65}"#);
    let b = write(dir.path(), "b.json", r#"{"AAPL": -0.35}"#);
    let c = write(dir.path(), "c.json", r#"{"MSFT": 0.2, "BND": 0.25, "CASH": 0.55}"#);

    let entries = refine_files(vec![a, b, c], PortfolioLimits::default(), 5).await;

    assert_eq!(entries.len(), 3);
    let first = entries[0].outcome.as_ref().unwrap();
    assert_eq!(first.iterations_used, 1);
    assert!(entries[1].outcome.is_err());
    assert!(entries[1].summary_line().contains("error"));
    let third = entries[2].outcome.as_ref().unwrap();
    assert_eq!(third.iterations_used, 0);
    assert!(entries[2].summary_line().contains(": ok iterations=0"));
}

// ─── Progress ───────────────────────────────────────────────────

#[test]
fn test_progress_lines_for_run() {
    let lines = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = lines.clone();
    let initial = Portfolio::from_pairs([("AAPL", 0.35), ("CASH", 0.65)]).unwrap();
    let limits = PortfolioLimits::default();
    Refiner::new(portfolio::constraint_set(&limits), 5)
        .with_progress(move |e: ProgressEvent| sink.lock().unwrap().push(format_event(&e)))
        .run(&initial, &Rebalancer::new(limits))
        .unwrap();

    let lines = lines.lock().unwrap();
    assert_eq!(lines.first().unwrap(), "[iter 0/5] checking constraints...");
    assert!(lines.last().unwrap().starts_with("[done] converged"));
}
