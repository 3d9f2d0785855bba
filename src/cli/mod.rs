// src/cli/mod.rs — CLI definition (clap derive)

pub mod approval;
pub mod batch;
pub mod check;
pub mod export;
pub mod progress;
pub mod settings;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "refiner",
    about = "Check a portfolio against allocation constraints and rebalance until it complies",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter (overrides config; RUST_LOG still wins)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refine one portfolio and report the result
    Check(CheckArgs),
    /// Refine several portfolio files concurrently and print a summary per file
    Batch {
        /// Portfolio JSON files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Max adjustments per portfolio
        #[arg(short = 'i', long)]
        max_iterations: Option<u32>,
    },
    /// Show the effective configuration
    Config {
        /// Print only the config file location
        #[arg(long)]
        path: bool,
    },
}

#[derive(Args, Clone, Debug)]
pub struct CheckArgs {
    /// Portfolio as JSON, e.g. '{"AAPL": 0.35, "CASH": 0.65}'
    #[arg(conflicts_with = "file", required_unless_present = "file")]
    pub portfolio: Option<String>,

    /// Read the portfolio JSON from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Max adjustments before giving up
    #[arg(short = 'i', long)]
    pub max_iterations: Option<u32>,

    /// Largest weight allowed for a single non-cash position (0.0-1.0)
    #[arg(long)]
    pub max_position: Option<f64>,

    /// Smallest cash weight allowed (0.0-1.0)
    #[arg(long)]
    pub min_cash: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output (only emit final result)
    #[arg(long)]
    pub quiet: bool,

    /// Ask for confirmation before each adjustment is applied
    #[arg(long)]
    pub approve: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_inline() {
        let cli = Cli::try_parse_from(["refiner", "check", r#"{"AAPL":1.0}"#, "-i", "3"]).unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.portfolio.as_deref(), Some(r#"{"AAPL":1.0}"#));
                assert_eq!(args.max_iterations, Some(3));
                assert_eq!(args.format, OutputFormat::Text);
                assert!(!args.approve);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_parse_check_file_and_format() {
        let cli = Cli::try_parse_from([
            "refiner", "check", "--file", "p.json", "--format", "yaml", "--quiet",
        ])
        .unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.file, Some(PathBuf::from("p.json")));
                assert_eq!(args.format, OutputFormat::Yaml);
                assert!(args.quiet);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_check_requires_input() {
        assert!(Cli::try_parse_from(["refiner", "check"]).is_err());
    }

    #[test]
    fn test_check_rejects_both_inputs() {
        assert!(Cli::try_parse_from(["refiner", "check", "{}", "--file", "p.json"]).is_err());
    }

    #[test]
    fn test_parse_batch_with_global_config() {
        let cli = Cli::try_parse_from([
            "refiner", "batch", "a.json", "b.json", "--config", "c.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        match cli.command {
            Commands::Batch { files, .. } => assert_eq!(files.len(), 2),
            _ => panic!("expected batch"),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
