// src/main.rs — refiner entry point

use clap::Parser;

use refiner::cli::{Cli, Commands};
use refiner::infra::config::Config;
use refiner::infra::logger;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(path)?
    } else {
        Config::load()?
    };

    // Initialize logging (respects RUST_LOG)
    logger::init_logging(cli.log_level.as_deref().unwrap_or(&config.logging.level));

    match cli.command {
        Commands::Check(ref args) => refiner::cli::check::run_check(args, &config),
        Commands::Batch {
            files,
            max_iterations,
        } => refiner::cli::batch::run_batch(files, max_iterations, &config).await,
        Commands::Config { path } => {
            refiner::cli::settings::show_config(&config, path, cli.config.as_deref())
        }
    }
}
