// src/cli/settings.rs — `refiner config`: show the effective configuration

use crate::infra::config::Config;
use crate::infra::paths;

pub fn show_config(
    config: &Config,
    path_only: bool,
    explicit: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let path = explicit
        .map(|p| p.to_path_buf())
        .unwrap_or_else(paths::config_file_path);
    if path_only {
        println!("{}", path.display());
        return Ok(());
    }
    if !path.exists() {
        eprintln!("# {} not found, showing defaults", path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
