// src/infra/paths.rs — Config path resolution
//
// REFINER_HOME overrides the config directory. When unset, config lives in
// ~/.refiner/.

use std::path::PathBuf;

/// Returns the REFINER_HOME override, if set.
fn refiner_home() -> Option<PathBuf> {
    std::env::var_os("REFINER_HOME").map(PathBuf::from)
}

/// Home directory, if the platform can report one.
pub fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

/// Configuration directory: $REFINER_HOME/ or ~/.refiner/ (./.refiner without a home)
pub fn config_dir() -> PathBuf {
    if let Some(home) = refiner_home() {
        return home;
    }
    dirs_home()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".refiner")
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
