//! Configuration module for searchdsl-rs
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_VAR: &str = "SEARCHDSL_SETTINGS_PATH";

/// Default locations searched for a settings file, in order
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("searchdsl-rs/settings.yml"));
    }
    paths
}

/// Pick the settings file: `explicit` always wins, then `from_env` if it
/// exists, then the first existing entry of `defaults`.
pub fn resolve_path(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    defaults: &[PathBuf],
) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => from_env
            .filter(|p| p.exists())
            .or_else(|| defaults.iter().find(|p| p.exists()).cloned()),
    }
}

/// Read the chosen settings file, or fall back to defaults
pub fn load_from(path: Option<PathBuf>) -> Result<Settings> {
    match path {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)
        }
        None => {
            info!("No settings file found, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Load settings from `explicit`, else `SEARCHDSL_SETTINGS_PATH`, else the
/// first default path that exists, else defaults. Environment overrides are
/// applied last.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let from_env = std::env::var(SETTINGS_PATH_VAR).ok().map(PathBuf::from);
    let mut settings = load_from(resolve_path(explicit, from_env, &default_paths()))?;
    settings.merge_env();
    Ok(settings)
}
