//! Helpers shared across CLI commands

use std::path::PathBuf;

use tracing::debug;

use crate::cache::CacheStore;
use crate::config::{Paths, Settings};
use crate::error::Result;

/// Load settings from `--config` or the default location
///
/// Without a home directory there is no default file, so built-in defaults apply.
pub fn load_settings(config_file: Option<&PathBuf>) -> Result<Settings> {
    let paths = match config_file {
        Some(file) => Paths::with_config_file(file),
        None => match Paths::new() {
            Ok(paths) => paths,
            Err(e) => {
                debug!(error = %e, "no default config file, using defaults");
                return Ok(Settings::default());
            }
        },
    };

    debug!(path = %paths.config_file.display(), exists = paths.config_exists(), "config file");
    Settings::load_from(&paths)
}

/// Cache store for the resolved cache directory
pub fn cache_store(settings: &Settings, cache_dir: Option<&PathBuf>) -> CacheStore {
    CacheStore::new(settings.cache_dir(cache_dir))
}
