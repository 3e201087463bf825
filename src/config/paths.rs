use std::path::{Path, PathBuf};

use crate::error::Result;

/// Manages paths for daywall configuration
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration file path (~/.daywall/config.toml)
    pub config_file: PathBuf,
}

impl Paths {
    /// Create a new Paths instance using the user's home directory
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME")?;

        Ok(Self {
            config_file: PathBuf::from(home).join(".daywall").join("config.toml"),
        })
    }

    /// Use an explicit configuration file
    pub fn with_config_file(config_file: impl Into<PathBuf>) -> Self {
        Self {
            config_file: expand_home(&config_file.into()),
        }
    }

    /// Check if the config file exists
    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }
}

/// Per-user cache directory under the system temp dir
pub fn default_cache_dir() -> PathBuf {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .unwrap_or_else(|_| "default".to_string());

    std::env::temp_dir().join(format!("daywall-{user}"))
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(rest),
        Err(_) => path.to_path_buf(),
    }
}
