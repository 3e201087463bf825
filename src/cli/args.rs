use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::config::RunOverrides;

/// Sets a desktop wallpaper matching the current part of the solar day
#[derive(Parser)]
#[command(name = "daywall")]
#[command(version, propagate_version = true)]
#[command(about = "Sets a desktop wallpaper matching the current part of the solar day")]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Log cache and network decisions to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: ~/.daywall/config.toml)
    #[arg(long, global = true, env = "DAYWALL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for cached API responses
    #[arg(long, global = true, env = "DAYWALL_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable output
    #[default]
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Arguments for setting the wallpaper (the default action)
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Folder containing night.jpg, nautical_dawn.jpg, ... nautical_dusk.jpg
    #[arg(short, long)]
    pub folder: Option<PathBuf>,

    /// Latitude in decimal degrees (skips IP geolocation)
    #[arg(long = "lat", allow_negative_numbers = true, requires = "longitude")]
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long = "lon", allow_negative_numbers = true, requires = "latitude")]
    pub longitude: Option<f64>,

    /// Command that sets the wallpaper; the image path is appended
    #[arg(short, long)]
    pub command: Option<String>,

    /// Delete cached location and sun data before running
    #[arg(short, long)]
    pub purge: bool,

    /// Resolve the period and image without changing the wallpaper
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl RunArgs {
    pub fn overrides(&self) -> RunOverrides {
        RunOverrides {
            folder: self.folder.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            command: self.command.clone(),
            purge: self.purge,
            dry_run: self.dry_run,
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage local cache
    Cache(CacheArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the cache command
#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

/// Cache subcommands
#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show cached location and sun data
    Status,
    /// Delete cached location and sun data
    Clear,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl Cli {
    /// Write completions for `shell` to stdout
    pub fn print_completions(shell: Shell) {
        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_coordinates() {
        let cli = Cli::try_parse_from(["daywall", "--lat", "-33.87", "--lon", "151.21"]).unwrap();

        assert_eq!(cli.run.latitude, Some(-33.87));
        assert_eq!(cli.run.longitude, Some(151.21));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_latitude_requires_longitude() {
        assert!(Cli::try_parse_from(["daywall", "--lat", "52.5"]).is_err());
    }

    #[test]
    fn test_overrides_copy_flags() {
        let cli = Cli::try_parse_from(["daywall", "-f", "/walls", "-p", "-n", "-c", "swaybg -i"])
            .unwrap();
        let overrides = cli.run.overrides();

        assert_eq!(overrides.folder, Some(PathBuf::from("/walls")));
        assert!(overrides.purge);
        assert!(overrides.dry_run);
        assert_eq!(overrides.command.as_deref(), Some("swaybg -i"));
    }

    #[test]
    fn test_cache_subcommand() {
        let cli = Cli::try_parse_from(["daywall", "cache", "clear"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Cache(CacheArgs {
                command: CacheCommands::Clear
            }))
        ));
    }
}
