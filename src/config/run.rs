//! Validated settings for one invocation

use std::path::PathBuf;

use super::paths::expand_home;
use super::settings::{Settings, DEFAULT_COMMAND};
use crate::error::{DaywallError, Result};
use crate::provider::Coordinates;
use crate::wallpaper::ApplyCommand;

/// Values given on the command line, taking precedence over the file
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub folder: Option<PathBuf>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub command: Option<String>,
    pub purge: bool,
    pub dry_run: bool,
}

/// Immutable configuration for a single run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub folder: PathBuf,
    /// `None` means geolocate by IP
    pub location: Option<Coordinates>,
    pub command: ApplyCommand,
    pub purge: bool,
    pub dry_run: bool,
}

impl RunConfig {
    /// Merge file settings with overrides and validate the result
    pub fn resolve(settings: &Settings, overrides: &RunOverrides) -> Result<Self> {
        let folder = overrides
            .folder
            .as_ref()
            .or(settings.wallpaper.folder.as_ref())
            .map(|folder| expand_home(folder))
            .ok_or_else(|| {
                DaywallError::config_missing(
                    "Wallpaper folder not configured. Pass --folder or set wallpaper.folder in the config file.",
                )
            })?;

        if !folder.is_dir() {
            return Err(DaywallError::Config(format!(
                "wallpaper folder {} is not a directory",
                folder.display()
            )));
        }

        let location = resolve_location(settings, overrides)?;

        let command_line = overrides
            .command
            .as_deref()
            .or(settings.wallpaper.command.as_deref())
            .unwrap_or(DEFAULT_COMMAND);
        let command = ApplyCommand::parse(command_line)?;

        Ok(Self {
            folder,
            location,
            command,
            purge: overrides.purge,
            dry_run: overrides.dry_run,
        })
    }
}

/// Both coordinates or neither; command-line pairs replace file pairs whole
fn resolve_location(settings: &Settings, overrides: &RunOverrides) -> Result<Option<Coordinates>> {
    let (latitude, longitude) = if overrides.latitude.is_some() || overrides.longitude.is_some() {
        (overrides.latitude, overrides.longitude)
    } else {
        (settings.location.latitude, settings.location.longitude)
    };

    match (latitude, longitude) {
        (Some(lat), Some(lon)) => Ok(Some(Coordinates::new(lat, lon)?)),
        (None, None) => Ok(None),
        _ => Err(DaywallError::Config(
            "latitude and longitude must be given together".into(),
        )),
    }
}
