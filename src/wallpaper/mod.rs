//! Applying a period's image as the desktop background

mod command;

pub use command::ApplyCommand;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{DaywallError, Result};
use crate::solar::Period;

/// Something that can show the wallpaper for a period
pub trait Applicator {
    /// Apply the period's image and return its path
    fn apply(&self, period: Period) -> Result<PathBuf>;
}

/// `<folder>/<period>.jpg`
pub fn image_path(folder: &Path, period: Period) -> PathBuf {
    // Collecting components drops trailing separators
    let folder: PathBuf = folder.components().collect();
    folder.join(format!("{}.jpg", period.as_str()))
}

/// Image path for a period, failing if the file is missing
fn existing_image(folder: &Path, period: Period) -> Result<PathBuf> {
    let path = image_path(folder, period);
    if !path.is_file() {
        return Err(DaywallError::ImageMissing(path));
    }
    Ok(path)
}

/// Applies wallpapers by running an external command
#[derive(Debug, Clone)]
pub struct CommandApplicator {
    folder: PathBuf,
    command: ApplyCommand,
}

impl CommandApplicator {
    pub fn new(folder: impl Into<PathBuf>, command: ApplyCommand) -> Self {
        Self {
            folder: folder.into(),
            command,
        }
    }
}

impl Applicator for CommandApplicator {
    fn apply(&self, period: Period) -> Result<PathBuf> {
        let path = existing_image(&self.folder, period)?;
        self.command.run(&path)?;
        info!(%period, path = %path.display(), "wallpaper applied");
        Ok(path)
    }
}

/// Resolves image paths without changing the desktop
#[derive(Debug, Clone)]
pub struct DryRunApplicator {
    folder: PathBuf,
}

impl DryRunApplicator {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }
}

impl Applicator for DryRunApplicator {
    fn apply(&self, period: Period) -> Result<PathBuf> {
        let path = existing_image(&self.folder, period)?;
        debug!(%period, path = %path.display(), "dry run, not applying");
        Ok(path)
    }
}
