use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{DaywallError, Result};

/// External program that sets the background, plus its leading arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyCommand {
    program: String,
    args: Vec<String>,
}

impl ApplyCommand {
    /// Split a command line on whitespace, e.g. `"feh --bg-fill"`
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| DaywallError::InvalidArgument("wallpaper command is empty".into()))?;

        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Locate the program, either as a path or on `PATH`
    pub fn locate(&self) -> Option<PathBuf> {
        let program = Path::new(&self.program);
        if program.components().count() > 1 {
            return program.is_file().then(|| program.to_path_buf());
        }

        let path = std::env::var_os("PATH")?;
        std::env::split_paths(&path)
            .map(|dir| dir.join(program))
            .find(|candidate| candidate.is_file())
    }

    /// Fail unless the program can be found
    pub fn ensure_available(&self) -> Result<()> {
        match self.locate() {
            Some(found) => {
                debug!(program = %found.display(), "wallpaper command found");
                Ok(())
            }
            None => Err(DaywallError::Environment(format!(
                "wallpaper command '{}' not found",
                self.program
            ))),
        }
    }

    /// Run the command with `image` as the final argument
    pub fn run(&self, image: &Path) -> Result<()> {
        debug!(command = %self, image = %image.display(), "running wallpaper command");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(image)
            .status()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => DaywallError::Environment(format!(
                    "wallpaper command '{}' not found",
                    self.program
                )),
                _ => DaywallError::Io(e),
            })?;

        if !status.success() {
            return Err(DaywallError::ApplyFailed {
                command: self.to_string(),
                status: status.to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for ApplyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
