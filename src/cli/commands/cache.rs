//! Cache management commands

use chrono::Local;
use colored::Colorize;

use crate::cache::{self, CacheKind, CacheStore};
use crate::cli::args::{CacheArgs, CacheCommands, OutputFormat};
use crate::error::Result;
use crate::output;
use crate::solar::DayWindow;

/// Handle cache commands
pub fn handle(store: &CacheStore, args: &CacheArgs, format: OutputFormat) -> Result<String> {
    match &args.command {
        CacheCommands::Status => status(store, format),
        CacheCommands::Clear => clear(store, format),
    }
}

fn status(store: &CacheStore, format: OutputFormat) -> Result<String> {
    let now = Local::now();
    let window = DayWindow::containing(now)?;

    let entries: Vec<_> = CacheKind::ALL
        .iter()
        .map(|kind| store.status(*kind, &window, now.timestamp()))
        .collect();

    output::format_cache_status(&store.dir().to_string_lossy(), &entries, format)
}

fn clear(store: &CacheStore, format: OutputFormat) -> Result<String> {
    cache::clear_all(store)?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} Cache cleared", "✓".green())),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "status": "cleared"
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}
