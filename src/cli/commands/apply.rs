//! Default action: resolve the period and set the wallpaper

use chrono::Local;

use crate::cache::CacheStore;
use crate::cli::args::{OutputFormat, RunArgs};
use crate::config::{RunConfig, Settings};
use crate::error::Result;
use crate::output;
use crate::provider::ApiClient;
use crate::run::Orchestrator;
use crate::wallpaper::{CommandApplicator, DryRunApplicator};

/// Handle the default action
pub fn apply(
    settings: &Settings,
    store: &CacheStore,
    args: &RunArgs,
    format: OutputFormat,
) -> Result<String> {
    // Everything that can fail locally fails before the first request
    let config = RunConfig::resolve(settings, &args.overrides())?;
    if !config.dry_run {
        config.command.ensure_available()?;
    }

    let client = ApiClient::new(&settings.api)?;
    let now = Local::now();

    let outcome = if config.dry_run {
        let wallpaper = DryRunApplicator::new(&config.folder);
        Orchestrator::new(&config, store, &client, &wallpaper).run(now)?
    } else {
        let wallpaper = CommandApplicator::new(&config.folder, config.command.clone());
        Orchestrator::new(&config, store, &client, &wallpaper).run(now)?
    };

    output::format_outcome(&outcome, format)
}
