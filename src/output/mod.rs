pub mod json;
pub mod pretty;

use crate::cache::CacheEntryStatus;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::run::Outcome;

/// Format the result of a run based on output format
pub fn format_outcome(outcome: &Outcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_outcome(outcome)),
        OutputFormat::Json => json::format_outcome(outcome),
    }
}

/// Format cache entries based on output format
pub fn format_cache_status(
    dir: &str,
    entries: &[CacheEntryStatus],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_cache_status(dir, entries)),
        OutputFormat::Json => json::format_cache_status(dir, entries),
    }
}
