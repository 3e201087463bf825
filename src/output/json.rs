use serde::Serialize;

use crate::cache::CacheEntryStatus;
use crate::error::Result;
use crate::run::Outcome;

/// Format the result of a run as JSON
pub fn format_outcome(outcome: &Outcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

/// Format cache entries as JSON
pub fn format_cache_status(dir: &str, entries: &[CacheEntryStatus]) -> Result<String> {
    format_json(&serde_json::json!({
        "cache_dir": dir,
        "entries": entries,
    }))
}

/// Format any serializable value as JSON
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
