use chrono::{Local, TimeZone};
use colored::Colorize;

use crate::cache::CacheEntryStatus;
use crate::run::Outcome;

/// Local wall-clock time of a Unix timestamp
fn clock(ts: i64) -> String {
    Local
        .timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Format age in human-readable form
fn format_age(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Format the result of a run for pretty output
pub fn format_outcome(outcome: &Outcome) -> String {
    let mut output = String::new();

    let marker = if outcome.applied {
        "✓".green()
    } else {
        "○".yellow()
    };
    output.push_str(&format!(
        "{} {} {}\n",
        marker,
        outcome.period.as_str().bold(),
        outcome.image.display().to_string().dimmed()
    ));
    if !outcome.applied {
        output.push_str(&format!("  {}\n", "dry run, wallpaper not changed".yellow()));
    }

    let coords = format!(
        "{:.4}, {:.4}",
        outcome.coordinates.latitude, outcome.coordinates.longitude
    );
    match outcome.location.as_ref().and_then(|l| l.place()) {
        Some(place) => output.push_str(&format!("  {} {} ({})\n", "Location:".cyan(), place, coords)),
        None => output.push_str(&format!("  {} {}\n", "Location:".cyan(), coords)),
    }

    let sun = &outcome.sun;
    output.push_str(&format!(
        "  {} {}  {} {}  {} {}  {} {}\n",
        "Sunrise:".cyan(),
        clock(sun.sunrise),
        "Noon:".cyan(),
        clock(sun.solar_noon),
        "Late:".cyan(),
        clock(sun.late_afternoon),
        "Sunset:".cyan(),
        clock(sun.sunset),
    ));

    output.trim_end().to_string()
}

/// Format cache entries for pretty output
pub fn format_cache_status(dir: &str, entries: &[CacheEntryStatus]) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Cache Status".bold()));
    output.push_str(&format!("Location: {}\n", dir));

    for entry in entries {
        output.push_str(&format!("\n{}\n", format!("{} data:", entry.kind).dimmed()));
        if !entry.exists {
            output.push_str(&format!("  {}\n", "Not cached".dimmed()));
            continue;
        }

        match (entry.fetched_at, entry.age_secs) {
            (Some(fetched_at), Some(age)) => {
                let freshness = if entry.fresh {
                    "(today)".green()
                } else {
                    "(stale)".yellow()
                };
                output.push_str(&format!("  Fetched: {}\n", clock(fetched_at)));
                output.push_str(&format!("  Age: {} {}\n", format_age(age), freshness));
            }
            _ => output.push_str(&format!("  {}\n", "Unreadable".red())),
        }
    }

    output.trim_end().to_string()
}
