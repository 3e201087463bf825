//! Diagnostic logging to stderr

use tracing_subscriber::EnvFilter;

/// Default filter for the chosen verbosity
pub fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "daywall=error"
    } else if verbose {
        "daywall=debug"
    } else {
        "daywall=warn"
    }
}

/// Install the global subscriber; `RUST_LOG` takes precedence over the flags
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
