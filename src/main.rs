use clap::Parser;
use colored::{control::set_override, Colorize};
use is_terminal::IsTerminal;

use daywall::cli::args::{Cli, Commands, CompletionsArgs};
use daywall::cli::commands;
use daywall::error::DaywallError;
use daywall::logging;

fn main() {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    // Also disable colors when stdout is not a terminal (for piping)
    if std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        set_override(false);
    }

    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), DaywallError> {
    let format = cli.output;

    // Handle completions command early (no config needed)
    if let Some(Commands::Completions(CompletionsArgs { shell })) = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    let settings = commands::load_settings(cli.config.as_ref())?;
    let store = commands::cache_store(&settings, cli.cache_dir.as_ref());

    let output = match &cli.command {
        Some(Commands::Cache(args)) => commands::cache::handle(&store, args, format)?,
        Some(Commands::Completions(_)) => unreachable!(), // Handled above
        None => commands::apply(&settings, &store, &cli.run, format)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
