//! Apishape CLI - Command-line interface for reshaping nested results
//!
//! This is the main entry point for the Apishape CLI application. It loads
//! configuration, sets up logging and dispatches to the command handlers.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LogSettings};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    let config = Config::load_with_file(cli.config.as_deref());

    let use_color = cli.use_color()
        && config.as_ref().map(|c| c.output.color).unwrap_or(true);
    control::set_override(use_color);

    // Initialize logging; the guard flushes file output on drop
    let guard = match init_logging(&cli, config.as_ref().ok()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let result = config.and_then(|config| run(cli, &config, use_color));

    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("{}", error::format_error(&e, use_color));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            e.exit_code()
        }
    };

    drop(guard);
    process::exit(code);
}

/// Main application logic
#[instrument(skip_all, fields(command = ?cli.command))]
fn run(cli: Cli, config: &Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(cli.output, use_color, cli.quiet, cli.verbosity_level());

    tracing::info!(
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Transform(args) => handlers::handle_transform(args, config, &mut output),
        Commands::Config(args) => {
            handlers::handle_config(args, config, cli.config.as_deref(), &mut output)
        }
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: Option<&Config>) -> Result<Option<WorkerGuard>> {
    let verbosity = cli.verbosity_level();
    let mut settings = LogSettings::from_verbosity(verbosity);

    if let Some(config) = config {
        settings.merge_with_config(&config.logging, verbosity);
    }

    // Apply environment overrides
    settings.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        settings.level = "error".to_string();
        settings.console = false;
    }

    logging::init_logging(settings)
}
