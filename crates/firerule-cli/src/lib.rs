//! Firerule CLI library.
//!
//! This library provides the core functionality for the `firerule` command-line
//! interface, including configuration loading, logging setup, command execution
//! and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `verbose`.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .try_init();
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        None => commands::execute_extract(Default::default(), &config, &formatter),
        Some(Command::Extract(args)) => commands::execute_extract(args, &config, &formatter),
        Some(Command::Filter(args)) => commands::execute_filter(args, &config, &formatter),
        Some(Command::Prompt(args)) => commands::execute_prompt(args, &config, &formatter),
        Some(Command::Inspect(args)) => commands::execute_inspect(args, &config, &formatter),
        Some(Command::Check(args)) => commands::execute_check(args, &config, &formatter),
    }
}
