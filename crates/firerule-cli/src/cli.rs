//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use firerule_domain::Parameter;
use std::path::PathBuf;

/// Firerule - Extract fire-protection rules from regulation text.
#[derive(Debug, Parser)]
#[command(name = "firerule")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FIRERULE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (minimal)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter, extract and persist rules (default)
    Extract(ExtractArgs),

    /// Print the filtered clause text without calling the model
    Filter(InputArgs),

    /// Print the prompt that would be sent to the model
    Prompt(InputArgs),

    /// Show a persisted rules file
    Inspect(RulesArgs),

    /// Check a measured value against persisted rules
    Check(CheckArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Default, Parser)]
pub struct ExtractArgs {
    /// Regulation text file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Destination rules file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for commands that only read regulation text.
#[derive(Debug, Parser)]
pub struct InputArgs {
    /// Regulation text file
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct RulesArgs {
    /// Rules file
    #[arg(short, long)]
    pub rules: Option<PathBuf>,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Parameter to check (Wall_Height, FireRating, Wall_Thickness, Distance)
    #[arg(short, long)]
    pub parameter: Parameter,

    /// Measured value
    #[arg(allow_negative_numbers = true)]
    pub value: f64,

    /// Building type the value was measured on
    #[arg(short, long, default_value = "")]
    pub building_type: String,

    /// Rules file
    #[arg(short, long)]
    pub rules: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
