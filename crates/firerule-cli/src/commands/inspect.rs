//! Inspect command implementation.

use super::load_rules;
use crate::cli::RulesArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the inspect command.
pub fn execute_inspect(args: RulesArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let path = args.rules.unwrap_or_else(|| config.paths.output.clone());
    let rules = load_rules(&path)?;

    println!("{}", formatter.format_rules(&rules)?);

    Ok(())
}
