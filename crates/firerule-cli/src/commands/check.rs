//! Check command implementation.

use super::load_rules;
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use firerule_domain::Rule;

/// Execute the check command.
///
/// Fails with `CliError::Violations` when any applicable rule is not met.
pub fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if !args.value.is_finite() {
        return Err(CliError::InvalidInput(format!(
            "value must be a finite number, got {}",
            args.value
        )));
    }

    let path = args.rules.unwrap_or_else(|| config.paths.output.clone());
    let rules = load_rules(&path)?;

    let applicable: Vec<&Rule> = rules
        .applicable(&args.parameter, &args.building_type)
        .collect();
    let violations: Vec<&Rule> = rules
        .violations(&args.parameter, &args.building_type, args.value)
        .collect();

    println!(
        "{}",
        formatter.format_check(&args.parameter, args.value, &applicable, &violations)?
    );

    if violations.is_empty() {
        Ok(())
    } else {
        Err(CliError::Violations(violations.len()))
    }
}
