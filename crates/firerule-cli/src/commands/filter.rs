//! Filter command implementation.

use super::read_input;
use crate::cli::InputArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use firerule_extractor::ClauseFilter;

/// Execute the filter command.
pub fn execute_filter(args: InputArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.paths.input.clone());
    let text = read_input(&input)?;

    let document = ClauseFilter::from_config(&config.filter).filter(&text);

    println!("{}", formatter.format_filtered(&document)?);

    Ok(())
}
