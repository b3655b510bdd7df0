//! Prompt command implementation.

use super::read_input;
use crate::cli::InputArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use firerule_extractor::{ClauseFilter, PromptBuilder};

/// Execute the prompt command.
///
/// Prints exactly what the extract command would send, without a credential
/// or network access.
pub fn execute_prompt(args: InputArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.paths.input.clone());
    let text = read_input(&input)?;

    let document = ClauseFilter::from_config(&config.filter).filter(&text);

    let prompt = PromptBuilder::new(document.text()).build();
    println!("{}", formatter.format_prompt(&prompt, &document)?);

    Ok(())
}
