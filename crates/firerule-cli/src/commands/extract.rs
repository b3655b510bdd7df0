//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use firerule_extractor::{ExtractionRequest, Extractor};
use firerule_llm::DeepSeekProvider;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let request = ExtractionRequest::new(
        args.input.unwrap_or_else(|| config.paths.input.clone()),
        args.output.unwrap_or_else(|| config.paths.output.clone()),
    );

    let provider = DeepSeekProvider::new(config.provider_config())?;
    let extractor = Extractor::new(provider, config.filter.clone());

    let report = extractor.run(&request)?;

    println!("{}", formatter.extraction_result(&report));

    Ok(())
}
