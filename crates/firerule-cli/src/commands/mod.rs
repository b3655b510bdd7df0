//! Command implementations.

pub mod check;
pub mod extract;
pub mod filter;
pub mod inspect;
pub mod prompt;

pub use self::check::execute_check;
pub use self::extract::execute_extract;
pub use self::filter::execute_filter;
pub use self::inspect::execute_inspect;
pub use self::prompt::execute_prompt;

use crate::error::Result;
use firerule_domain::RuleSet;
use firerule_extractor::{parse_rule_payload, ExtractorError};
use std::fs;
use std::path::Path;

/// Read a regulation text file.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| {
        ExtractorError::InputIo {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Load a persisted rules file.
///
/// Uses the same lenient reading as extraction: entries that are not rules
/// are skipped with a warning instead of failing the whole file.
pub(crate) fn load_rules(path: &Path) -> Result<RuleSet> {
    let contents = read_input(path)?;
    Ok(parse_rule_payload(&contents)?.rules)
}
