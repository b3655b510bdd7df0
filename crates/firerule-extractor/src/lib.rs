//! Firerule Extractor
//!
//! Turns fire-protection regulation text into a JSON rule file.
//!
//! # Architecture
//!
//! ```text
//! regulations.txt → ClauseFilter → PromptBuilder → LLM → normalize → ResultPersister → firewall_rules.json
//! ```
//!
//! The filter keeps lines that look like regulation structure, merges
//! sub-clause continuation lines into their parent and caps the result.
//! One prompt is sent per run. The reply has code fences stripped, must be
//! a JSON object holding a `rules` array, and is written verbatim (pretty
//! printed, UTF-8) to the destination.
//!
//! # Example Usage
//!
//! ```no_run
//! use firerule_extractor::{Extractor, ExtractorConfig, ExtractionRequest};
//! use firerule_llm::MockProvider;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"rules": []}"#);
//! let extractor = Extractor::new(llm, ExtractorConfig::default());
//!
//! let report = extractor.run(&ExtractionRequest::new("regulations.txt", "firewall_rules.json"))?;
//! println!("Wrote {} rules to {}", report.rules_written, report.output.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod filter;
mod parser;
mod persist;
mod prompt;
mod types;


pub use config::{ExtractorConfig, DEFAULT_MAX_CHARS, DEFAULT_MAX_CLAUSES};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use filter::{is_clause_line, is_continuation, ClauseFilter};
pub use parser::{normalize_response, parse_rule_payload, RulePayload};
pub use persist::{ResultPersister, DEFAULT_OUTPUT_PATH};
pub use prompt::{PromptBuilder, WorkedExample, EXAMPLE_CLAUSE};
pub use types::{ExtractionMetadata, ExtractionReport, ExtractionRequest, DEFAULT_INPUT_PATH};
