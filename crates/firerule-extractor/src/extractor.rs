//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::filter::ClauseFilter;
use crate::parser::normalize_response;
use crate::persist::ResultPersister;
use crate::prompt::PromptBuilder;
use crate::types::{ExtractionMetadata, ExtractionReport, ExtractionRequest};
use firerule_domain::traits::LlmProvider;
use firerule_domain::FilteredDocument;
use std::fs;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// The Extractor turns regulation text into a persisted rule file
///
/// Stages run strictly in sequence: filter, one model call, persist.
/// Any stage failure ends the run.
pub struct Extractor<L: LlmProvider> {
    llm_provider: L,
    filter: ClauseFilter,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self {
            filter: ClauseFilter::from_config(&config),
            llm_provider,
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The underlying provider
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }

    /// Reduce raw regulation text to capped clause text
    pub fn filter(&self, raw_text: &str) -> FilteredDocument {
        self.filter.filter(raw_text)
    }

    /// The prompt that would be sent for `filtered_text`
    pub fn prompt_for(&self, filtered_text: &str) -> String {
        PromptBuilder::new(filtered_text).build()
    }

    /// Send filtered text to the model and return its normalized reply
    ///
    /// The reply is not validated here; that happens when it is persisted.
    pub fn extract(&self, filtered_text: &str) -> Result<String, ExtractorError> {
        let prompt = self.prompt_for(filtered_text);
        debug!("Prompt length: {} chars", prompt.chars().count());

        let raw = self
            .llm_provider
            .generate(&prompt)
            .map_err(|e| ExtractorError::Service(e.to_string()))?;
        debug!("LLM response length: {} chars", raw.chars().count());

        Ok(normalize_response(&raw))
    }

    /// Run the whole pipeline for one request
    pub fn run(&self, request: &ExtractionRequest) -> Result<ExtractionReport, ExtractorError> {
        let started = Instant::now();
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        info!(
            "Starting extraction from {} with model {}",
            request.input.display(),
            self.llm_provider.model_name()
        );

        let raw_text =
            fs::read_to_string(&request.input).map_err(|source| ExtractorError::InputIo {
                path: request.input.clone(),
                source,
            })?;

        let document = self.filter(&raw_text);
        info!(
            "Filtered {} clauses ({} chars)",
            document.len(),
            document.char_count()
        );

        let normalized = self.extract(document.text())?;
        let payload = ResultPersister::new(&request.output).persist(&normalized)?;

        let metadata = ExtractionMetadata {
            model_name: self.llm_provider.model_name().to_string(),
            timestamp,
            clauses_kept: document.len(),
            clauses_dropped: document.dropped_clauses(),
            chars_sent: document.char_count(),
            chars_truncated: document.truncated_chars(),
            processing_time_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            "Extraction complete: {} rules in {}ms",
            payload.entry_count, metadata.processing_time_ms
        );

        Ok(ExtractionReport {
            output: request.output.clone(),
            rules_written: payload.entry_count,
            invalid_rules: payload.invalid_entries,
            metadata,
        })
    }
}
