//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use firerule_domain::{FilteredDocument, Parameter, Rule, RuleSet};
use firerule_extractor::ExtractionReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a rule set.
    pub fn format_rules(&self, rules: &RuleSet) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rules)?),
            OutputFormat::Table => Ok(self.format_rules_table(rules.iter())),
            OutputFormat::Quiet => Ok(rules
                .iter()
                .map(|r| r.clause.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_rules_table<'a>(&self, rules: impl Iterator<Item = &'a Rule>) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Clause", "Parameter", "Building Type", "Requirement", "Unit", "Note"]);

        let mut count = 0;
        for rule in rules {
            let condition = rule.parsed_condition();
            builder.push_record([
                rule.clause.as_str(),
                rule.parameter.as_str(),
                condition.building_type().unwrap_or("-"),
                condition.comparison(),
                rule.unit.as_str(),
                rule.note.as_deref().unwrap_or(""),
            ]);
            count += 1;
        }

        if count == 0 {
            return self.colorize("No rules found.", "yellow");
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format filtered clause text.
    pub fn format_filtered(&self, document: &FilteredDocument) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let clauses: Vec<&str> = document.clauses().iter().map(|c| c.text()).collect();
                let value = serde_json::json!({
                    "clauses": clauses,
                    "text": document.text(),
                    "chars": document.char_count(),
                    "dropped_clauses": document.dropped_clauses(),
                    "truncated_chars": document.truncated_chars(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table | OutputFormat::Quiet => Ok(document.text().to_string()),
        }
    }

    /// Format the prompt built from a filtered document.
    pub fn format_prompt(&self, prompt: &str, document: &FilteredDocument) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "prompt": prompt,
                    "clauses": document.clauses().len(),
                    "chars": document.char_count(),
                    "truncated_chars": document.truncated_chars(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table | OutputFormat::Quiet => Ok(prompt.to_string()),
        }
    }

    /// Format the outcome of a check.
    pub fn format_check(
        &self,
        parameter: &Parameter,
        value: f64,
        applicable: &[&Rule],
        violations: &[&Rule],
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "parameter": parameter,
                    "value": value,
                    "applicable": applicable.len(),
                    "violations": violations,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Quiet => Ok(violations
                .iter()
                .map(|r| r.clause.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if applicable.is_empty() {
                    return Ok(self.warning(&format!("No rules apply to {}", parameter)));
                }
                if violations.is_empty() {
                    return Ok(self.success(&format!(
                        "{} = {} satisfies {} rule(s)",
                        parameter,
                        value,
                        applicable.len()
                    )));
                }
                Ok(format!(
                    "{}\n{}",
                    self.error(&format!(
                        "{} = {} violates {} of {} rule(s)",
                        parameter,
                        value,
                        violations.len(),
                        applicable.len()
                    )),
                    self.format_rules_table(violations.iter().copied())
                ))
            }
        }
    }

    /// Format the result of an extraction run.
    pub fn extraction_result(&self, report: &ExtractionReport) -> String {
        match self.format {
            OutputFormat::Quiet => report.output.display().to_string(),
            OutputFormat::Json => serde_json::json!({
                "output": report.output.display().to_string(),
                "rules": report.rules_written,
                "invalid_rules": report.invalid_rules,
                "model": report.metadata.model_name,
                "clauses": report.metadata.clauses_kept,
                "processing_time_ms": report.metadata.processing_time_ms,
            })
            .to_string(),
            OutputFormat::Table => {
                let mut message = self.success(&format!(
                    "Wrote {} rule(s) to {}",
                    report.rules_written,
                    report.output.display()
                ));
                if report.invalid_rules > 0 {
                    message.push('\n');
                    message.push_str(&self.warning(&format!(
                        "{} rule(s) are incomplete; check the file before use",
                        report.invalid_rules
                    )));
                }
                message
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
