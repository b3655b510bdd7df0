//! Clause filtering: reduce raw regulation text to clause-like lines

use crate::config::ExtractorConfig;
use firerule_domain::{Clause, FilteredDocument};
use regex::{Regex, RegexSet};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Patterns that mark a line as regulation structure.
///
/// In order: clause numbering (`第6.1.1条`), building and fire-safety
/// keywords, standard identifiers (`GB50016-2014`), and measurements with a
/// metre or hour unit (`0.5m`, `3.00h`).
static CLAUSE_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"第[\d.]+条",
        r"高层厂房|仓库|民用建筑|工业建筑|防火墙|耐火极限",
        r"\bGB\d+[-.]\d+",
        r"\d+\.?\d*\s*[mh]",
    ])
    .unwrap()
});

/// Sub-clause numbering at line start (`6.1`, `6.1.2`)
static CONTINUATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\d+").unwrap());

/// Whether a trimmed line looks like regulation structure
pub fn is_clause_line(line: &str) -> bool {
    CLAUSE_PATTERNS.is_match(line)
}

/// Whether a trimmed line starts with sub-clause numbering
pub fn is_continuation(line: &str) -> bool {
    CONTINUATION_RE.is_match(line)
}

/// Selects and merges clause-like lines from raw text
#[derive(Debug, Clone)]
pub struct ClauseFilter {
    max_clauses: usize,
    max_chars: usize,
}

impl ClauseFilter {
    /// Create a filter with explicit caps
    pub fn new(max_clauses: usize, max_chars: usize) -> Self {
        Self {
            max_clauses,
            max_chars,
        }
    }

    /// Create a filter from extractor configuration
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(config.max_clauses, config.max_chars)
    }

    /// Filter raw text into a capped document.
    ///
    /// Every kept line that starts with sub-clause numbering is appended to
    /// the previous clause, if there is one. Caps apply only after the whole
    /// input has been scanned, so a continuation can still extend the last
    /// retained clause.
    pub fn filter(&self, raw_text: &str) -> FilteredDocument {
        let mut clauses: Vec<Clause> = Vec::new();
        let mut merged = 0usize;

        for line in raw_text.split('\n') {
            let line = line.trim();
            if !is_clause_line(line) {
                continue;
            }

            match clauses.last_mut() {
                Some(previous) if is_continuation(line) => {
                    previous.append(line);
                    merged += 1;
                }
                _ => {
                    let order = clauses.len();
                    clauses.push(Clause::new(line, order));
                }
            }
        }

        debug!(
            clauses = clauses.len(),
            merged_lines = merged,
            "Scanned input for clause lines"
        );

        let document = FilteredDocument::from_clauses(clauses, self.max_clauses, self.max_chars);

        if document.dropped_clauses() > 0 {
            warn!(
                dropped = document.dropped_clauses(),
                kept = document.len(),
                "Clause cap reached; later clauses were dropped"
            );
        }
        if document.truncated_chars() > 0 {
            warn!(
                truncated = document.truncated_chars(),
                limit = self.max_chars,
                "Character cap reached; filtered text was cut"
            );
        }

        document
    }
}

impl Default for ClauseFilter {
    fn default() -> Self {
        Self::from_config(&ExtractorConfig::default())
    }
}
