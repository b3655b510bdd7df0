//! Clause module - recognized regulation lines and the capped document built from them

/// A single logical line of regulation text
///
/// A clause is either one source line or a source line with one or more
/// continuation lines appended to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    text: String,
    order: usize,
}

impl Clause {
    /// Create a clause at the given position in the filtered sequence
    pub fn new(text: impl Into<String>, order: usize) -> Self {
        Self {
            text: text.into(),
            order,
        }
    }

    /// Clause text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Zero-based position in the filtered sequence
    pub fn order(&self) -> usize {
        self.order
    }

    /// Append a continuation line to this clause.
    ///
    /// The continuation is concatenated without a separator.
    pub fn append(&mut self, continuation: &str) {
        self.text.push_str(continuation);
    }
}

/// The ordered, length-capped clause sequence produced by preprocessing
///
/// Invariants, enforced at construction:
/// - at most `max_clauses` clauses are retained
/// - the serialized text (clauses joined by `\n`) holds at most `max_chars`
///   characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredDocument {
    clauses: Vec<Clause>,
    text: String,
    dropped_clauses: usize,
    truncated_chars: usize,
}

impl FilteredDocument {
    /// Build a document from accumulated clauses, applying both caps.
    ///
    /// Clauses past `max_clauses` are dropped, then the joined text is cut
    /// at `max_chars` characters (not bytes).
    ///
    /// # Examples
    ///
    /// ```
    /// use firerule_domain::{Clause, FilteredDocument};
    ///
    /// let clauses = vec![Clause::new("第1条", 0), Clause::new("第2条", 1)];
    /// let doc = FilteredDocument::from_clauses(clauses, 1, 3000);
    /// assert_eq!(doc.text(), "第1条");
    /// assert_eq!(doc.dropped_clauses(), 1);
    /// ```
    pub fn from_clauses(mut clauses: Vec<Clause>, max_clauses: usize, max_chars: usize) -> Self {
        let dropped_clauses = clauses.len().saturating_sub(max_clauses);
        clauses.truncate(max_clauses);

        let mut text = clauses
            .iter()
            .map(Clause::text)
            .collect::<Vec<_>>()
            .join("\n");

        let total_chars = text.chars().count();
        let truncated_chars = total_chars.saturating_sub(max_chars);
        if let Some((cut, _)) = text.char_indices().nth(max_chars) {
            text.truncate(cut);
        }

        Self {
            clauses,
            text,
            dropped_clauses,
            truncated_chars,
        }
    }

    /// Retained clauses, in source order
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Serialized, character-capped text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of retained clauses
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// True when no line of the input was recognized
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Number of characters in the serialized text
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Clauses discarded by the clause cap
    pub fn dropped_clauses(&self) -> usize {
        self.dropped_clauses
    }

    /// Characters discarded by the character cap
    pub fn truncated_chars(&self) -> usize {
        self.truncated_chars
    }

    /// Whether either cap discarded content
    pub fn is_truncated(&self) -> bool {
        self.dropped_clauses > 0 || self.truncated_chars > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Vec<Clause> {
        (0..count)
            .map(|i| Clause::new(format!("第{}条", i + 1), i))
            .collect()
    }

    #[test]
    fn test_clause_append() {
        let mut clause = Clause::new("防火墙应", 0);
        clause.append("6.1.2 高出屋面0.5m");
        assert_eq!(clause.text(), "防火墙应6.1.2 高出屋面0.5m");
        assert_eq!(clause.order(), 0);
    }

    #[test]
    fn test_document_within_caps() {
        let doc = FilteredDocument::from_clauses(numbered(3), 30, 3000);
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.text(), "第1条\n第2条\n第3条");
        assert!(!doc.is_truncated());
    }

    #[test]
    fn test_document_drops_excess_clauses() {
        let doc = FilteredDocument::from_clauses(numbered(45), 30, 3000);
        assert_eq!(doc.len(), 30);
        assert_eq!(doc.dropped_clauses(), 15);
        assert_eq!(doc.clauses().last().unwrap().text(), "第30条");
        assert!(doc.is_truncated());
    }

    #[test]
    fn test_document_truncates_on_char_boundary() {
        let clauses = vec![Clause::new("耐火极限".repeat(1000), 0)];
        let doc = FilteredDocument::from_clauses(clauses, 30, 3000);
        assert_eq!(doc.char_count(), 3000);
        assert_eq!(doc.truncated_chars(), 1000);
        // Still valid UTF-8 made of whole characters
        assert!(doc.text().chars().all(|c| "耐火极限".contains(c)));
    }

    #[test]
    fn test_empty_document() {
        let doc = FilteredDocument::from_clauses(Vec::new(), 30, 3000);
        assert!(doc.is_empty());
        assert_eq!(doc.text(), "");
        assert!(!doc.is_truncated());
    }
}
