//! Normalize LLM output and parse it into a rule payload

use crate::error::ExtractorError;
use firerule_domain::{Rule, RuleSet};
use serde_json::Value;
use tracing::warn;

/// A parsed extraction response
///
/// `document` is the response exactly as parsed and is what gets persisted.
/// `rules` holds the entries that also deserialize as typed rules.
#[derive(Debug, Clone)]
pub struct RulePayload {
    /// Parsed response document
    pub document: Value,

    /// Entries that deserialize as rules
    pub rules: RuleSet,

    /// Number of entries in the `rules` array
    pub entry_count: usize,

    /// Entries that are malformed or fail rule validation
    pub invalid_entries: usize,
}

/// Strip code-fence markers and surrounding whitespace from a completion.
///
/// Every ```` ```json ```` and ```` ``` ```` marker is removed, wherever it
/// appears.
pub fn normalize_response(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse normalized response text into a rule payload
///
/// # Errors
///
/// Returns `ExtractorError::Schema` when the text is not JSON or the top
/// level is not an object holding a `rules` array. Individual entries that
/// do not look like rules are only logged.
pub fn parse_rule_payload(normalized: &str) -> Result<RulePayload, ExtractorError> {
    let document: Value = serde_json::from_str(normalized)
        .map_err(|e| ExtractorError::Schema(format!("response is not valid JSON: {}", e)))?;

    let entries = document
        .get("rules")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ExtractorError::Schema("expected a top-level object with a \"rules\" array".to_string())
        })?;

    let mut rules = Vec::with_capacity(entries.len());
    let mut invalid_entries = 0;

    for (idx, entry) in entries.iter().enumerate() {
        match serde_json::from_value::<Rule>(entry.clone()) {
            Ok(rule) => {
                if let Err(e) = rule.validate() {
                    warn!("Rule {} ({}) is incomplete: {}", idx, rule.clause, e);
                    invalid_entries += 1;
                }
                rules.push(rule);
            }
            Err(e) => {
                warn!("Entry {} is not a rule: {}", idx, e);
                invalid_entries += 1;
            }
        }
    }

    Ok(RulePayload {
        entry_count: entries.len(),
        rules: RuleSet::new(rules),
        invalid_entries,
        document,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use firerule_domain::Parameter;

    const PAYLOAD: &str = r#"{
        "rules": [
            {
                "clause": "GB50016-6.1.1",
                "parameter": "Wall_Height",
                "condition": "高层厂房:>=0.5",
                "unit": "m",
                "note": "当屋顶耐火极限<1h时生效"
            },
            {
                "clause": "GB50016-5.2.2",
                "parameter": "Distance",
                "condition": "民用建筑:>=6",
                "unit": "m"
            }
        ]
    }"#;

    #[test]
    fn test_normalize_plain_json() {
        assert_eq!(normalize_response("  {\"rules\": []}\n"), "{\"rules\": []}");
    }

    #[test]
    fn test_normalize_json_fence() {
        let response = "```json\n{\"rules\": []}\n```";
        assert_eq!(normalize_response(response), "{\"rules\": []}");
    }

    #[test]
    fn test_normalize_bare_fence() {
        let response = "```\n{\"rules\": []}\n```\n";
        assert_eq!(normalize_response(response), "{\"rules\": []}");
    }

    #[test]
    fn test_normalize_removes_inner_markers() {
        let response = "Here you go:\n```json\n{}\n```";
        assert_eq!(normalize_response(response), "Here you go:\n\n{}");
    }

    #[test]
    fn test_parse_valid_payload() {
        let payload = parse_rule_payload(PAYLOAD).unwrap();
        assert_eq!(payload.entry_count, 2);
        assert_eq!(payload.invalid_entries, 0);
        assert_eq!(payload.rules.len(), 2);
        assert_eq!(payload.rules.rules[0].parameter, Parameter::WallHeight);
        assert_eq!(payload.rules.rules[1].note, None);
    }

    #[test]
    fn test_parse_prose_is_schema_error() {
        let result = parse_rule_payload("抱歉，我无法解析这段文本。");
        assert!(matches!(result, Err(ExtractorError::Schema(_))));
    }

    #[test]
    fn test_parse_without_rules_array_is_schema_error() {
        for text in [r#"{"clause": "6.1.1"}"#, r#"[{"clause": "6.1.1"}]"#, r#"{"rules": {}}"#] {
            let result = parse_rule_payload(text);
            assert!(matches!(result, Err(ExtractorError::Schema(_))), "{}", text);
        }
    }

    #[test]
    fn test_parse_truncated_json_is_schema_error() {
        let truncated = &PAYLOAD[..PAYLOAD.len() / 2];
        assert!(matches!(parse_rule_payload(truncated), Err(ExtractorError::Schema(_))));
    }

    #[test]
    fn test_parse_keeps_unknown_parameters_and_counts_them() {
        let text = r#"{"rules": [
            {"clause": "5.5.17", "parameter": "Evacuation_Distance", "condition": "<=40", "unit": "m"},
            {"note": "no parameter at all"},
            "第6.1.1条"
        ]}"#;

        let payload = parse_rule_payload(text).unwrap();
        assert_eq!(payload.entry_count, 3);
        // The string entry is not a rule at all; the other two load but fail validation
        assert_eq!(payload.rules.len(), 2);
        assert_eq!(payload.invalid_entries, 3);
        // The document itself is untouched
        assert_eq!(payload.document["rules"][1]["note"], "no parameter at all");
    }

    #[test]
    fn test_parse_empty_rules() {
        let payload = parse_rule_payload(r#"{"rules": []}"#).unwrap();
        assert_eq!(payload.entry_count, 0);
        assert!(payload.rules.is_empty());
    }
}
