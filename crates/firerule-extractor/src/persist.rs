//! Persist validated rule payloads to disk

use crate::error::ExtractorError;
use crate::parser::{parse_rule_payload, RulePayload};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Default destination for extracted rules
pub const DEFAULT_OUTPUT_PATH: &str = "firewall_rules.json";

/// Writes normalized extraction output to a destination file
///
/// Output is pretty-printed with two-space indentation and keeps non-ASCII
/// characters literal. The payload is parsed before anything is written, and
/// the file is replaced atomically, so a rejected payload or a failed write
/// leaves an existing destination untouched.
#[derive(Debug, Clone)]
pub struct ResultPersister {
    destination: PathBuf,
}

impl ResultPersister {
    /// Create a persister for `destination`
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Destination path
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Parse `normalized` and write it to the destination
    ///
    /// # Errors
    ///
    /// `ExtractorError::Schema` when the text is not a rule payload,
    /// `ExtractorError::OutputIo` when the destination cannot be written.
    pub fn persist(&self, normalized: &str) -> Result<RulePayload, ExtractorError> {
        let payload = parse_rule_payload(normalized)?;
        self.write(&payload)?;
        Ok(payload)
    }

    /// Write an already parsed payload
    pub fn write(&self, payload: &RulePayload) -> Result<(), ExtractorError> {
        let mut rendered = serde_json::to_string_pretty(&payload.document)?;
        rendered.push('\n');

        let dir = match self.destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.output_error(e))?;
        tmp.write_all(rendered.as_bytes())
            .map_err(|e| self.output_error(e))?;
        debug!(temp = %tmp.path().display(), "Wrote rules to temporary file");

        tmp.persist(&self.destination)
            .map_err(|e| self.output_error(e.error))?;

        info!(
            "Wrote {} rules to {}",
            payload.entry_count,
            self.destination.display()
        );
        Ok(())
    }

    fn output_error(&self, source: std::io::Error) -> ExtractorError {
        ExtractorError::OutputIo {
            path: self.destination.clone(),
            source,
        }
    }
}

impl Default for ResultPersister {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PAYLOAD: &str = r#"{"rules": [{"clause": "GB50016-6.1.1", "parameter": "Wall_Height", "condition": "高层厂房:>=0.5", "unit": "m", "note": "当屋顶耐火极限<1h时生效"}]}"#;

    #[test]
    fn test_writes_pretty_utf8() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("rules.json");

        let payload = ResultPersister::new(&dest).persist(PAYLOAD).unwrap();
        assert_eq!(payload.entry_count, 1);

        let written = fs::read_to_string(&dest).unwrap();
        assert!(written.starts_with("{\n  \"rules\": [\n    {\n"));
        assert!(written.contains("\"condition\": \"高层厂房:>=0.5\""));
        assert!(!written.contains("\\u"));
    }

    #[test]
    fn test_preserves_key_order() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("rules.json");

        ResultPersister::new(&dest).persist(PAYLOAD).unwrap();
        let written = fs::read_to_string(&dest).unwrap();

        let positions: Vec<usize> = ["\"clause\"", "\"parameter\"", "\"condition\"", "\"unit\"", "\"note\""]
            .iter()
            .map(|k| written.find(k).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rejected_payload_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("rules.json");
        fs::write(&dest, "previous").unwrap();

        let result = ResultPersister::new(&dest).persist("not json");
        assert!(matches!(result, Err(ExtractorError::Schema(_))));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "previous");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("rules.json");
        fs::write(&dest, "previous").unwrap();

        ResultPersister::new(&dest).persist(r#"{"rules": []}"#).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&dest).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"rules": []}));
    }

    #[test]
    fn test_missing_directory_is_output_error() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("missing").join("rules.json");

        let result = ResultPersister::new(&dest).persist(PAYLOAD);
        match result {
            Err(ExtractorError::OutputIo { path, .. }) => assert_eq!(path, dest),
            other => panic!("expected OutputIo, got {:?}", other),
        }
        assert!(!dest.exists());
    }

    #[test]
    fn test_default_destination() {
        assert_eq!(
            ResultPersister::default().destination(),
            Path::new("firewall_rules.json")
        );
    }
}
