//! Labeled corpus files
//!
//! Users grow their training data by labeling texts. Examples are stored one
//! JSON object per line so appends never rewrite the file.

use super::{Label, LabeledExample};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// On-disk form of a labeled example
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub text: String,
    pub label: Label,
    /// When the label was recorded (absent in hand-written files)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl From<CorpusRecord> for LabeledExample {
    fn from(record: CorpusRecord) -> Self {
        LabeledExample::new(record.text, record.label)
    }
}

/// Parse JSONL content. Blank lines are skipped; malformed lines are skipped
/// with a warning so one bad edit does not lose the whole corpus.
pub fn parse_jsonl(content: &str, origin: &str) -> Vec<LabeledExample> {
    let mut examples = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<CorpusRecord>(line) {
            Ok(record) => examples.push(record.into()),
            Err(e) => tracing::warn!("{}:{}: skipping malformed example: {}", origin, lineno + 1, e),
        }
    }
    examples
}

/// Append-only labeled corpus
pub struct CorpusFile {
    path: PathBuf,
}

impl CorpusFile {
    /// Default location: `<data_dir>/veracity/corpus.jsonl`
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("veracity")
            .join("corpus.jsonl")
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one labeled text
    pub fn append(&self, text: &str, label: Label) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let record = CorpusRecord {
            text: text.to_string(),
            label,
            recorded_at: Some(Utc::now()),
        };
        let json = serde_json::to_string(&record)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }

    /// Load every example; a missing file is an empty corpus
    pub fn load_all(&self) -> std::io::Result<Vec<LabeledExample>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        Ok(parse_jsonl(&content, &self.path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = CorpusFile::new(dir.path().join("nested").join("corpus.jsonl"));

        assert!(corpus.load_all().unwrap().is_empty());

        corpus.append("Vaccines work", Label::Reliable).unwrap();
        corpus.append("Birds aren't real", Label::Misinformation).unwrap();

        let examples = corpus.load_all().unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].text, "Vaccines work");
        assert_eq!(examples[1].label, Label::Misinformation);
    }

    #[test]
    fn test_parse_skips_bad_lines() {
        let content = r#"{"text":"a real example","label":"reliable"}

not json at all
{"text":"missing label"}
{"text":"another","label":"misinformation","recorded_at":"2024-01-01T00:00:00Z"}
"#;
        let examples = parse_jsonl(content, "test");
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[1].label, Label::Misinformation);
    }

    #[test]
    fn test_record_omits_missing_timestamp() {
        let record = CorpusRecord {
            text: "x".into(),
            label: Label::Reliable,
            recorded_at: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"text":"x","label":"reliable"}"#);
    }

    #[test]
    fn test_appended_timestamp_is_typed() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = CorpusFile::new(dir.path().join("corpus.jsonl"));
        let before = Utc::now();
        corpus.append("Tides follow the moon", Label::Reliable).unwrap();

        let content = std::fs::read_to_string(corpus.path()).unwrap();
        let record: CorpusRecord = serde_json::from_str(content.trim()).unwrap();
        let recorded = record.recorded_at.unwrap();
        assert!(recorded >= before && recorded <= Utc::now());

        let parsed: CorpusRecord = serde_json::from_str(
            r#"{"text":"t","label":"reliable","recorded_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(
            parsed.recorded_at.unwrap(),
            "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }
}
