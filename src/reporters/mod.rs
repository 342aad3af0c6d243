//! Output reporters for verdicts
//!
//! Supports two output formats:
//! - `text` - Terminal output with tier colours
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::classifier::Verdict;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One evaluated text, ready for output
#[derive(Debug, Clone, Serialize)]
pub struct VerdictReport {
    pub probability: f64,
    pub tier: crate::classifier::RiskTier,
    pub label: &'static str,
    /// Leading characters of the evaluated text
    pub preview: String,
}

const PREVIEW_CHARS: usize = 80;

impl VerdictReport {
    pub fn new(text: &str, verdict: Verdict) -> Self {
        let mut preview: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if let Some((cut, _)) = preview.char_indices().nth(PREVIEW_CHARS) {
            preview.truncate(cut);
            preview.push_str("...");
        }
        Self {
            probability: verdict.probability,
            tier: verdict.tier,
            label: verdict.label(),
            preview,
        }
    }
}

/// Render a single verdict
pub fn render(report: &VerdictReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(report)),
        OutputFormat::Json => json::render(report),
    }
}

/// Render a batch of verdicts (input order preserved)
pub fn render_batch(reports: &[VerdictReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_batch(reports)),
        OutputFormat::Json => json::render_batch(reports),
    }
}
