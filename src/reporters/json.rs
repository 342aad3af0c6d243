//! JSON reporter
//!
//! Pretty-printed JSON for piping to jq or other tools.

use super::VerdictReport;
use anyhow::Result;

/// Render a verdict as JSON
pub fn render(report: &VerdictReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render a batch as a JSON array
pub fn render_batch(reports: &[VerdictReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}
