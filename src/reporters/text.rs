//! Text reporter with terminal styling

use super::VerdictReport;
use crate::classifier::RiskTier;
use console::style;

fn styled_label(report: &VerdictReport) -> String {
    let label = report.label;
    match report.tier {
        RiskTier::High => style(label).red().bold().to_string(),
        RiskTier::Moderate => style(label).yellow().bold().to_string(),
        RiskTier::Low => style(label).green().bold().to_string(),
        RiskTier::NoContent => style(label).dim().to_string(),
    }
}

/// Render a verdict for the terminal
pub fn render(report: &VerdictReport) -> String {
    format!(
        "{}\n\nConfidence Score: {:.2}%\n",
        styled_label(report),
        report.probability * 100.0
    )
}

/// One line per verdict
pub fn render_batch(reports: &[VerdictReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!(
            "{:>7.2}%  {}  {}\n",
            report.probability * 100.0,
            styled_label(report),
            style(&report.preview).dim()
        ));
    }
    out
}
