//! Batch command - score one text per line in parallel

use super::{open_detector, AppContext};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::Path;
use veracity::reporters::{self, OutputFormat, VerdictReport};

/// Run the batch command
pub fn run(ctx: &AppContext, file: &Path, format: OutputFormat) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();

    let detector = open_detector(ctx)?;
    let reports: Vec<VerdictReport> = lines
        .par_iter()
        .map(|line| VerdictReport::new(line, detector.evaluate(line)))
        .collect();

    tracing::info!("Scored {} texts from {}", reports.len(), file.display());

    print!("{}", reporters::render_batch(&reports, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
