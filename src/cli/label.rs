//! Label command - record a labeled example

use super::AppContext;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;
use veracity::classifier::{CorpusFile, Label};

/// Run the label command
pub fn run(ctx: &AppContext, text: &str, label: &str, corpus: Option<&Path>) -> Result<()> {
    let label: Label = label.parse().map_err(anyhow::Error::msg)?;
    if text.trim().is_empty() {
        anyhow::bail!("Cannot label empty text");
    }

    let file = match corpus {
        Some(path) => CorpusFile::new(path),
        None => CorpusFile::new(ctx.config.corpus_path()),
    };
    file.append(text, label)
        .with_context(|| format!("Failed to write {}", file.path().display()))?;

    println!(
        "{} Recorded as {} in {}",
        style("✓").green(),
        style(label).bold(),
        style(file.path().display()).cyan()
    );
    println!("  Run `veracity train` to include it in the model.");
    Ok(())
}
