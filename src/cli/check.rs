//! Check command - score one text

use super::{open_detector, AppContext};
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use veracity::reporters::{self, OutputFormat, VerdictReport};

/// Run the check command
pub fn run(ctx: &AppContext, text: Option<&str>, file: Option<&Path>, format: OutputFormat) -> Result<()> {
    let input = match (text, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let detector = open_detector(ctx)?;
    let verdict = detector.evaluate(&input);
    let report = VerdictReport::new(&input, verdict);

    print!("{}", reporters::render(&report, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
