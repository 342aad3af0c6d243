//! Init command - write an example config file

use anyhow::Result;
use console::style;
use std::path::Path;
use veracity::config::VeracityConfig;

/// Run the init command
pub fn run(path: Option<&Path>) -> Result<()> {
    let (config_path, created) = VeracityConfig::init_user_config(path)?;
    if created {
        println!(
            "{} Created {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    } else {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    }
    Ok(())
}
