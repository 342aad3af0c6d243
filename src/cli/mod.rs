//! CLI command definitions and handlers

mod batch;
mod check;
mod clean;
mod init;
mod label;
mod status;
mod train;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use veracity::classifier::{Detector, ModelStore};
use veracity::config::VeracityConfig;
use veracity::reporters::OutputFormat;

/// Veracity - misinformation risk classifier
///
/// 100% LOCAL - the model is trained and stored on your machine.
#[derive(Parser, Debug)]
#[command(name = "veracity")]
#[command(
    version,
    about = "Score text for misinformation risk with a local TF-IDF + naive Bayes model",
    after_help = "\
Examples:
  veracity check \"5G towers spread illness\"     Score a single text
  cat article.txt | veracity check                 Score stdin
  veracity check --file article.txt --format json  JSON output for scripting
  veracity batch claims.txt                        Score one text per line
  veracity label \"Bleach cures flu\" --as misinformation
  veracity train                                   Retrain on seed + your labels"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: ~/.config/veracity/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model artifact path (overrides config and VERACITY_MODEL_PATH)
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score one text (argument, --file, or stdin)
    Check {
        /// Text to score
        text: Option<String>,

        /// Read the text from a file
        #[arg(long, short = 'f', conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Score every line of a file in parallel
    Batch {
        /// File with one text per line
        file: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Retrain the model on the seed corpus plus labeled examples
    Train {
        /// Additional JSONL corpus files
        #[arg(long)]
        corpus: Vec<PathBuf>,

        /// Leave the bundled seed corpus out
        #[arg(long)]
        no_seed: bool,
    },

    /// Record a labeled example for the next `train`
    Label {
        /// Text being labeled
        text: String,

        /// reliable or misinformation
        #[arg(long = "as", value_parser = ["reliable", "misinformation"])]
        label: String,

        /// Corpus file to append to (default: from config)
        #[arg(long)]
        corpus: Option<PathBuf>,
    },

    /// Show model location and training details
    Status,

    /// Delete the saved model (it is retrained on next use)
    Clean {
        /// Only show what would be removed
        #[arg(long)]
        dry_run: bool,
    },

    /// Write an example config file
    Init,
}

/// Resolved config plus CLI overrides
pub(crate) struct AppContext {
    pub config: VeracityConfig,
    pub model_path: PathBuf,
}

fn load_context(cli: &Cli) -> Result<AppContext> {
    let config = VeracityConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    let model_path = cli.model.clone().unwrap_or_else(|| config.model_path());
    Ok(AppContext { config, model_path })
}

pub(crate) fn open_detector(ctx: &AppContext) -> Result<Detector> {
    let detector_config = ctx.config.detector_config()?;
    Detector::open(ModelStore::new(&ctx.model_path), detector_config)
        .with_context(|| format!("Failed to prepare model at {}", ctx.model_path.display()))
}

pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Init => init::run(cli.config.as_deref()),
        Commands::Check { text, file, format } => check::run(
            &load_context(&cli)?,
            text.as_deref(),
            file.as_deref(),
            format.parse::<OutputFormat>()?,
        ),
        Commands::Batch { file, format } => {
            batch::run(&load_context(&cli)?, file, format.parse::<OutputFormat>()?)
        }
        Commands::Train { corpus, no_seed } => train::run(&load_context(&cli)?, corpus, *no_seed),
        Commands::Label {
            text,
            label,
            corpus,
        } => label::run(&load_context(&cli)?, text, label, corpus.as_deref()),
        Commands::Status => status::run(&load_context(&cli)?),
        Commands::Clean { dry_run } => clean::run(&load_context(&cli)?, *dry_run),
    }
}
