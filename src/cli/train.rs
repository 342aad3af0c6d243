//! Train command - retrain on seed corpus plus labeled examples

use super::AppContext;
use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;
use veracity::classifier::{seed_corpus, train, CorpusFile, ModelStore};

/// Run the train command
pub fn run(ctx: &AppContext, extra: &[PathBuf], no_seed: bool) -> Result<()> {
    let mut corpus = if no_seed { Vec::new() } else { seed_corpus() };

    let user_corpus = CorpusFile::new(ctx.config.corpus_path());
    let recorded = user_corpus
        .load_all()
        .with_context(|| format!("Failed to read {}", user_corpus.path().display()))?;
    tracing::info!("Loaded {} labeled examples from {}", recorded.len(), user_corpus.path().display());
    corpus.extend(recorded);

    for path in extra {
        if !path.exists() {
            anyhow::bail!("Corpus file does not exist: {}", path.display());
        }
        let examples = CorpusFile::new(path)
            .load_all()
            .with_context(|| format!("Failed to read {}", path.display()))?;
        corpus.extend(examples);
    }

    // No detector: a cold start would fit the seed model first
    let pipeline = train(&corpus, &ctx.config.train_config()).context("Training failed")?;
    let meta = pipeline.metadata();
    println!(
        "{} Trained on {} examples ({} reliable, {} misinformation), {} features",
        style("✓").green(),
        corpus.len(),
        meta.reliable_examples,
        meta.misinformation_examples,
        pipeline.vectorizer().dim()
    );

    match ModelStore::new(&ctx.model_path).save(&pipeline) {
        Ok(()) => println!(
            "{} Model saved to {}",
            style("✓").green(),
            style(ctx.model_path.display()).cyan()
        ),
        Err(e) => {
            tracing::warn!("Trained model was not saved: {}", e);
            eprintln!(
                "{} Model could not be saved ({}); the previously saved model, if any, will be used",
                style("!").yellow(),
                e
            );
        }
    }
    Ok(())
}
