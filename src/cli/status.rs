//! Status command - show model details without touching the artifact

use super::AppContext;
use anyhow::Result;
use console::style;
use veracity::classifier::{Label, ModelStore};

/// Run the status command
pub fn run(ctx: &AppContext) -> Result<()> {
    let store = ModelStore::new(&ctx.model_path);

    println!("\n{}", style("Veracity Model").bold());
    println!("{}", style("──────────────────────────────────────").dim());
    println!("  Path:         {}", style(ctx.model_path.display()).cyan());

    match store.load() {
        Ok(Some(pipeline)) => {
            let meta = pipeline.metadata();
            let model = pipeline.model();
            println!("  Artifact:     {}", style("present").green());
            println!("  Vocabulary:   {} terms", pipeline.vectorizer().dim());
            println!(
                "  Examples:     {} reliable, {} misinformation",
                model.class_count(Label::Reliable),
                model.class_count(Label::Misinformation)
            );
            println!("  Smoothing:    {}", model.alpha());
            println!("  Trained at:   {}", meta.trained_at.to_rfc3339());
            println!("  Version:      {}", meta.version);
        }
        Ok(None) => println!(
            "  Artifact:     {} (the next check trains from the seed corpus)",
            style("missing").yellow()
        ),
        Err(e) => println!("  Artifact:     {} ({})", style("unreadable").red(), e),
    }

    println!("  Corpus file:  {}", ctx.config.corpus_path().display());
    Ok(())
}
