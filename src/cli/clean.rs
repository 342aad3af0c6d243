//! Clean command - remove the saved model

use super::AppContext;
use anyhow::Result;
use veracity::classifier::ModelStore;

pub fn run(ctx: &AppContext, dry_run: bool) -> Result<()> {
    let store = ModelStore::new(&ctx.model_path);

    if !store.exists() {
        println!("No saved model at {}.", ctx.model_path.display());
        return Ok(());
    }

    if dry_run {
        println!("Would remove: {}", ctx.model_path.display());
        println!("\nDry run - nothing removed. Run without --dry-run to delete.");
        return Ok(());
    }

    match store.remove() {
        Ok(_) => println!("Removed: {}", ctx.model_path.display()),
        Err(e) => eprintln!("Failed to remove {}: {}", ctx.model_path.display(), e),
    }
    Ok(())
}
