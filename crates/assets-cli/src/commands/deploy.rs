//! Deploy command implementation

use std::sync::Arc;

use colored::Colorize;

use assets_core::{Storage, SyncEngine};

use crate::context::Context;
use crate::error::Result;

/// Run the deploy command
///
/// Walks every configured folder (or only `group`) and uploads each file to
/// the bucket its settings resolve to.
pub async fn run_deploy(ctx: &Context, group: Option<&str>, storage: Arc<dyn Storage>) -> Result<()> {
    let config = ctx.load_config(group)?;
    let trees = ctx.build_trees(config).await?;

    let engine = SyncEngine::new(storage, ctx.fs(), ctx.logger());
    let report = engine.upload_all(&trees).await?;

    if report.actions.is_empty() {
        println!("{} No files to upload.", "OK".green().bold());
        return Ok(());
    }

    for action in &report.actions {
        println!("   {} {}", "+".green(), action);
    }
    println!(
        "{} Uploaded {} file(s).",
        "OK".green().bold(),
        report.actions.len()
    );

    Ok(())
}
