//! Plan command implementation

use colored::Colorize;

use assets_core::plan;

use crate::context::Context;
use crate::error::Result;

/// Run the plan command
///
/// Prints each upload deploy would perform. Reads the filesystem only.
pub async fn run_plan(ctx: &Context, group: Option<&str>, json: bool) -> Result<()> {
    let config = ctx.load_config(group)?;
    let trees = ctx.build_trees(config).await?;
    let uploads = plan(&trees);

    if json {
        println!("{}", serde_json::to_string_pretty(&uploads)?);
        return Ok(());
    }

    if uploads.is_empty() {
        println!("{} No files to upload.", "OK".green().bold());
        return Ok(());
    }

    for upload in &uploads {
        let target = match &upload.bucket {
            Some(bucket) => format!("{}/{}", bucket, upload.key).cyan(),
            None => format!("<no bucket>/{}", upload.key).red(),
        };
        println!(
            "   {} {} {} ({}, {}, {})",
            "+".green(),
            upload.path,
            target,
            upload.acl.dimmed(),
            upload.cache_control.dimmed(),
            upload.content_type.dimmed()
        );
    }
    println!("{} {} file(s) to upload.", "=>".blue().bold(), uploads.len());

    Ok(())
}
