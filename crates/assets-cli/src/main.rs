//! s3-assets CLI
//!
//! Uploads configured local folders to S3 buckets, previews those uploads,
//! or empties the configured buckets.

mod cli;
mod commands;
mod context;
mod error;

use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use assets_core::{S3Storage, Storage};

use cli::{Cli, Commands};
use context::Context;
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        for detail in e.details() {
            eprintln!("   {} {}", "!".red(), detail);
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("{}: tracing subscriber already set", "warning".yellow());
        }
        tracing::debug!("Verbose mode enabled");
    }

    let Some(command) = cli.command.clone() else {
        println!("{} Mirror asset folders onto S3 buckets", "s3-assets".green().bold());
        println!();
        println!("Run {} for available commands.", "s3-assets --help".cyan());
        return Ok(());
    };

    let cwd = std::env::current_dir()?;
    let ctx = Context::new(&cwd, &cli.config, cli.dir.as_deref());
    tracing::debug!(
        config = %ctx.config_path().display(),
        base_dir = %ctx.base_dir().display(),
        "Resolved paths"
    );

    match command {
        Commands::Deploy { group } => {
            let storage = storage(&cli).await;
            commands::run_deploy(&ctx, group.as_deref(), storage).await
        }
        Commands::Remove { group, yes } => {
            let buckets = commands::confirm_buckets(&ctx, group.as_deref(), yes)?;
            let storage = storage(&cli).await;
            commands::run_remove(&ctx, &buckets, storage).await
        }
        Commands::Plan { group, json } => commands::run_plan(&ctx, group.as_deref(), json).await,
    }
}

async fn storage(cli: &Cli) -> Arc<dyn Storage> {
    Arc::new(S3Storage::from_env(cli.endpoint_url.as_deref()).await)
}
