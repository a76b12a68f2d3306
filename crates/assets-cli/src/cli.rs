//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// s3-assets - Mirror local asset folders onto S3 buckets
#[derive(Parser, Debug)]
#[command(name = "s3-assets")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Asset configuration file (TOML, JSON or YAML; serverless manifests
    /// are read from `custom.s3Assets`)
    #[arg(short, long, global = true, default_value = "serverless.yml")]
    pub config: PathBuf,

    /// Directory asset folders are resolved against
    /// (defaults to the configuration file's directory)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Custom S3-compatible endpoint, addressed path-style
    #[arg(long, global = true, env = "S3_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Upload every configured file to its bucket
    ///
    /// Examples:
    ///   s3-assets deploy                 # All asset groups
    ///   s3-assets deploy --group public  # Only the `public` folder
    Deploy {
        /// Only deploy this top-level folder
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Delete every object from the configured buckets
    ///
    /// This empties the buckets entirely, including objects that were not
    /// uploaded from the configured folders.
    Remove {
        /// Only target buckets configured under this top-level folder
        #[arg(short, long)]
        group: Option<String>,

        /// Confirm that the buckets should be emptied
        #[arg(long)]
        yes: bool,
    },

    /// Show what deploy would upload, without touching storage
    Plan {
        /// Only plan this top-level folder
        #[arg(short, long)]
        group: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
