//! Remove command implementation

use std::sync::Arc;

use colored::Colorize;

use assets_core::{Storage, SyncEngine};

use crate::context::Context;
use crate::error::{CliError, Result};

/// Resolve the buckets the remove command would empty.
///
/// Objects that were never uploaded by deploy are deleted too, so the
/// buckets are only returned when `yes` is set. Without it the buckets are
/// listed and a user error is returned.
pub fn confirm_buckets(ctx: &Context, group: Option<&str>, yes: bool) -> Result<Vec<String>> {
    let config = ctx.load_config(group)?;
    let buckets = config.buckets();

    if buckets.is_empty() || yes {
        return Ok(buckets);
    }

    println!(
        "{} Every object in these buckets would be deleted:",
        "WARNING".yellow().bold()
    );
    for bucket in &buckets {
        println!("   {} {}", "-".yellow(), bucket.cyan());
    }
    Err(CliError::user("refusing to empty buckets without --yes"))
}

/// Run the remove command
///
/// Empties every bucket in `buckets`.
pub async fn run_remove(ctx: &Context, buckets: &[String], storage: Arc<dyn Storage>) -> Result<()> {
    if buckets.is_empty() {
        println!("{} No buckets configured.", "OK".green().bold());
        return Ok(());
    }

    let engine = SyncEngine::new(storage, ctx.fs(), ctx.logger());
    let report = engine.remove_all(buckets).await?;

    for action in &report.actions {
        println!("   {} {}", "-".red(), action);
    }
    println!(
        "{} Emptied {} bucket(s).",
        "OK".green().bold(),
        report.actions.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use assets_test_utils::{MemoryStorage, TestTree};

    const CONFIG: &str = r#"
public:
  bucket: www
  archive:
    bucket: cold
other:
  bucket: www
"#;

    fn project() -> TestTree {
        TestTree::new().config("assets.yml", CONFIG)
    }

    fn storage() -> MemoryStorage {
        MemoryStorage::new()
            .with_objects("www", &["index.html", "stale.js"])
            .with_objects("cold", &["2019.tar"])
            .with_objects("unrelated", &["keep.txt"])
    }

    #[test]
    fn requires_confirmation() {
        let project = project();
        let ctx = Context::new(project.root(), Path::new("assets.yml"), None);

        let err = confirm_buckets(&ctx, None, false).unwrap_err();

        assert!(matches!(err, CliError::User { .. }));
    }

    #[test]
    fn confirmed_buckets_are_distinct_in_config_order() {
        let project = project();
        let ctx = Context::new(project.root(), Path::new("assets.yml"), None);

        let buckets = confirm_buckets(&ctx, None, true).unwrap();

        assert_eq!(buckets, vec!["www", "cold"]);
    }

    #[tokio::test]
    async fn empties_each_configured_bucket_once() {
        let project = project();
        let ctx = Context::new(project.root(), Path::new("assets.yml"), None);
        let storage = Arc::new(storage());
        let buckets = confirm_buckets(&ctx, None, true).unwrap();

        run_remove(&ctx, &buckets, storage.clone()).await.unwrap();

        assert!(storage.keys("www").is_empty());
        assert!(storage.keys("cold").is_empty());
        assert_eq!(storage.keys("unrelated"), vec!["keep.txt"]);
        assert_eq!(storage.deletes().len(), 2);
    }

    #[tokio::test]
    async fn no_buckets_needs_no_confirmation() {
        let project = TestTree::new().config("assets.yml", "public: {}\n");
        let ctx = Context::new(project.root(), Path::new("assets.yml"), None);
        let storage = Arc::new(storage());

        let buckets = confirm_buckets(&ctx, None, false).unwrap();
        run_remove(&ctx, &buckets, storage.clone()).await.unwrap();

        assert!(storage.deletes().is_empty());
    }
}
