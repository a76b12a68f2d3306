//! Shared command context: where the configuration lives and which
//! directory its folders are resolved against.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;

use assets_core::{AssetsConfig, Logger, SettingsTree, TreeBuilder};
use assets_fs::LocalFs;

use crate::error::{CliError, Result};

/// Logger that prints engine progress to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        tracing::debug!("{}", message);
        println!("{} {}", "=>".blue().bold(), message);
    }
}

/// Resolved locations for a single CLI invocation.
#[derive(Debug, Clone)]
pub struct Context {
    config_path: PathBuf,
    base_dir: PathBuf,
}

impl Context {
    /// Resolve `config` and `dir` against the working directory `cwd`.
    ///
    /// Without an explicit `dir`, asset folders are resolved against the
    /// directory holding the configuration file.
    pub fn new(cwd: &Path, config: &Path, dir: Option<&Path>) -> Self {
        let config_path = cwd.join(config);
        let base_dir = match dir {
            Some(dir) => cwd.join(dir),
            None => config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.to_path_buf()),
        };

        Self {
            config_path,
            base_dir,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Load the configuration, narrowed to `group` when given.
    pub fn load_config(&self, group: Option<&str>) -> Result<AssetsConfig> {
        if !self.config_path.exists() {
            return Err(CliError::user(format!(
                "configuration file not found: {}",
                self.config_path.display()
            )));
        }

        let config = AssetsConfig::load(&self.config_path)?;
        tracing::debug!(
            path = %self.config_path.display(),
            folders = config.len(),
            "Loaded asset configuration"
        );

        match group {
            Some(name) => Ok(config.only(name)?),
            None => Ok(config),
        }
    }

    pub fn fs(&self) -> Arc<LocalFs> {
        Arc::new(LocalFs::new(self.base_dir.clone()))
    }

    pub fn logger(&self) -> Arc<dyn Logger> {
        Arc::new(ConsoleLogger)
    }

    /// Walk the configured folders below the base directory.
    ///
    /// Directory listing is blocking, so the walk runs on the blocking pool.
    pub async fn build_trees(&self, config: AssetsConfig) -> Result<Vec<SettingsTree>> {
        let builder = TreeBuilder::new(self.fs(), self.logger());
        let trees = tokio::task::spawn_blocking(move || builder.build(&config)).await?;
        Ok(trees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_dir_defaults_to_config_directory() {
        let ctx = Context::new(Path::new("/work"), Path::new("site/serverless.yml"), None);

        assert_eq!(ctx.config_path(), Path::new("/work/site/serverless.yml"));
        assert_eq!(ctx.base_dir(), Path::new("/work/site"));
    }

    #[test]
    fn explicit_dir_wins() {
        let ctx = Context::new(
            Path::new("/work"),
            Path::new("serverless.yml"),
            Some(Path::new("dist")),
        );

        assert_eq!(ctx.base_dir(), Path::new("/work/dist"));
    }

    #[test]
    fn absolute_config_ignores_cwd() {
        let ctx = Context::new(Path::new("/work"), Path::new("/etc/assets.toml"), None);

        assert_eq!(ctx.base_dir(), Path::new("/etc"));
    }

    #[tokio::test]
    async fn build_trees_walks_below_base_dir() {
        let project = assets_test_utils::TestTree::new()
            .config("assets.yml", "public:\n  bucket: www\n")
            .file("public/css/site.css", "body {}")
            .file("public/index.html", "<html></html>");
        let ctx = Context::new(project.root(), Path::new("assets.yml"), None);
        let config = ctx.load_config(None).unwrap();

        let trees = ctx.build_trees(config).await.unwrap();

        let keys: Vec<_> = trees[0]
            .flatten()
            .iter()
            .map(|leaf| leaf.relative_path().to_string())
            .collect();
        assert_eq!(keys, vec!["index.html", "css/site.css"]);
    }

    #[test]
    fn missing_config_is_a_user_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(dir.path(), Path::new("serverless.yml"), None);

        let err = ctx.load_config(None).unwrap_err();

        assert!(matches!(err, CliError::User { .. }));
        assert!(err.to_string().contains("configuration file not found"));
    }
}
