//! Filesystem capability used to discover and read asset files

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{Error, NormalizedPath, Result};

/// Read-only access to the directory tree being mirrored.
///
/// The tree builder only needs to list entries and the sync engine only
/// needs to read file contents, so the trait stays that narrow. Tests swap in
/// an in-memory implementation.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// List the immediate entry names of `path`.
    ///
    /// A regular file lists as empty. A missing or unreadable path is an error.
    /// Blocking; async callers should run tree walks on a blocking thread.
    fn list_dir(&self, path: &NormalizedPath) -> Result<Vec<String>>;

    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &NormalizedPath) -> bool;

    /// Read the full contents of the file at `path`.
    async fn read_file(&self, path: &NormalizedPath) -> Result<Vec<u8>>;
}

/// [`FileSystem`] backed by the local disk.
///
/// Relative node paths are resolved against `base`, which is normally the
/// directory the configuration file lives in.
#[derive(Debug, Clone)]
pub struct LocalFs {
    base: PathBuf,
}

impl LocalFs {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

#[async_trait]
impl FileSystem for LocalFs {
    fn list_dir(&self, path: &NormalizedPath) -> Result<Vec<String>> {
        let native = path.resolve_against(&self.base);
        let metadata = fs::metadata(&native).map_err(|e| Error::io(&native, e))?;
        if !metadata.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&native).map_err(|e| Error::io(&native, e))? {
            let entry = entry.map_err(|e| Error::io(&native, e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        // read_dir order is platform-dependent
        names.sort();

        tracing::debug!(path = %native.display(), entries = names.len(), "Listed directory");
        Ok(names)
    }

    fn is_dir(&self, path: &NormalizedPath) -> bool {
        path.resolve_against(&self.base).is_dir()
    }

    async fn read_file(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        let native = path.resolve_against(&self.base);
        tokio::fs::read(&native)
            .await
            .map_err(|e| Error::io(&native, e))
    }
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn list_dir_returns_sorted_names() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public/css")).unwrap();
        fs::write(dir.path().join("public/index.html"), "<html>").unwrap();
        fs::write(dir.path().join("public/app.js"), "").unwrap();

        let local = LocalFs::new(dir.path());
        let names = local.list_dir(&NormalizedPath::new("public")).unwrap();

        assert_eq!(names, vec!["app.js", "css", "index.html"]);
    }

    #[test]
    fn list_dir_on_file_is_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("robots.txt"), "User-agent: *").unwrap();

        let local = LocalFs::new(dir.path());
        let names = local.list_dir(&NormalizedPath::new("robots.txt")).unwrap();

        assert!(names.is_empty());
        assert!(!local.is_dir(&NormalizedPath::new("robots.txt")));
    }

    #[test]
    fn is_dir_for_directories_only() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();

        let local = LocalFs::new(dir.path());

        assert!(local.is_dir(&NormalizedPath::new("public")));
        assert!(!local.is_dir(&NormalizedPath::new("missing")));
    }

    #[test]
    fn list_dir_on_missing_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let local = LocalFs::new(dir.path());

        let err = local.list_dir(&NormalizedPath::new("missing")).unwrap_err();

        assert!(matches!(err, Error::NotFound { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn read_file_resolves_against_base() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("public/index.html"), "<html>").unwrap();

        let local = LocalFs::new(dir.path());
        let body = local
            .read_file(&NormalizedPath::new("public/index.html"))
            .await
            .unwrap();

        assert_eq!(body, b"<html>");
    }
}
