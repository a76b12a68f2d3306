//! [`MemoryFs`]: a scripted filesystem for tree-building tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use assets_fs::{Error, FileSystem, NormalizedPath, Result};
use async_trait::async_trait;

/// An in-memory [`FileSystem`].
///
/// Directories are declared with their entry names and files with their
/// contents. Any path not declared as a directory lists as empty and is not
/// a directory, which is how a regular file behaves.
///
/// # Example
///
/// ```rust
/// use assets_test_utils::MemoryFs;
///
/// let fs = MemoryFs::new()
///     .dir("a", &["b", "c"])
///     .file("a/b", "hello")
///     .file("a/c", "world")
///     .fail_listing("broken");
/// ```
#[derive(Debug, Default)]
pub struct MemoryFs {
    dirs: BTreeMap<String, Vec<String>>,
    files: BTreeMap<String, Vec<u8>>,
    unreadable: BTreeSet<String>,
    listed: Mutex<Vec<String>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a directory and the names it lists, in listing order.
    pub fn dir(mut self, path: &str, entries: &[&str]) -> Self {
        self.dirs.insert(
            path.to_string(),
            entries.iter().map(|e| e.to_string()).collect(),
        );
        self
    }

    /// Declare a file and its contents.
    pub fn file(mut self, path: &str, contents: impl AsRef<[u8]>) -> Self {
        self.files.insert(path.to_string(), contents.as_ref().to_vec());
        self
    }

    /// Make listing `path` fail.
    pub fn fail_listing(mut self, path: &str) -> Self {
        self.unreadable.insert(path.to_string());
        self
    }

    /// Every path passed to `list_dir`, in call order.
    pub fn listed(&self) -> Vec<String> {
        self.listed.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileSystem for MemoryFs {
    fn list_dir(&self, path: &NormalizedPath) -> Result<Vec<String>> {
        self.listed.lock().unwrap().push(path.to_string());

        if self.unreadable.contains(path.as_str()) {
            return Err(Error::io(
                path.to_native(),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "unreadable"),
            ));
        }
        Ok(self.dirs.get(path.as_str()).cloned().unwrap_or_default())
    }

    fn is_dir(&self, path: &NormalizedPath) -> bool {
        self.dirs.contains_key(path.as_str())
    }

    async fn read_file(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        self.files
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| Error::NotFound {
                path: path.to_native(),
            })
    }
}
