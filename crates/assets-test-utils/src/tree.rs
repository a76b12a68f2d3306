//! [`TestTree`] builder for asset directories on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory populated with asset files.
///
/// # Example
///
/// ```rust,no_run
/// use assets_test_utils::TestTree;
///
/// let tree = TestTree::new()
///     .file("public/index.html", "<html></html>")
///     .file("public/css/site.css", "body {}")
///     .dir("public/empty");
/// tree.assert_file_exists("public/css/site.css");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a file, creating parent directories as needed.
    pub fn file(self, relative: &str, contents: &str) -> Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        self
    }

    /// Create a directory, including parents.
    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.path(relative)).unwrap();
        self
    }

    /// Write the asset configuration file at the tree root.
    pub fn config(self, file_name: &str, contents: &str) -> Self {
        self.file(file_name, contents)
    }

    /// Assert that `relative` exists as a file.
    pub fn assert_file_exists(&self, relative: &str) {
        let path = self.path(relative);
        assert!(path.is_file(), "Expected file at {}", path.display());
    }
}
