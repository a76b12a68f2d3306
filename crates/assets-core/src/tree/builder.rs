//! Builds settings trees by walking the filesystem

use std::collections::VecDeque;
use std::sync::Arc;

use assets_fs::{FileSystem, NormalizedPath};

use crate::config::{AssetsConfig, FolderConfig};
use crate::logger::Logger;

use super::node::{NodeId, SettingsTree};

/// Walks each configured top-level folder and attaches per-entry overrides.
pub struct TreeBuilder {
    fs: Arc<dyn FileSystem>,
    logger: Arc<dyn Logger>,
}

impl TreeBuilder {
    pub fn new(fs: Arc<dyn FileSystem>, logger: Arc<dyn Logger>) -> Self {
        Self { fs, logger }
    }

    /// Build one tree per top-level folder, in configuration order.
    ///
    /// Never fails: a directory that cannot be listed is logged and treated
    /// as empty, so its siblings and the other folders are still built. A
    /// top-level folder that is a regular file is logged the same way.
    pub fn build(&self, config: &AssetsConfig) -> Vec<SettingsTree> {
        config
            .folders()
            .map(|(name, folder)| self.build_folder(name, folder))
            .collect()
    }

    /// Build the tree for a single top-level folder.
    pub fn build_folder(&self, name: &str, folder: &FolderConfig) -> SettingsTree {
        let mut tree = SettingsTree::new(name, &folder.settings);
        let unconfigured = FolderConfig::default();
        let mut queue: VecDeque<(NodeId, &FolderConfig)> = VecDeque::new();
        queue.push_back((tree.root(), folder));

        while let Some((id, config)) = queue.pop_front() {
            let path = tree.node(id).path();
            let names = match self.fs.list_dir(path) {
                Ok(names) => names,
                Err(e) => {
                    tracing::warn!(%path, error = %e, "Directory listing failed, treating as empty");
                    self.report_unlistable(path);
                    continue;
                }
            };

            if names.is_empty() {
                // A configured folder must be a directory; below it, files are leaves.
                if id == tree.root() && !self.fs.is_dir(path) {
                    tracing::warn!(%path, "Configured folder is not a directory");
                    self.report_unlistable(path);
                }
                continue;
            }

            let children = tree.add_children(id, &names, config);
            for (child, name) in children.into_iter().zip(&names) {
                queue.push_back((child, config.child(name).unwrap_or(&unconfigured)));
            }
        }

        tracing::debug!(folder = name, nodes = tree.len(), "Built settings tree");
        tree
    }

    fn report_unlistable(&self, path: &NormalizedPath) {
        self.logger
            .log(&format!("Failed to get files for \"{}\"", path));
    }
}

impl std::fmt::Debug for TreeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeBuilder").finish_non_exhaustive()
    }
}
