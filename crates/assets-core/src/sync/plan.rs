//! The uploads a set of settings trees describes

use std::collections::BTreeMap;

use serde::Serialize;

use crate::tree::{Node, SettingsTree};

/// One leaf file with the resolved settings it will be uploaded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedUpload {
    /// Source file, relative to the filesystem base
    pub path: String,
    pub bucket: Option<String>,
    pub key: String,
    pub acl: String,
    pub cache_control: String,
    pub content_type: String,
    pub metadata: BTreeMap<String, String>,
}

impl PlannedUpload {
    pub fn from_leaf(leaf: &Node) -> Self {
        Self {
            path: leaf.path().to_string(),
            bucket: leaf.bucket().map(str::to_string),
            key: leaf.relative_path().to_string(),
            acl: leaf.acl().to_string(),
            cache_control: leaf.cache_control().to_string(),
            content_type: leaf.resolved_content_type().to_string(),
            metadata: leaf.metadata().clone(),
        }
    }
}

/// Every leaf of every tree, tree by tree, breadth-first within a tree.
pub fn plan(trees: &[SettingsTree]) -> Vec<PlannedUpload> {
    trees
        .iter()
        .flat_map(SettingsTree::flatten)
        .map(PlannedUpload::from_leaf)
        .collect()
}
