//! Arena-backed settings tree

use std::collections::BTreeMap;

use assets_fs::NormalizedPath;

use crate::config::FolderConfig;
use crate::settings::{Settings, SettingsOverride};

/// Index of a node within its [`SettingsTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One filesystem entry with its resolved settings.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    path: NormalizedPath,
    relative_path: NormalizedPath,
    settings: Settings,
    children: Vec<NodeId>,
}

impl Node {
    fn root(name: &str, settings: Settings) -> Self {
        Self {
            name: name.to_string(),
            path: NormalizedPath::new(name),
            relative_path: NormalizedPath::empty(),
            settings,
            children: Vec::new(),
        }
    }

    /// A child inherits a copy of this node's current settings.
    fn child(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: self.path.join(name),
            relative_path: self.relative_path.join(name),
            settings: self.settings.clone(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filesystem path from the top-level folder, including its name.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Object key: the path below the top-level folder. Empty for the root.
    pub fn relative_path(&self) -> &str {
        self.relative_path.as_str()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bucket(&self) -> Option<&str> {
        self.settings.bucket()
    }

    pub fn acl(&self) -> &str {
        self.settings.acl()
    }

    pub fn cache_control(&self) -> &str {
        self.settings.cache_control()
    }

    /// Configured content type, or `text/plain`.
    pub fn content_type(&self) -> &str {
        self.settings.content_type()
    }

    /// Content type detected from the path's extension, falling back to
    /// [`Node::content_type`] when the extension is unknown.
    pub fn resolved_content_type(&self) -> &str {
        match mime_guess::from_path(self.path.as_str()).first_raw() {
            Some(detected) => detected,
            None => self.content_type(),
        }
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        self.settings.metadata()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Leaves are the unit of upload; directories are never uploaded.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A top-level folder and every entry below it.
///
/// Nodes live in a single arena and refer to their children by [`NodeId`].
/// The root is always the first node.
#[derive(Debug, Clone)]
pub struct SettingsTree {
    nodes: Vec<Node>,
}

impl SettingsTree {
    /// Create a tree holding only a root node for the folder `name`, with
    /// `overrides` merged onto empty settings.
    pub fn new(name: &str, overrides: &SettingsOverride) -> Self {
        Self {
            nodes: vec![Node::root(name, Settings::new().merged(overrides))],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// All nodes in creation order, root first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so it is never empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Merge `overrides` into the settings of node `id`.
    ///
    /// Cumulative across calls: the last override applied wins per field.
    /// Children created earlier keep the settings they were created with.
    pub fn apply_settings(&mut self, id: NodeId, overrides: &SettingsOverride) {
        let node = &mut self.nodes[id.0];
        node.settings = node.settings.merged(overrides);
    }

    /// Create one child of `parent` per name.
    ///
    /// Each child starts from a copy of the parent's current settings, then
    /// merges the override configured for its name in `config`, if any.
    /// Returns the new ids in the order of `names`.
    pub fn add_children(
        &mut self,
        parent: NodeId,
        names: &[String],
        config: &FolderConfig,
    ) -> Vec<NodeId> {
        let mut created = Vec::with_capacity(names.len());

        for name in names {
            let mut child = self.nodes[parent.0].child(name);
            if let Some(entry) = config.child(name) {
                child.settings = child.settings.merged(&entry.settings);
            }

            let id = NodeId(self.nodes.len());
            self.nodes.push(child);
            self.nodes[parent.0].children.push(id);
            created.push(id);
        }

        created
    }

    /// Every leaf below the root, breadth-first.
    pub fn flatten(&self) -> Vec<&Node> {
        self.flatten_from(self.root())
    }

    /// Every leaf below `id`, breadth-first.
    ///
    /// Intermediate nodes and `id` itself are never included, so a folder
    /// with no entries flattens to nothing.
    pub fn flatten_from(&self, id: NodeId) -> Vec<&Node> {
        let mut leaves = Vec::new();
        let mut level: Vec<NodeId> = self.node(id).children.clone();

        while !level.is_empty() {
            let mut next = Vec::new();
            for child in level {
                let node = self.node(child);
                if node.is_leaf() {
                    leaves.push(node);
                } else {
                    next.extend_from_slice(&node.children);
                }
            }
            level = next;
        }

        leaves
    }
}
