//! Settings tree construction and traversal
//!
//! - **node**: the arena-backed [`SettingsTree`] and its [`Node`]s
//! - **builder**: [`TreeBuilder`], which walks the filesystem from each
//!   configured top-level folder
//!
//! Both construction and flattening iterate over explicit work queues, so
//! tree depth is bounded by memory rather than by the call stack.

mod builder;
mod node;

pub use builder::TreeBuilder;
pub use node::{Node, NodeId, SettingsTree};
