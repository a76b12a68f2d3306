//! Shared test utilities for the s3-assets workspace.
//!
//! This crate provides in-memory doubles for every injected capability and a
//! temporary directory builder. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fs`]: [`MemoryFs`], a scripted [`assets_fs::FileSystem`]
//! - [`storage`]: [`MemoryStorage`], a recording [`assets_core::Storage`]
//! - [`logger`]: [`RecordingLogger`], which keeps every message
//! - [`tree`]: [`TestTree`] builder for real directory trees on disk

pub mod fs;
pub mod logger;
pub mod storage;
pub mod tree;

pub use fs::MemoryFs;
pub use logger::RecordingLogger;
pub use storage::MemoryStorage;
pub use tree::TestTree;
