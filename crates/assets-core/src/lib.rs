//! Core layer for s3-assets
//!
//! Mirrors local directory trees onto object-storage buckets:
//!
//! - **Configuration**: nested per-folder/per-file settings ([`AssetsConfig`])
//! - **Settings tree**: inherited settings resolved for every filesystem entry
//!   ([`SettingsTree`])
//! - **Tree builder**: walks the filesystem and attaches overrides
//!   ([`TreeBuilder`])
//! - **Sync engine**: uploads every leaf file, or empties target buckets
//!   ([`SyncEngine`])
//!
//! # Architecture
//!
//! ```text
//!              assets-cli
//!                  |
//!             assets-core
//!          /       |       \
//!   assets-fs   Storage   Logger
//!                  |
//!             aws-sdk-s3
//! ```
//!
//! The filesystem, storage client and logger are injected as trait objects,
//! so every component can be exercised against in-memory doubles.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use assets_core::{AssetsConfig, S3Storage, SyncEngine, TracingLogger, TreeBuilder};
//! use assets_fs::LocalFs;
//!
//! let config = AssetsConfig::load("serverless.yml".as_ref())?;
//! let fs = Arc::new(LocalFs::new("."));
//! let logger = Arc::new(TracingLogger);
//! let trees = TreeBuilder::new(fs.clone(), logger.clone()).build(&config);
//!
//! let storage = Arc::new(S3Storage::from_env(None).await);
//! SyncEngine::new(storage, fs, logger).upload_all(&trees).await?;
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod settings;
pub mod storage;
pub mod sync;
pub mod tree;

pub use config::{AssetsConfig, FolderConfig};
pub use error::{Error, Result, UploadFailure};
pub use logger::{Logger, TracingLogger};
pub use settings::{Settings, SettingsOverride};
pub use storage::{PutObject, S3Storage, Storage, StorageError};
pub use sync::{PlannedUpload, SyncEngine, SyncReport, plan};
pub use tree::{Node, NodeId, SettingsTree, TreeBuilder};
