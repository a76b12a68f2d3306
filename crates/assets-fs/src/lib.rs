//! Filesystem abstraction for s3-assets
//!
//! Provides slash-normalized paths, the [`FileSystem`] capability consumed by
//! the tree builder and sync engine, and format-agnostic config loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::{FileSystem, LocalFs};
pub use path::NormalizedPath;
