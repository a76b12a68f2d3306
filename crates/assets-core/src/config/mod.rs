//! Nested asset configuration
//!
//! The configuration is a mapping of top-level folder names to settings.
//! Inside each folder's mapping, the recognized settings keys configure that
//! folder and every other key names a child entry with its own settings,
//! nested to any depth:
//!
//! ```yaml
//! public:
//!   bucket: www.example.com
//!   isPublic: true
//!   cacheTime: 3600
//!   index.html:
//!     cacheTime: 60
//!   downloads:
//!     contentType: application/octet-stream
//!     metadata:
//!       team: web
//! ```
//!
//! Configuration is read either from a dedicated file (TOML, JSON or YAML,
//! where the top level is the folder mapping) or from a serverless manifest
//! (`serverless.yml`), where the mapping lives under `custom.s3Assets`.

mod assets;
mod loader;

pub use assets::{AssetsConfig, FolderConfig};
