//! Loading asset configuration from disk

use std::path::Path;

use assets_fs::ConfigStore;
use serde::Deserialize;

use super::assets::AssetsConfig;
use crate::Result;

/// File stems recognized as serverless manifests.
const SERVERLESS_MANIFEST_STEM: &str = "serverless";

/// The part of a serverless manifest we read: `custom.s3Assets`.
#[derive(Debug, Default, Deserialize)]
struct ServerlessManifest {
    #[serde(default)]
    custom: Option<ServerlessCustom>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerlessCustom {
    #[serde(rename = "s3Assets", default)]
    s3_assets: Option<AssetsConfig>,
}

impl AssetsConfig {
    /// Load configuration from `path`.
    ///
    /// `serverless.{yml,yaml,json,toml}` is read as a serverless manifest and
    /// the folder mapping is taken from `custom.s3Assets`; a manifest without
    /// that section yields an empty configuration. Any other file is read as a
    /// bare folder mapping. The format follows the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let store = ConfigStore::new();

        if is_serverless_manifest(path) {
            tracing::debug!(path = %path.display(), "Reading custom.s3Assets from serverless manifest");
            let manifest: ServerlessManifest = store.load(path)?;
            return Ok(manifest
                .custom
                .and_then(|custom| custom.s3_assets)
                .unwrap_or_default());
        }

        Ok(store.load(path)?)
    }
}

fn is_serverless_manifest(path: &Path) -> bool {
    path.file_stem()
        .is_some_and(|stem| stem.eq_ignore_ascii_case(SERVERLESS_MANIFEST_STEM))
}
