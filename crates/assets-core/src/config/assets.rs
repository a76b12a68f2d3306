//! Configuration types and their order-preserving deserialization

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::settings::SettingsOverride;
use crate::{Error, Result};

/// Settings for one folder or file plus the configuration of its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderConfig {
    /// Overrides applied to this entry
    pub settings: SettingsOverride,

    /// Nested configuration keyed by child entry name
    pub children: BTreeMap<String, FolderConfig>,
}

impl FolderConfig {
    pub fn new(settings: SettingsOverride) -> Self {
        Self {
            settings,
            children: BTreeMap::new(),
        }
    }

    /// Add nested configuration for the child entry `name`.
    pub fn with_child(mut self, name: impl Into<String>, child: FolderConfig) -> Self {
        self.children.insert(name.into(), child);
        self
    }

    /// Configuration for the child entry `name`, if any.
    pub fn child(&self, name: &str) -> Option<&FolderConfig> {
        self.children.get(name)
    }
}

/// Top-level asset configuration: folder name to folder settings.
///
/// Folders keep the order in which they appear in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetsConfig {
    folders: Vec<(String, FolderConfig)>,
}

impl AssetsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level folder. A repeated name replaces the earlier entry in place.
    pub fn with_folder(mut self, name: impl Into<String>, folder: FolderConfig) -> Self {
        self.insert(name.into(), folder);
        self
    }

    fn insert(&mut self, name: String, folder: FolderConfig) {
        match self.folders.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = folder,
            None => self.folders.push((name, folder)),
        }
    }

    /// Iterate top-level folders in configuration order.
    pub fn folders(&self) -> impl Iterator<Item = (&str, &FolderConfig)> {
        self.folders
            .iter()
            .map(|(name, folder)| (name.as_str(), folder))
    }

    pub fn get(&self, name: &str) -> Option<&FolderConfig> {
        self.folders
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, folder)| folder)
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Restrict the configuration to a single asset group.
    pub fn only(&self, group: &str) -> Result<Self> {
        let folder = self.get(group).ok_or_else(|| Error::UnknownGroup {
            name: group.to_string(),
        })?;
        Ok(Self::new().with_folder(group, folder.clone()))
    }

    /// Every bucket named anywhere in the configuration, first-seen order.
    ///
    /// Folders are visited in configuration order and each folder's nested
    /// entries depth-first by name.
    pub fn buckets(&self) -> Vec<String> {
        let mut buckets: Vec<String> = Vec::new();
        let mut stack: Vec<&FolderConfig> = self.folders.iter().rev().map(|(_, f)| f).collect();

        while let Some(folder) = stack.pop() {
            if let Some(bucket) = folder.settings.bucket.as_deref()
                && !bucket.is_empty()
                && !buckets.iter().any(|known| known == bucket)
            {
                buckets.push(bucket.to_string());
            }
            stack.extend(folder.children.values().rev());
        }

        buckets
    }
}

impl<'de> Deserialize<'de> for FolderConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FolderConfigVisitor)
    }
}

struct FolderConfigVisitor;

impl<'de> Visitor<'de> for FolderConfigVisitor {
    type Value = FolderConfig;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of asset settings and nested entries")
    }

    // `public:` with no value in YAML
    fn visit_unit<E: de::Error>(self) -> std::result::Result<FolderConfig, E> {
        Ok(FolderConfig::default())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<FolderConfig, E> {
        Ok(FolderConfig::default())
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<FolderConfig, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut folder = FolderConfig::default();
        let settings = &mut folder.settings;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "bucket" => settings.bucket = Some(map.next_value()?),
                "acl" => settings.acl = Some(map.next_value()?),
                "isPublic" => settings.is_public = Some(map.next_value()?),
                "cacheControl" => settings.cache_control = Some(map.next_value()?),
                "cacheTime" => settings.cache_time = Some(map.next_value()?),
                "contentType" => settings.content_type = Some(map.next_value()?),
                "metadata" => settings.metadata = Some(map.next_value()?),
                _ => {
                    let child: FolderConfig = map.next_value()?;
                    folder.children.insert(key, child);
                }
            }
        }

        Ok(folder)
    }
}

impl<'de> Deserialize<'de> for AssetsConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AssetsConfigVisitor)
    }
}

struct AssetsConfigVisitor;

impl<'de> Visitor<'de> for AssetsConfigVisitor {
    type Value = AssetsConfig;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of folder names to asset settings")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<AssetsConfig, E> {
        Ok(AssetsConfig::default())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<AssetsConfig, E> {
        Ok(AssetsConfig::default())
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<AssetsConfig, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut config = AssetsConfig::default();
        while let Some((name, folder)) = map.next_entry::<String, FolderConfig>()? {
            config.insert(name, folder);
        }
        Ok(config)
    }
}
