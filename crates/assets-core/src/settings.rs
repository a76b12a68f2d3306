//! Resolved asset settings and the overrides merged into them
//!
//! Every node of a [`SettingsTree`](crate::SettingsTree) carries a
//! [`Settings`] value. A child starts from a copy of its parent's settings and
//! merges its own [`SettingsOverride`] on top. Merging never mutates: it
//! returns a new value, so children can never alias parent state.
//!
//! Defaults are applied when a field is read, not when it is merged.

use std::collections::BTreeMap;

/// ACL used when none is configured.
pub const DEFAULT_ACL: &str = "private";

/// ACL selected by `isPublic: true`.
pub const PUBLIC_READ_ACL: &str = "public-read";

/// Cache-Control header used when none is configured.
pub const DEFAULT_CACHE_CONTROL: &str = "max-age=0";

/// Content type used when neither the extension nor the config provides one.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Settings as written in configuration for one folder or file.
///
/// Every field is optional; absent fields are inherited from the parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverride {
    pub bucket: Option<String>,
    pub acl: Option<String>,

    /// Sugar for `acl`: `true` selects `public-read`, `false` selects `private`.
    /// Applied after `acl`.
    pub is_public: Option<bool>,

    pub cache_control: Option<String>,

    /// Sugar for `cacheControl: "max-age=N"`. Applied after `cacheControl`.
    pub cache_time: Option<u64>,

    pub content_type: Option<String>,

    /// Replaces the inherited metadata wholesale when present.
    pub metadata: Option<BTreeMap<String, String>>,
}

/// Settings resolved for one node after inheritance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    bucket: Option<String>,
    acl: Option<String>,
    cache_control: Option<String>,
    content_type: Option<String>,
    metadata: Option<BTreeMap<String, String>>,
}

impl Settings {
    /// Create empty settings, where every accessor returns its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of these settings with `overrides` merged on top.
    ///
    /// Empty strings are treated as absent, so `bucket: ""` does not clear an
    /// inherited bucket.
    pub fn merged(&self, overrides: &SettingsOverride) -> Self {
        let mut next = self.clone();

        if let Some(bucket) = non_empty(&overrides.bucket) {
            next.bucket = Some(bucket);
        }

        if let Some(acl) = non_empty(&overrides.acl) {
            next.acl = Some(acl);
        }
        match overrides.is_public {
            Some(true) => next.acl = Some(PUBLIC_READ_ACL.to_string()),
            Some(false) => next.acl = Some(DEFAULT_ACL.to_string()),
            None => {}
        }

        if let Some(cache_control) = non_empty(&overrides.cache_control) {
            next.cache_control = Some(cache_control);
        }
        if let Some(seconds) = overrides.cache_time {
            next.cache_control = Some(format!("max-age={}", seconds));
        }

        if let Some(content_type) = non_empty(&overrides.content_type) {
            next.content_type = Some(content_type);
        }

        if let Some(metadata) = &overrides.metadata {
            next.metadata = Some(metadata.clone());
        }

        next
    }

    /// Destination bucket, if any level configured one.
    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    pub fn acl(&self) -> &str {
        self.acl.as_deref().unwrap_or(DEFAULT_ACL)
    }

    pub fn cache_control(&self) -> &str {
        self.cache_control.as_deref().unwrap_or(DEFAULT_CACHE_CONTROL)
    }

    /// Configured content type, before extension-based detection.
    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        static EMPTY: BTreeMap<String, String> = BTreeMap::new();
        self.metadata.as_ref().unwrap_or(&EMPTY)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn metadata(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_settings_read_as_defaults() {
        let settings = Settings::new();

        assert_eq!(settings.bucket(), None);
        assert_eq!(settings.acl(), "private");
        assert_eq!(settings.cache_control(), "max-age=0");
        assert_eq!(settings.content_type(), "text/plain");
        assert!(settings.metadata().is_empty());
    }

    #[rstest]
    #[case(Some("authenticated-read"), Some(true), "public-read")]
    #[case(Some("public-read"), Some(false), "private")]
    #[case(Some("authenticated-read"), None, "authenticated-read")]
    #[case(None, Some(true), "public-read")]
    fn is_public_is_applied_after_acl(
        #[case] acl: Option<&str>,
        #[case] is_public: Option<bool>,
        #[case] expected: &str,
    ) {
        let overrides = SettingsOverride {
            acl: acl.map(str::to_string),
            is_public,
            ..Default::default()
        };

        assert_eq!(Settings::new().merged(&overrides).acl(), expected);
    }

    #[test]
    fn cache_time_wins_over_cache_control() {
        let overrides = SettingsOverride {
            cache_control: Some("no-cache".into()),
            cache_time: Some(1024),
            ..Default::default()
        };

        assert_eq!(Settings::new().merged(&overrides).cache_control(), "max-age=1024");
    }

    #[test]
    fn later_merge_wins_per_field() {
        let first = SettingsOverride {
            bucket: Some("first".into()),
            is_public: Some(true),
            ..Default::default()
        };
        let second = SettingsOverride {
            acl: Some("bucket-owner-read".into()),
            ..Default::default()
        };

        let settings = Settings::new().merged(&first).merged(&second);

        assert_eq!(settings.bucket(), Some("first"));
        assert_eq!(settings.acl(), "bucket-owner-read");
    }

    #[test]
    fn metadata_is_replaced_not_merged() {
        let parent = Settings::new().merged(&SettingsOverride {
            metadata: Some(metadata(&[("team", "web"), ("env", "prod")])),
            ..Default::default()
        });

        let child = parent.merged(&SettingsOverride {
            metadata: Some(metadata(&[("env", "staging")])),
            ..Default::default()
        });

        assert_eq!(child.metadata(), &metadata(&[("env", "staging")]));
        assert_eq!(parent.metadata(), &metadata(&[("team", "web"), ("env", "prod")]));
    }

    #[test]
    fn empty_strings_do_not_clear_inherited_values() {
        let parent = Settings::new().merged(&SettingsOverride {
            bucket: Some("assets".into()),
            ..Default::default()
        });

        let child = parent.merged(&SettingsOverride {
            bucket: Some(String::new()),
            ..Default::default()
        });

        assert_eq!(child.bucket(), Some("assets"));
    }

    #[test]
    fn merging_empty_override_is_identity() {
        let settings = Settings::new().merged(&SettingsOverride {
            bucket: Some("assets".into()),
            cache_time: Some(60),
            ..Default::default()
        });

        assert_eq!(settings.merged(&SettingsOverride::default()), settings);
    }
}
