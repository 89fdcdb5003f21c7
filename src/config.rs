//! Discoverable configuration describing how stylesheets are embedded.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::classify::AttributeMode;

const DEFAULT_CONFIG_FILE: &str = "embed.config.json";

/// Project configuration controlling stylesheet embedding.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Directory containing the assets referenced by stylesheets.
    pub resource_dir: String,
    /// Logical mount path stylesheets are served under.
    pub mount_location: String,
    /// Whether `src` declarations are treated as URL carriers alongside
    /// `background-image`.
    pub include_src_attributes: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            resource_dir: "static".into(),
            mount_location: "css/site.css".into(),
            include_src_attributes: false,
        }
    }
}

impl EmbedConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// When the configuration file does not exist or fails to parse we fall
    /// back to default values so downstream callers can continue operating
    /// with sensible assumptions.
    pub fn discover(dir: &Path) -> Self {
        Self::from_path(&dir.join(DEFAULT_CONFIG_FILE)).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Attribute set the classifier should recognise.
    pub fn attribute_mode(&self) -> AttributeMode {
        if self.include_src_attributes {
            AttributeMode::AllUrls
        } else {
            AttributeMode::ImagesOnly
        }
    }

    /// Resource directory as a path.
    pub fn resource_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.resource_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn defaults_when_no_config_file_exists() {
        let dir = tempdir().unwrap();

        let config = EmbedConfig::discover(dir.path());

        assert_eq!(config.resource_dir, "static");
        assert_eq!(config.mount_location, "css/site.css");
        assert_eq!(config.attribute_mode(), AttributeMode::ImagesOnly);
    }

    #[test]
    fn reads_overrides_from_json() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("embed.config.json"),
            r#"{"resource_dir": "assets", "include_src_attributes": true}"#,
        )
        .unwrap();

        let config = EmbedConfig::discover(dir.path());

        assert_eq!(config.resource_dir, "assets");
        assert_eq!(config.mount_location, "css/site.css");
        assert_eq!(config.attribute_mode(), AttributeMode::AllUrls);
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("embed.config.json"), "{not json").unwrap();

        let config = EmbedConfig::discover(dir.path());

        assert_eq!(config.resource_dir, "static");
    }
}
