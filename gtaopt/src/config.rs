//! Tool configuration.
//!
//! Loaded from `.gtaopt.toml` in the working directory unless another path is
//! given with `--config`. Every key is optional.
//!
//! ```toml
//! output = "optimized_settings.xml"
//! max_file_size = 500000
//! accepted_extensions = ["xml"]
//! backup = true
//! ```

use std::path::Path;

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = ".gtaopt.toml";

/// Options for loading and exporting settings documents.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct OptConfig {
    /// File the edited document is written to when no `--output` is given.
    pub output: String,
    /// Largest accepted input document, in bytes.
    pub max_file_size: u64,
    /// Accepted input file extensions, without the dot.
    pub accepted_extensions: Vec<String>,
    /// Copy an existing output file aside before overwriting it.
    pub backup: bool,
}

impl Default for OptConfig {
    fn default() -> Self {
        Self {
            output: "optimized_settings.xml".to_string(),
            max_file_size: 500_000,
            accepted_extensions: vec!["xml".to_string()],
            backup: true,
        }
    }
}

impl OptConfig {
    /// Load the configuration at `path`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// JSON Schema of the configuration file.
    pub fn json_schema() -> anyhow::Result<serde_json::Value> {
        let schema = schemars::schema_for!(OptConfig);
        Ok(serde_json::to_value(&schema)?)
    }

    /// Whether `path` has one of the accepted extensions (case-insensitive).
    pub fn accepts_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            return false;
        };
        self.accepted_extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = OptConfig::from_toml("output = \"out.xml\"\nbackup = false\n").unwrap();
        assert_eq!(config.output, "out.xml");
        assert!(!config.backup);
        assert_eq!(config.max_file_size, 500_000);
        assert_eq!(config.accepted_extensions, ["xml"]);
    }

    #[test]
    fn test_unknown_types_rejected() {
        assert!(OptConfig::from_toml("max_file_size = \"big\"").is_err());
    }

    #[test]
    fn test_accepts_extension() {
        let config = OptConfig::default();
        assert!(config.accepts_extension(Path::new("settings.xml")));
        assert!(config.accepts_extension(Path::new("SETTINGS.XML")));
        assert!(!config.accepts_extension(Path::new("settings.json")));
        assert!(!config.accepts_extension(Path::new("settings")));
    }

    #[test]
    fn test_json_schema_lists_fields() {
        let schema = OptConfig::json_schema().unwrap();
        let properties = &schema["properties"];
        for key in ["output", "max_file_size", "accepted_extensions", "backup"] {
            assert!(properties.get(key).is_some(), "{key}");
        }
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = OptConfig::load(&dir.path().join(".gtaopt.toml")).await.unwrap();
        assert_eq!(config, OptConfig::default());
    }
}
