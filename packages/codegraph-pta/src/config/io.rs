//! Configuration I/O (YAML loading)
//!
//! YAML schema v1:
//! ```yaml
//! version: 1
//! preset: balanced
//! pta:                 # optional, replaces the preset's settings
//!   policy: call-site
//!   context_depth: 2
//!   heap_context_depth: 1
//!   worklist_order: lifo
//!   extra_entries: ["<Main: void <clinit>()>"]
//! ```

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::pta_config::PTAConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    /// Base preset
    #[serde(default)]
    pub preset: Option<String>,

    /// Full override of the preset's settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pta: Option<PTAConfig>,
}

impl PTAConfig {
    /// Parse a v1 YAML document and validate the result
    pub fn from_yaml_str(content: &str) -> ConfigResult<PTAConfig> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        match file.version {
            None => return Err(ConfigError::MissingVersion),
            Some(v) if !SUPPORTED_VERSIONS.contains(&v) => {
                return Err(ConfigError::UnsupportedVersion {
                    found: v,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => {}
        }

        let preset = match file.preset.as_deref() {
            Some(name) => Preset::from_str(name)?,
            None => Preset::default(),
        };

        let config = file
            .pta
            .unwrap_or_else(|| PTAConfig::from_preset(preset));
        config.validate()?;
        Ok(config)
    }

    /// Load from YAML file (v1 schema)
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<PTAConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Export to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            preset: None,
            pta: Some(self.clone()),
        };
        serde_yaml::to_string(&file).map_err(ConfigError::Yaml)
    }
}
