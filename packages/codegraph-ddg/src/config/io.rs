//! Configuration I/O (YAML loading)
//!
//! Schema v1:
//!
//! ```yaml
//! version: 1
//! preset: balanced
//! overrides:
//!   retain_data: true
//!   memory_matching: overlapping
//! ```

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::stage_configs::{DDGConfig, MemoryMatching, WorklistStrategy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Base preset
    #[serde(default = "default_preset_name")]
    pub preset: String,

    /// Fine-grained overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<DDGConfigPatch>,
}

fn default_preset_name() -> String {
    Preset::default().as_str().to_string()
}

/// Partial DDG configuration; unset fields keep the preset's value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DDGConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_address: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retain_data: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_matching: Option<MemoryMatching>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub worklist: Option<WorklistStrategy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
}

impl DDGConfigPatch {
    /// Apply the set fields on top of `base`
    pub fn apply(&self, mut base: DDGConfig) -> DDGConfig {
        if let Some(addr) = self.start_address {
            base.start_address = Some(addr);
        }
        if let Some(v) = self.retain_data {
            base.retain_data = v;
        }
        if let Some(v) = self.memory_matching {
            base.memory_matching = v;
        }
        if let Some(v) = self.worklist {
            base.worklist = v;
        }
        if let Some(v) = self.max_iterations {
            base.max_iterations = v;
        }
        base
    }
}

impl DDGConfig {
    /// Load and validate a configuration from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a configuration from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = Preset::parse(&export.preset)?;
        let base = DDGConfig::from_preset(preset);
        let config = match &export.overrides {
            Some(patch) => patch.apply(base),
            None => base,
        };

        config.validate()?;
        Ok(config)
    }

    /// Export as YAML (schema v1) relative to the given preset
    pub fn to_yaml(&self, preset: Preset) -> ConfigResult<String> {
        let base = DDGConfig::from_preset(preset);
        let patch = DDGConfigPatch {
            start_address: self.start_address.filter(|_| self.start_address != base.start_address),
            retain_data: Some(self.retain_data).filter(|v| *v != base.retain_data),
            memory_matching: Some(self.memory_matching).filter(|v| *v != base.memory_matching),
            worklist: Some(self.worklist).filter(|v| *v != base.worklist),
            max_iterations: Some(self.max_iterations).filter(|v| *v != base.max_iterations),
        };

        let export = ConfigExportV1 {
            version: Some(1),
            preset: preset.as_str().to_string(),
            overrides: if patch == DDGConfigPatch::default() {
                None
            } else {
                Some(patch)
            },
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}
