//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Minimal fast analysis
    ///
    /// - Worklist: direct successors only
    /// - Labels: cardinality counters
    Fast,

    /// Default analysis
    ///
    /// - Worklist: transitive re-enqueue of reachable nodes
    /// - Labels: cardinality counters
    Balanced,

    /// Diagnostic analysis
    ///
    /// - Worklist: transitive
    /// - Labels: full variable identity
    /// - Memory: overlapping ranges reach each other
    Thorough,
}

impl Preset {
    /// Parse preset from string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}
