//! Configuration system
//!
//! Two ways to configure DDG construction:
//! - Preset + builder overrides
//! - YAML (schema v1) on top of a preset
//!
//! # Examples
//!
//! ```rust,ignore
//! use codegraph_ddg::config::{DDGConfig, Preset};
//!
//! let config = DDGConfig::from_preset(Preset::Fast).retain_data(true);
//! let config = DDGConfig::from_yaml("ddg.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod preset;
pub mod stage_configs;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, DDGConfigPatch};
pub use preset::Preset;
pub use stage_configs::{DDGConfig, MemoryMatching, WorklistStrategy};
pub use validation::Validatable;
