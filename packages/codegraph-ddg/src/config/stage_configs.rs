//! DDG stage configuration
//!
//! `DDGConfig` controls where construction starts, how edges are labeled and
//! how aggressively the fixpoint driver re-enqueues nodes.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};

/// How a memory read is matched against live memory definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryMatching {
    /// Address and size must match exactly
    Exact,
    /// Any live memory definition whose byte range overlaps the read reaches it.
    /// Kills stay exact.
    Overlapping,
}

/// Which nodes are re-enqueued when a node's incoming snapshot grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorklistStrategy {
    /// The changed node plus every node reachable from it
    Transitive,
    /// The changed node only
    DirectSuccessors,
}

/// DDG construction configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DDGConfig {
    /// Entry address (None = the CFG's designated entry)
    pub start_address: Option<u64>,

    /// Carry full variable identity on edges instead of cardinality counters
    pub retain_data: bool,

    /// Memory variable matching mode
    pub memory_matching: MemoryMatching,

    /// Worklist re-enqueue strategy
    pub worklist: WorklistStrategy,

    /// Maximum worklist pops before construction is aborted (1..=100000000)
    pub max_iterations: usize,
}

const MAX_ITERATIONS_LIMIT: usize = 100_000_000;

impl DDGConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_iterations == 0 || self.max_iterations > MAX_ITERATIONS_LIMIT {
            return Err(ConfigError::range_with_hint(
                "max_iterations",
                self.max_iterations,
                1,
                MAX_ITERATIONS_LIMIT,
                "The fixpoint always terminates on finite input; this is only a guard",
            ));
        }
        Ok(())
    }

    /// Builder: Set start_address
    pub fn start_address(mut self, addr: u64) -> Self {
        self.start_address = Some(addr);
        self
    }

    /// Builder: Set retain_data
    pub fn retain_data(mut self, v: bool) -> Self {
        self.retain_data = v;
        self
    }

    /// Builder: Set memory_matching
    pub fn memory_matching(mut self, v: MemoryMatching) -> Self {
        self.memory_matching = v;
        self
    }

    /// Builder: Set worklist
    pub fn worklist(mut self, v: WorklistStrategy) -> Self {
        self.worklist = v;
        self
    }

    /// Builder: Set max_iterations
    pub fn max_iterations(mut self, v: usize) -> Self {
        self.max_iterations = v;
        self
    }

    /// Create from preset
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                start_address: None,
                retain_data: false,
                memory_matching: MemoryMatching::Exact,
                worklist: WorklistStrategy::DirectSuccessors,
                max_iterations: 1_000_000,
            },
            Preset::Balanced => Self {
                start_address: None,
                retain_data: false,
                memory_matching: MemoryMatching::Exact,
                worklist: WorklistStrategy::Transitive,
                max_iterations: 10_000_000,
            },
            Preset::Thorough => Self {
                start_address: None,
                retain_data: true,
                memory_matching: MemoryMatching::Overlapping,
                worklist: WorklistStrategy::Transitive,
                max_iterations: MAX_ITERATIONS_LIMIT,
            },
        }
    }
}

impl Default for DDGConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl Validatable for DDGConfig {
    fn validate(&self) -> ConfigResult<()> {
        DDGConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "DDGConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_balanced() {
        let config = DDGConfig::default();
        assert_eq!(config, DDGConfig::from_preset(Preset::Balanced));
        assert!(!config.retain_data);
        assert_eq!(config.memory_matching, MemoryMatching::Exact);
        assert_eq!(config.worklist, WorklistStrategy::Transitive);
        assert!(config.start_address.is_none());
    }

    #[test]
    fn test_presets_validate() {
        for preset in [Preset::Fast, Preset::Balanced, Preset::Thorough] {
            assert!(DDGConfig::from_preset(preset).validate().is_ok());
        }
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = DDGConfig::default().max_iterations(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Range { ref field, .. }) if field == "max_iterations"
        ));
    }

    #[test]
    fn test_builder_chain() {
        let config = DDGConfig::default()
            .start_address(0x4000)
            .retain_data(true)
            .memory_matching(MemoryMatching::Overlapping)
            .worklist(WorklistStrategy::DirectSuccessors);

        assert_eq!(config.start_address, Some(0x4000));
        assert!(config.retain_data);
        assert_eq!(config.memory_matching, MemoryMatching::Overlapping);
        assert_eq!(config.worklist, WorklistStrategy::DirectSuccessors);
        assert_eq!(Validatable::config_name(&config), "DDGConfig");
    }
}
