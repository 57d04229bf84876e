//! Error types for codegraph-ddg
//!
//! Two classes of failure are fatal and surface here:
//! - configuration errors (bad entry address, invalid settings)
//! - internal invariant violations found while replaying a trace
//!
//! Unresolvable transitions are not errors. The fixpoint driver skips and
//! logs them.

use crate::config::ConfigError;
use crate::features::data_flow::domain::{CodeLocation, TempId};
use thiserror::Error;

/// Main error type for DDG construction
#[derive(Debug, Error)]
pub enum DdgError {
    /// The requested entry address has no CFG node
    #[error("No CFG node at entry address {address:#x}")]
    MissingEntryNode { address: u64 },

    /// A temporary was read before any write to it in the same trace
    #[error("Temporary t{tmp} read at {location} before it was written")]
    UndefinedTemporary { tmp: TempId, location: CodeLocation },

    /// Any other broken internal invariant
    #[error("Invariant violation: {0}")]
    Invariant(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DdgError {
    /// Create an invariant violation error
    pub fn invariant(msg: impl Into<String>) -> Self {
        DdgError::Invariant(msg.into())
    }

    /// True for errors caused by the caller's configuration rather than the analysis
    pub fn is_configuration(&self) -> bool {
        matches!(self, DdgError::MissingEntryNode { .. } | DdgError::Config(_))
    }
}

/// Result type alias for DDG operations
pub type Result<T> = std::result::Result<T, DdgError>;
