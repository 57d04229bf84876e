//! Program points

use serde::{Deserialize, Serialize};
use std::fmt;

/// A program point: a statement inside a basic block, or a called stub
/// that models external behavior and has no block address of its own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CodeLocation {
    Statement { block_addr: u64, stmt_idx: usize },
    Stub { name: String },
}

impl CodeLocation {
    pub fn statement(block_addr: u64, stmt_idx: usize) -> Self {
        CodeLocation::Statement {
            block_addr,
            stmt_idx,
        }
    }

    pub fn stub(name: impl Into<String>) -> Self {
        CodeLocation::Stub { name: name.into() }
    }

    /// Block address, if this is a statement location
    pub fn block_addr(&self) -> Option<u64> {
        match self {
            CodeLocation::Statement { block_addr, .. } => Some(*block_addr),
            CodeLocation::Stub { .. } => None,
        }
    }
}

impl fmt::Display for CodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeLocation::Statement {
                block_addr,
                stmt_idx,
            } => write!(f, "({:#x}, {})", block_addr, stmt_idx),
            CodeLocation::Stub { name } => write!(f, "<stub {}>", name),
        }
    }
}
