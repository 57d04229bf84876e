//! Tracked storage: registers and memory

use serde::{Deserialize, Serialize};
use std::fmt;

/// A register or memory location, keyed by offset/address and size in bytes.
///
/// Equality is exact. Two memory variables that merely overlap are
/// different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Variable {
    Register { offset: u64, size: u32 },
    Memory { addr: u64, size: u32 },
}

/// Variable kind, used as the dependence category of lookup results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Register,
    Memory,
}

impl Variable {
    pub fn register(offset: u64, size: u32) -> Self {
        Variable::Register { offset, size }
    }

    pub fn memory(addr: u64, size: u32) -> Self {
        Variable::Memory { addr, size }
    }

    pub fn kind(&self) -> VariableKind {
        match self {
            Variable::Register { .. } => VariableKind::Register,
            Variable::Memory { .. } => VariableKind::Memory,
        }
    }

    pub fn size(&self) -> u32 {
        match self {
            Variable::Register { size, .. } | Variable::Memory { size, .. } => *size,
        }
    }

    /// True if both are memory variables whose byte ranges intersect
    pub fn overlaps(&self, other: &Variable) -> bool {
        match (self, other) {
            (
                Variable::Memory { addr: a, size: sa },
                Variable::Memory { addr: b, size: sb },
            ) => {
                let a_end = a.saturating_add(u64::from(*sa));
                let b_end = b.saturating_add(u64::from(*sb));
                *a < b_end && *b < a_end
            }
            _ => false,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Register { offset, size } => write!(f, "reg[{}:{}]", offset, size),
            Variable::Memory { addr, size } => write!(f, "mem[{:#x}:{}]", addr, size),
        }
    }
}
