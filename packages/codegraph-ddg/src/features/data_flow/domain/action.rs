//! Action trace model
//!
//! One CFG node's execution produces an ordered log of actions: reads and
//! writes of temporaries, registers and memory, plus control transfers.
//! Each action knows which temporaries and registers fed its address and
//! data expressions.

use super::code_location::CodeLocation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Temporary id, local to one trace
pub type TempId = u32;

/// Register offset in the guest register file
pub type RegOffset = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Access {
    Read,
    Write,
}

/// Structural fan-in of an expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    pub temps: Vec<TempId>,
    pub registers: Vec<RegOffset>,
}

impl Dependencies {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn temps(temps: impl IntoIterator<Item = TempId>) -> Self {
        Self {
            temps: temps.into_iter().collect(),
            registers: Vec::new(),
        }
    }

    pub fn registers(registers: impl IntoIterator<Item = RegOffset>) -> Self {
        Self {
            temps: Vec::new(),
            registers: registers.into_iter().collect(),
        }
    }

    pub fn with_temp(mut self, tmp: TempId) -> Self {
        self.temps.push(tmp);
        self
    }

    pub fn with_register(mut self, offset: RegOffset) -> Self {
        self.registers.push(offset);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.temps.is_empty() && self.registers.is_empty()
    }
}

/// Concrete address(es) of a memory access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedAddresses {
    /// The address expression concretized to one value
    Single(u64),
    /// The engine reported an explicit set (e.g. a table lookup)
    Set(BTreeSet<u64>),
}

impl ResolvedAddresses {
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        let (single, set) = match self {
            ResolvedAddresses::Single(addr) => (Some(*addr), None),
            ResolvedAddresses::Set(addrs) => (None, Some(addrs.iter().copied())),
        };
        single.into_iter().chain(set.into_iter().flatten())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Temporary {
        tmp: TempId,
        access: Access,
    },
    Register {
        offset: RegOffset,
        size: u32,
        access: Access,
        data_deps: Dependencies,
    },
    Memory {
        access: Access,
        addresses: ResolvedAddresses,
        size: u32,
        addr_deps: Dependencies,
        data_deps: Dependencies,
    },
    /// Exit of the node; the target expression depends only on temporaries
    ControlTransfer {
        target_deps: Vec<TempId>,
    },
}

/// One event of a trace, at the program point that performed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub location: CodeLocation,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(location: CodeLocation, kind: ActionKind) -> Self {
        Self { location, kind }
    }

    pub fn tmp_read(location: CodeLocation, tmp: TempId) -> Self {
        Self::new(
            location,
            ActionKind::Temporary {
                tmp,
                access: Access::Read,
            },
        )
    }

    pub fn tmp_write(location: CodeLocation, tmp: TempId) -> Self {
        Self::new(
            location,
            ActionKind::Temporary {
                tmp,
                access: Access::Write,
            },
        )
    }

    pub fn reg_read(location: CodeLocation, offset: RegOffset, size: u32) -> Self {
        Self::new(
            location,
            ActionKind::Register {
                offset,
                size,
                access: Access::Read,
                data_deps: Dependencies::none(),
            },
        )
    }

    pub fn reg_write(location: CodeLocation, offset: RegOffset, size: u32) -> Self {
        Self::reg_write_from(location, offset, size, Dependencies::none())
    }

    pub fn reg_write_from(
        location: CodeLocation,
        offset: RegOffset,
        size: u32,
        data_deps: Dependencies,
    ) -> Self {
        Self::new(
            location,
            ActionKind::Register {
                offset,
                size,
                access: Access::Write,
                data_deps,
            },
        )
    }

    pub fn mem_read(location: CodeLocation, addr: u64, size: u32) -> Self {
        Self::mem_access(
            location,
            Access::Read,
            ResolvedAddresses::Single(addr),
            size,
            Dependencies::none(),
            Dependencies::none(),
        )
    }

    pub fn mem_write(location: CodeLocation, addr: u64, size: u32) -> Self {
        Self::mem_access(
            location,
            Access::Write,
            ResolvedAddresses::Single(addr),
            size,
            Dependencies::none(),
            Dependencies::none(),
        )
    }

    pub fn mem_access(
        location: CodeLocation,
        access: Access,
        addresses: ResolvedAddresses,
        size: u32,
        addr_deps: Dependencies,
        data_deps: Dependencies,
    ) -> Self {
        Self::new(
            location,
            ActionKind::Memory {
                access,
                addresses,
                size,
                addr_deps,
                data_deps,
            },
        )
    }

    pub fn exit(location: CodeLocation, target_deps: impl IntoIterator<Item = TempId>) -> Self {
        Self::new(
            location,
            ActionKind::ControlTransfer {
                target_deps: target_deps.into_iter().collect(),
            },
        )
    }
}
