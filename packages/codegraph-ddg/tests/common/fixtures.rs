//! Test fixtures
//!
//! Small CFGs mirroring common code shapes.

use super::builders::{loc, CfgBuilder};
use codegraph_ddg::{Action, ExecutionState, InMemoryCfg};

pub const REG_RAX: u64 = 16;
pub const REG_RBX: u64 = 40;

/// 0x1000 writes rax → 0x2000 reads rax → 0x3000
pub fn register_chain() -> InMemoryCfg {
    CfgBuilder::new(0x1000)
        .jump(
            0x1000,
            0x2000,
            vec![Action::reg_write(loc(0x1000, 2), REG_RAX, 8)],
        )
        .jump(
            0x2000,
            0x3000,
            vec![Action::reg_read(loc(0x2000, 0), REG_RAX, 8)],
        )
        .exit(0x3000)
        .edge(0x1000, 0x2000)
        .edge(0x2000, 0x3000)
        .build()
}

/// 0x1000 stores 4 bytes at 0x8000 → 0x2000 loads them → 0x3000
pub fn memory_chain() -> InMemoryCfg {
    CfgBuilder::new(0x1000)
        .jump(
            0x1000,
            0x2000,
            vec![Action::mem_write(loc(0x1000, 5), 0x8000, 4)],
        )
        .jump(
            0x2000,
            0x3000,
            vec![Action::mem_read(loc(0x2000, 1), 0x8000, 4)],
        )
        .exit(0x3000)
        .edge(0x1000, 0x2000)
        .edge(0x2000, 0x3000)
        .build()
}

/// 0x1000 → {0x2000, 0x3000} → 0x4000 → 0x5000
///
/// Both arms write rax, the join reads it.
pub fn register_diamond() -> InMemoryCfg {
    CfgBuilder::new(0x1000)
        .block(
            0x1000,
            vec![
                ExecutionState::jump(0x2000, vec![]),
                ExecutionState::jump(0x3000, vec![]),
            ],
        )
        .jump(
            0x2000,
            0x4000,
            vec![Action::reg_write(loc(0x2000, 0), REG_RAX, 8)],
        )
        .jump(
            0x3000,
            0x4000,
            vec![Action::reg_write(loc(0x3000, 0), REG_RAX, 8)],
        )
        .jump(
            0x4000,
            0x5000,
            vec![Action::reg_read(loc(0x4000, 0), REG_RAX, 8)],
        )
        .exit(0x5000)
        .edge(0x1000, 0x2000)
        .edge(0x1000, 0x3000)
        .edge(0x2000, 0x4000)
        .edge(0x3000, 0x4000)
        .edge(0x4000, 0x5000)
        .build()
}
