//! Test data builders

use codegraph_ddg::{Action, CodeLocation, ControlFlowGraph, ExecutionState, InMemoryCfg};

/// Shorthand for a statement location
pub fn loc(block_addr: u64, stmt_idx: usize) -> CodeLocation {
    CodeLocation::statement(block_addr, stmt_idx)
}

/// Builder for InMemoryCfg, addressing blocks by address
#[derive(Debug)]
pub struct CfgBuilder {
    cfg: InMemoryCfg,
}

impl CfgBuilder {
    /// Create a new builder with the given entry address
    pub fn new(entry: u64) -> Self {
        Self {
            cfg: InMemoryCfg::new(entry),
        }
    }

    /// Add a block with its terminal states
    pub fn block(mut self, addr: u64, states: Vec<ExecutionState>) -> Self {
        self.cfg.add_block_with_states(addr, states);
        self
    }

    /// Add a block with a single plain transfer to `target`
    pub fn jump(self, addr: u64, target: u64, actions: Vec<Action>) -> Self {
        self.block(addr, vec![ExecutionState::jump(target, actions)])
    }

    /// Add a block without terminal states
    pub fn exit(self, addr: u64) -> Self {
        self.block(addr, Vec::new())
    }

    /// Add a CFG edge between two registered blocks
    pub fn edge(mut self, from: u64, to: u64) -> Self {
        let from = self.cfg.node_at(from).expect("edge source block");
        let to = self.cfg.node_at(to).expect("edge target block");
        self.cfg.add_edge(from, to);
        self
    }

    /// Build the final CFG
    pub fn build(self) -> InMemoryCfg {
        self.cfg
    }
}
