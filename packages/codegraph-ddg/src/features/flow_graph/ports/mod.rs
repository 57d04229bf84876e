//! Flow graph ports
//!
//! What DDG construction needs from its CFG collaborator. The graph and
//! its states are read-only for the whole analysis.

use crate::features::data_flow::domain::Action;
use crate::features::flow_graph::domain::{ExecutionState, TransitionKind};
use std::fmt::Debug;
use std::hash::Hash;

/// A terminal state recorded at a CFG node
pub trait TerminalState {
    fn transition_kind(&self) -> TransitionKind;

    /// Concrete successor address, `None` when the instruction pointer is undecidable
    fn resolved_target_address(&self) -> Option<u64>;

    /// Ordered action log of the path that reached this state
    fn action_trace(&self) -> &[Action];
}

/// Control flow graph with per-node terminal states
pub trait ControlFlowGraph {
    /// Stable node identifier
    type Node: Copy + Eq + Hash + Debug;
    type State: TerminalState;

    /// The program's designated entry point
    fn entry_address(&self) -> u64;

    /// Any node starting at `addr`
    fn node_at(&self, addr: u64) -> Option<Self::Node>;

    fn node_address(&self, node: Self::Node) -> u64;

    fn successors(&self, node: Self::Node) -> Vec<Self::Node>;

    fn terminal_states(&self, node: Self::Node) -> &[Self::State];
}

impl TerminalState for ExecutionState {
    fn transition_kind(&self) -> TransitionKind {
        self.transition
    }

    fn resolved_target_address(&self) -> Option<u64> {
        self.target
    }

    fn action_trace(&self) -> &[Action] {
        &self.actions
    }
}
