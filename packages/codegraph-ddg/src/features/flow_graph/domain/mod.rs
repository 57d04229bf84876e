//! Control flow input models
//!
//! The CFG and the per-node terminal states are produced elsewhere (CFG
//! recovery + the execution engine). These types are the concrete shape a
//! host can hand over when it has no CFG of its own.

use crate::features::data_flow::domain::Action;
use serde::{Deserialize, Serialize};

/// How a terminal state leaves its node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Plain jump or fall-through
    Boring,
    Call,
    Return,
    Syscall,
    /// Speculative continuation after a call site, assuming the callee returns
    CallFallthrough,
}

impl TransitionKind {
    pub fn is_speculative(&self) -> bool {
        matches!(self, TransitionKind::CallFallthrough)
    }
}

/// One terminal machine state of a CFG node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionState {
    pub transition: TransitionKind,
    /// Concrete instruction pointer, if it could be resolved
    pub target: Option<u64>,
    pub actions: Vec<Action>,
}

impl ExecutionState {
    pub fn new(transition: TransitionKind, target: Option<u64>, actions: Vec<Action>) -> Self {
        Self {
            transition,
            target,
            actions,
        }
    }

    /// A plain transfer to `target`
    pub fn jump(target: u64, actions: Vec<Action>) -> Self {
        Self::new(TransitionKind::Boring, Some(target), actions)
    }
}
