/*
 * Codegraph DDG - Data Dependence Graph construction
 *
 * Feature-First Hexagonal Architecture:
 * - features/flow_graph : CFG input model (nodes, terminal states, action traces)
 * - features/data_flow  : live definitions → node tracker → dependence graph
 * - config/             : presets, builder overrides, YAML
 *
 * Pipeline:
 * - Worklist fixpoint over the CFG
 * - Each terminal state's trace replayed against the node's live definitions
 * - def→use edges merged per (source, target) pair
 */

#![allow(clippy::upper_case_acronyms)] // DDG, CFG naming
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Feature modules (flow graph input, data dependence)
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{DDGConfig, MemoryMatching, Preset, WorklistStrategy};
pub use errors::{DdgError, Result};
pub use features::data_flow::application::BuildDDGUseCase;
pub use features::data_flow::domain::{
    Access, Action, ActionKind, CodeLocation, DependenceEdge, DependenceKind, Dependencies,
    EdgeDatum, EdgeSubtype, ResolvedAddresses, TempId, Variable, VariableKind,
};
pub use features::data_flow::infrastructure::{
    ConstructionStats, DDGBuilder, DDGStats, DataDependenceGraph, DependenceGraph,
};
pub use features::data_flow::ports::{DDGAnalyzer, FixpointDDGAnalyzer};
pub use features::flow_graph::domain::{ExecutionState, TransitionKind};
pub use features::flow_graph::infrastructure::InMemoryCfg;
pub use features::flow_graph::ports::{ControlFlowGraph, TerminalState};
