/*
 * DDG Builder (fixpoint driver)
 *
 * Forward dataflow over the CFG:
 * - FIFO worklist seeded with the entry node and everything reachable from it
 * - each terminal state is replayed by the NodeTracker against the node's
 *   live-definition snapshot
 * - the resulting definitions are merged into the successor's snapshot;
 *   growth re-enqueues the successor (and, in Transitive mode, every node
 *   reachable from it)
 *
 * Termination: snapshots only grow, and each variable's definer set is
 * bounded by the number of code locations.
 *
 * Unsound on purpose: states whose target cannot be resolved to a CFG
 * successor are dropped.
 */

use crate::config::{DDGConfig, WorklistStrategy};
use crate::errors::{DdgError, Result};
use crate::features::flow_graph::ports::{ControlFlowGraph, TerminalState};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use tracing::{debug, info, trace};

use super::ddg::DependenceGraph;
use super::live_defs::LiveDefinitions;
use super::node_tracker::NodeTracker;
use crate::features::data_flow::domain::CodeLocation;

/// Counters collected while building
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstructionStats {
    /// Worklist pops
    pub iterations: usize,
    /// Terminal states replayed
    pub states_tracked: usize,
    /// Terminal states dropped (speculative, unresolved or unmatched)
    pub states_skipped: usize,
    /// Edge insertions that created a new edge
    pub edges_created: usize,
    /// Edge insertions merged into an existing edge
    pub edges_merged: usize,
}

/// Result of DDG construction
#[derive(Debug, Clone)]
pub struct DataDependenceGraph {
    graph: DependenceGraph,
    stats: ConstructionStats,
}

impl DataDependenceGraph {
    /// Build the DDG of `cfg` with `config`
    pub fn build<G: ControlFlowGraph>(cfg: &G, config: DDGConfig) -> Result<Self> {
        DDGBuilder::new(cfg, config).build()
    }

    pub fn graph(&self) -> &DependenceGraph {
        &self.graph
    }

    pub fn into_graph(self) -> DependenceGraph {
        self.graph
    }

    pub fn stats(&self) -> ConstructionStats {
        self.stats
    }

    pub fn predecessors(&self, location: &CodeLocation) -> Vec<&CodeLocation> {
        self.graph.predecessors(location)
    }

    pub fn contains(&self, location: &CodeLocation) -> bool {
        self.graph.contains(location)
    }

    /// Debug dump, not a stable format
    pub fn dbg_repr(&self) -> String {
        format!(
            "DDG ({} nodes, {} edges, {} iterations)\n{}",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.stats.iterations,
            self.graph
        )
    }
}

/// FIFO worklist with O(1) membership test
struct Worklist<N> {
    queue: VecDeque<N>,
    queued: FxHashSet<N>,
}

impl<N: Copy + Eq + std::hash::Hash> Worklist<N> {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            queued: FxHashSet::default(),
        }
    }

    fn push(&mut self, node: N) -> bool {
        if self.queued.insert(node) {
            self.queue.push_back(node);
            true
        } else {
            false
        }
    }

    fn pop(&mut self) -> Option<N> {
        let node = self.queue.pop_front()?;
        self.queued.remove(&node);
        Some(node)
    }
}

/// Nodes reachable from `start` (excluding it), DFS preorder
fn reachable_from<G: ControlFlowGraph>(cfg: &G, start: G::Node) -> Vec<G::Node> {
    let mut visited: FxHashSet<G::Node> = FxHashSet::default();
    let mut order = Vec::new();
    let mut stack = vec![start];
    visited.insert(start);

    while let Some(node) = stack.pop() {
        if node != start {
            order.push(node);
        }
        // reversed so the first successor is visited first
        for succ in cfg.successors(node).into_iter().rev() {
            if visited.insert(succ) {
                stack.push(succ);
            }
        }
    }

    order
}

pub struct DDGBuilder<'g, G: ControlFlowGraph> {
    cfg: &'g G,
    config: DDGConfig,
}

impl<'g, G: ControlFlowGraph> DDGBuilder<'g, G> {
    pub fn new(cfg: &'g G, config: DDGConfig) -> Self {
        Self { cfg, config }
    }

    /// Run the fixpoint to completion
    ///
    /// # Errors
    ///
    /// - `DdgError::Config` if the configuration does not validate
    /// - `DdgError::MissingEntryNode` if no CFG node starts at the entry address
    /// - `DdgError::UndefinedTemporary` if a trace reads a temporary it never wrote
    /// - `DdgError::Invariant` if `max_iterations` is exceeded
    pub fn build(&self) -> Result<DataDependenceGraph> {
        self.config.validate()?;

        let start = self
            .config
            .start_address
            .unwrap_or_else(|| self.cfg.entry_address());
        let entry = self
            .cfg
            .node_at(start)
            .ok_or(DdgError::MissingEntryNode { address: start })?;

        info!("Building DDG from {:#x}", start);

        let tracker = NodeTracker::from_config(&self.config);
        let mut graph = DependenceGraph::new();
        let mut stats = ConstructionStats::default();
        let mut live_defs_per_node: FxHashMap<G::Node, LiveDefinitions> = FxHashMap::default();

        let mut worklist = Worklist::new();
        worklist.push(entry);
        for node in reachable_from(self.cfg, entry) {
            worklist.push(node);
        }

        while let Some(node) = worklist.pop() {
            stats.iterations += 1;
            if stats.iterations > self.config.max_iterations {
                return Err(DdgError::invariant(format!(
                    "fixpoint did not converge within {} iterations",
                    self.config.max_iterations
                )));
            }

            // Snapshot taken before any merge, so a self-loop sees a stable input
            let live_defs = live_defs_per_node.entry(node).or_default().clone();
            let final_states = self.cfg.terminal_states(node);
            let successors = self.cfg.successors(node);

            for state in final_states {
                if state.transition_kind().is_speculative() && final_states.len() > 1 {
                    debug!("{:?}: skipping speculative fall-through state", node);
                    stats.states_skipped += 1;
                    continue;
                }

                let Some(target) = state.resolved_target_address() else {
                    debug!("{:?}: skipping state with undecidable target", node);
                    stats.states_skipped += 1;
                    continue;
                };

                let Some(successor) = successors
                    .iter()
                    .copied()
                    .find(|s| self.cfg.node_address(*s) == target)
                else {
                    debug!("{:?}: no successor at {:#x}", node, target);
                    stats.states_skipped += 1;
                    continue;
                };

                let outcome = tracker.replay(state.action_trace(), &live_defs)?;
                stats.states_tracked += 1;

                for edge in outcome.edges {
                    trace!("Edge: {} --> {}", edge.source, edge.target);
                    if graph.add_edge(edge.source, edge.target, edge.labels) {
                        stats.edges_created += 1;
                    } else {
                        stats.edges_merged += 1;
                    }
                }

                let merged = live_defs_per_node
                    .entry(successor)
                    .or_default()
                    .merge_from(&outcome.live_defs);

                if merged.changed() {
                    debug!(
                        "{:#x}: snapshot grew ({} vars, {} locations)",
                        target, merged.new_variables, merged.new_locations
                    );
                    worklist.push(successor);
                    if self.config.worklist == WorklistStrategy::Transitive {
                        for reachable in reachable_from(self.cfg, successor) {
                            worklist.push(reachable);
                        }
                    }
                }
            }
        }

        info!(
            "DDG built: {} nodes, {} edges, {} iterations, {} states skipped",
            graph.node_count(),
            graph.edge_count(),
            stats.iterations,
            stats.states_skipped
        );

        Ok(DataDependenceGraph { graph, stats })
    }
}
