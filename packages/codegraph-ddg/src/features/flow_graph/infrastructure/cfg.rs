/*
 * In-memory CFG
 *
 * petgraph-backed implementation of the ControlFlowGraph port:
 * - One graph node per basic block (address + terminal states)
 * - First block registered at an address answers node_at()
 * - Successors come back in insertion order
 */

use crate::features::flow_graph::domain::ExecutionState;
use crate::features::flow_graph::ports::ControlFlowGraph;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

/// Basic block with the terminal states recorded for it
#[derive(Debug, Clone)]
pub struct CfgBlock {
    pub addr: u64,
    pub states: Vec<ExecutionState>,
}

#[derive(Debug, Clone)]
pub struct InMemoryCfg {
    graph: DiGraph<CfgBlock, ()>,
    addr_map: HashMap<u64, NodeIndex>,
    entry: u64,
}

impl InMemoryCfg {
    pub fn new(entry: u64) -> Self {
        Self {
            graph: DiGraph::new(),
            addr_map: HashMap::new(),
            entry,
        }
    }

    /// Add a block at `addr`
    pub fn add_block(&mut self, addr: u64) -> NodeIndex {
        let idx = self.graph.add_node(CfgBlock {
            addr,
            states: Vec::new(),
        });
        self.addr_map.entry(addr).or_insert(idx);
        idx
    }

    /// Add a block at `addr` with its terminal states
    pub fn add_block_with_states(&mut self, addr: u64, states: Vec<ExecutionState>) -> NodeIndex {
        let idx = self.add_block(addr);
        self.graph[idx].states = states;
        idx
    }

    pub fn add_state(&mut self, node: NodeIndex, state: ExecutionState) {
        if let Some(block) = self.graph.node_weight_mut(node) {
            block.states.push(state);
        }
    }

    /// Add a control flow edge; duplicates are ignored
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, ());
        }
    }

    pub fn block(&self, node: NodeIndex) -> Option<&CfgBlock> {
        self.graph.node_weight(node)
    }

    pub fn block_count(&self) -> usize {
        self.graph.node_count()
    }
}

impl ControlFlowGraph for InMemoryCfg {
    type Node = NodeIndex;
    type State = ExecutionState;

    fn entry_address(&self) -> u64 {
        self.entry
    }

    fn node_at(&self, addr: u64) -> Option<NodeIndex> {
        self.addr_map.get(&addr).copied()
    }

    fn node_address(&self, node: NodeIndex) -> u64 {
        self.graph[node].addr
    }

    fn successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        // petgraph walks adjacency lists newest-first
        let mut succs: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .collect();
        succs.reverse();
        succs
    }

    fn terminal_states(&self, node: NodeIndex) -> &[ExecutionState] {
        &self.graph[node].states
    }
}
