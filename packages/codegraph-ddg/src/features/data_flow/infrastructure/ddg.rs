/*
 * Dependence Graph
 *
 * Directed graph over CodeLocations, edges labeled with DependenceEdge.
 *
 * - petgraph DiGraph + location→index map
 * - At most one edge per (source, target); re-derived edges merge labels
 * - Backward/forward slicing over def→use edges
 */

use crate::features::data_flow::domain::{CodeLocation, DependenceEdge, DependenceKind};
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Serializable edge for the DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DDGEdgeDto {
    pub source: CodeLocation,
    pub target: CodeLocation,
    pub labels: DependenceEdge,
}

/// Serializable DTO for DependenceGraph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DDGDto {
    pub nodes: Vec<CodeLocation>,
    pub edges: Vec<DDGEdgeDto>,
}

#[derive(Debug, Clone, Default)]
pub struct DependenceGraph {
    graph: DiGraph<CodeLocation, DependenceEdge>,
    node_map: HashMap<CodeLocation, NodeIndex>,
}

impl Serialize for DependenceGraph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_dto().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DependenceGraph {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let dto = DDGDto::deserialize(deserializer)?;
        let mut ddg = DependenceGraph::new();

        for node in dto.nodes {
            ddg.ensure_node(node);
        }

        for edge in dto.edges {
            ddg.add_edge(edge.source, edge.target, edge.labels);
        }

        Ok(ddg)
    }
}

impl DependenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_node(&mut self, location: CodeLocation) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&location) {
            return idx;
        }
        let idx = self.graph.add_node(location.clone());
        self.node_map.insert(location, idx);
        idx
    }

    /// Insert `source → target`, or merge `labels` into the existing edge.
    ///
    /// Returns true if the edge did not exist before.
    pub fn add_edge(
        &mut self,
        source: CodeLocation,
        target: CodeLocation,
        labels: DependenceEdge,
    ) -> bool {
        let from = self.ensure_node(source);
        let to = self.ensure_node(target);

        match self.graph.find_edge(from, to) {
            Some(existing) => {
                self.graph[existing].merge(labels);
                false
            }
            None => {
                self.graph.add_edge(from, to, labels);
                true
            }
        }
    }

    pub fn contains(&self, location: &CodeLocation) -> bool {
        self.node_map.contains_key(location)
    }

    /// Labels of the edge `source → target`
    pub fn edge(&self, source: &CodeLocation, target: &CodeLocation) -> Option<&DependenceEdge> {
        let from = *self.node_map.get(source)?;
        let to = *self.node_map.get(target)?;
        self.graph
            .find_edge(from, to)
            .and_then(|e| self.graph.edge_weight(e))
    }

    /// Definitions the location depends on
    pub fn predecessors(&self, location: &CodeLocation) -> Vec<&CodeLocation> {
        self.neighbors(location, Direction::Incoming)
    }

    /// Uses that depend on the location
    pub fn successors(&self, location: &CodeLocation) -> Vec<&CodeLocation> {
        self.neighbors(location, Direction::Outgoing)
    }

    fn neighbors(&self, location: &CodeLocation, dir: Direction) -> Vec<&CodeLocation> {
        let Some(&idx) = self.node_map.get(location) else {
            return Vec::new();
        };

        let mut found: Vec<&CodeLocation> = self
            .graph
            .neighbors_directed(idx, dir)
            .map(|n| &self.graph[n])
            .collect();
        found.sort();
        found
    }

    /// All edges as (source, target, labels), sorted by source then target
    pub fn edges(&self) -> Vec<(&CodeLocation, &CodeLocation, &DependenceEdge)> {
        let mut edges: Vec<_> = self
            .graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()], e.weight()))
            .collect();
        edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        edges
    }

    pub fn locations(&self) -> impl Iterator<Item = &CodeLocation> {
        self.graph.node_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Edge counts per dependence kind (by the first recorded kind)
    pub fn stats(&self) -> DDGStats {
        let mut stats = DDGStats {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            ..DDGStats::default()
        };

        for edge in self.graph.edge_weights() {
            match edge.kind() {
                Some(DependenceKind::Temporary) => stats.temporary_edges += 1,
                Some(DependenceKind::Register) => stats.register_edges += 1,
                Some(DependenceKind::Memory) => stats.memory_edges += 1,
                Some(DependenceKind::ControlTransfer) => stats.control_transfer_edges += 1,
                None => {}
            }
        }

        stats
    }

    /// Backward slice: every location `target` transitively depends on
    ///
    /// # Performance
    /// O(V + E)
    pub fn backward_slice(
        &self,
        target: &CodeLocation,
        max_depth: Option<usize>,
    ) -> HashSet<CodeLocation> {
        self.slice(target, max_depth, Direction::Incoming)
    }

    /// Forward slice: every location transitively depending on `source`
    pub fn forward_slice(
        &self,
        source: &CodeLocation,
        max_depth: Option<usize>,
    ) -> HashSet<CodeLocation> {
        self.slice(source, max_depth, Direction::Outgoing)
    }

    fn slice(
        &self,
        start: &CodeLocation,
        max_depth: Option<usize>,
        dir: Direction,
    ) -> HashSet<CodeLocation> {
        let max_depth = max_depth.unwrap_or(usize::MAX);
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut worklist: VecDeque<(NodeIndex, usize)> = VecDeque::new();

        let Some(&start_idx) = self.node_map.get(start) else {
            return HashSet::new();
        };
        worklist.push_back((start_idx, 0));

        while let Some((current, depth)) = worklist.pop_front() {
            if depth > max_depth || !visited.insert(current) {
                continue;
            }

            for next in self.graph.neighbors_directed(current, dir) {
                if !visited.contains(&next) {
                    worklist.push_back((next, depth + 1));
                }
            }
        }

        visited.into_iter().map(|idx| self.graph[idx].clone()).collect()
    }

    /// Graphviz rendering
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.graph))
    }

    pub fn to_dto(&self) -> DDGDto {
        DDGDto {
            nodes: self.graph.node_weights().cloned().collect(),
            edges: self
                .edges()
                .into_iter()
                .map(|(source, target, labels)| DDGEdgeDto {
                    source: source.clone(),
                    target: target.clone(),
                    labels: labels.clone(),
                })
                .collect(),
        }
    }
}

/// Pretty-print: one `source -> target [labels]` line per edge
impl fmt::Display for DependenceGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (source, target, labels) in self.edges() {
            writeln!(f, "{} -> {} [{}]", source, target, labels)?;
        }
        Ok(())
    }
}

/// DDG Statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DDGStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub temporary_edges: usize,
    pub register_edges: usize,
    pub memory_edges: usize,
    pub control_transfer_edges: usize,
}
