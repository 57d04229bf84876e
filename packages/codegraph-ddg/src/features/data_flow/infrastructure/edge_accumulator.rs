//! Edge Accumulator
//!
//! Candidate edges are held back, grouped by the register offset or
//! temporary id they were derived from, so later actions in the same trace
//! can still annotate them. A group is emitted when its key is used again
//! or when the trace ends.

use crate::features::data_flow::domain::{CodeLocation, DependenceEdge, EdgeSubtype};
use std::collections::BTreeMap;

/// An edge ready to be inserted into the dependence graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdge {
    pub source: CodeLocation,
    pub target: CodeLocation,
    pub labels: DependenceEdge,
}

impl PendingEdge {
    pub fn new(source: CodeLocation, target: CodeLocation, labels: DependenceEdge) -> Self {
        Self {
            source,
            target,
            labels,
        }
    }
}

/// Not-yet-emitted edge groups keyed by register offset or temporary id
#[derive(Debug, Clone)]
pub struct EdgeGroups<K: Ord + Copy> {
    groups: BTreeMap<K, Vec<PendingEdge>>,
}

impl<K: Ord + Copy> Default for EdgeGroups<K> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> EdgeGroups<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: K) -> bool {
        self.groups.contains_key(&key)
    }

    pub fn queue(&mut self, key: K, edge: PendingEdge) {
        self.groups.entry(key).or_default().push(edge);
    }

    /// Tag every pending edge of the group; a missing group is left alone
    pub fn annotate(&mut self, key: K, subtype: EdgeSubtype) {
        if let Some(edges) = self.groups.get_mut(&key) {
            for edge in edges {
                edge.labels.annotate(subtype);
            }
        }
    }

    /// Emit and drop the group
    pub fn flush(&mut self, key: K, out: &mut Vec<PendingEdge>) {
        if let Some(edges) = self.groups.remove(&key) {
            out.extend(edges);
        }
    }

    /// Emit every group in key order
    pub fn flush_all(&mut self, out: &mut Vec<PendingEdge>) {
        let groups = std::mem::take(&mut self.groups);
        for (_, edges) in groups {
            out.extend(edges);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::data_flow::domain::{DependenceKind, EdgeDatum};
    use pretty_assertions::assert_eq;

    fn tmp_edge(from: usize, to: usize, tmp: u32) -> PendingEdge {
        PendingEdge::new(
            CodeLocation::statement(0x1000, from),
            CodeLocation::statement(0x1000, to),
            DependenceEdge::new(DependenceKind::Temporary, EdgeDatum::Temporary(tmp)),
        )
    }

    #[test]
    fn test_annotate_before_flush() {
        let mut groups: EdgeGroups<u32> = EdgeGroups::new();
        groups.queue(3, tmp_edge(0, 1, 3));
        groups.annotate(3, EdgeSubtype::Address);
        groups.annotate(3, EdgeSubtype::Data);

        let mut out = Vec::new();
        groups.flush(3, &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].labels.subtypes,
            vec![EdgeSubtype::Address, EdgeSubtype::Data]
        );
        assert!(groups.is_empty());
    }

    #[test]
    fn test_repeated_annotation_accumulates() {
        let mut groups: EdgeGroups<u64> = EdgeGroups::new();
        groups.queue(16, tmp_edge(0, 2, 0));
        groups.queue(16, tmp_edge(1, 2, 0));
        groups.annotate(16, EdgeSubtype::Data);
        groups.annotate(16, EdgeSubtype::Data);

        let mut out = Vec::new();
        groups.flush_all(&mut out);

        assert_eq!(out.len(), 2);
        for edge in &out {
            assert_eq!(edge.labels.subtypes, vec![EdgeSubtype::Data, EdgeSubtype::Data]);
        }
    }

    #[test]
    fn test_annotate_missing_group_is_noop() {
        let mut groups: EdgeGroups<u32> = EdgeGroups::new();
        groups.annotate(9, EdgeSubtype::Data);
        assert!(!groups.contains(9));
    }

    #[test]
    fn test_flush_all_in_key_order() {
        let mut groups: EdgeGroups<u32> = EdgeGroups::new();
        groups.queue(5, tmp_edge(2, 3, 5));
        groups.queue(1, tmp_edge(0, 1, 1));
        groups.queue(5, tmp_edge(2, 4, 5));

        let mut out = Vec::new();
        groups.flush_all(&mut out);

        let targets: Vec<_> = out.iter().map(|e| e.target.clone()).collect();
        assert_eq!(
            targets,
            vec![
                CodeLocation::statement(0x1000, 1),
                CodeLocation::statement(0x1000, 3),
                CodeLocation::statement(0x1000, 4),
            ]
        );
        assert!(groups.is_empty());
    }
}
