/*
 * Live-Definition Store
 *
 * Per-node snapshot: Variable → set of CodeLocations that define it on
 * some explored path reaching the node.
 *
 * - kill(): a write replaces the definer set with exactly the writer
 * - merge_from(): union into a successor's snapshot, reporting growth
 * - lookup(): reaching definitions of a read, as edge labels
 *
 * No partial-kill reasoning: a 4-byte write does not kill a 1-byte
 * definition inside it. Overlapping reads are opt-in (MemoryMatching).
 */

use crate::config::{DDGConfig, MemoryMatching};
use crate::features::data_flow::domain::{
    CodeLocation, DependenceEdge, DependenceKind, EdgeDatum, Variable,
};
use rustc_hash::FxHashMap;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Reaching definers of one variable
pub type DefSet = BTreeSet<CodeLocation>;

/// Live definitions at one program point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveDefinitions {
    defs: FxHashMap<Variable, DefSet>,
}

/// How a snapshot grew during a merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub new_variables: usize,
    pub new_locations: usize,
}

impl MergeOutcome {
    pub fn changed(&self) -> bool {
        self.new_variables > 0 || self.new_locations > 0
    }
}

impl LiveDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variable: &Variable) -> Option<&DefSet> {
        self.defs.get(variable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &DefSet)> {
        self.defs.iter()
    }

    /// `location` becomes the only definer of `variable`
    pub fn kill(&mut self, variable: Variable, location: CodeLocation) {
        let mut definers = DefSet::new();
        definers.insert(location);
        self.defs.insert(variable, definers);
    }

    /// Union `other` into this snapshot
    pub fn merge_from(&mut self, other: &LiveDefinitions) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();

        for (variable, locations) in &other.defs {
            match self.defs.get_mut(variable) {
                None => {
                    debug!("New var {}", variable);
                    self.defs.insert(*variable, locations.clone());
                    outcome.new_variables += 1;
                }
                Some(existing) => {
                    for location in locations {
                        if existing.insert(location.clone()) {
                            debug!("New code location {} for {}", location, variable);
                            outcome.new_locations += 1;
                        }
                    }
                }
            }
        }

        outcome
    }
}

/// Resolves reads against a snapshot and labels the resulting edges
#[derive(Debug, Clone, Copy)]
pub struct DefLookup {
    retain_data: bool,
    memory_matching: MemoryMatching,
}

impl DefLookup {
    pub fn new(retain_data: bool, memory_matching: MemoryMatching) -> Self {
        Self {
            retain_data,
            memory_matching,
        }
    }

    pub fn from_config(config: &DDGConfig) -> Self {
        Self::new(config.retain_data, config.memory_matching)
    }

    /// Reaching definitions of `variable`, one label set per defining location.
    ///
    /// With counters, a location reached through several variables (only
    /// possible with overlapping memory matching) counts one extra per
    /// additional variable.
    pub fn lookup(
        &self,
        snapshot: &LiveDefinitions,
        variable: &Variable,
    ) -> BTreeMap<CodeLocation, DependenceEdge> {
        let kind = DependenceKind::from(variable.kind());
        let mut prevdefs: BTreeMap<CodeLocation, DependenceEdge> = BTreeMap::new();

        for definers in self.candidates(snapshot, variable) {
            for location in definers {
                if self.retain_data {
                    prevdefs.insert(
                        location.clone(),
                        DependenceEdge::new(kind, EdgeDatum::Variable(*variable)),
                    );
                    continue;
                }

                match prevdefs.entry(location.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(DependenceEdge::new(kind, EdgeDatum::Count(0)));
                    }
                    Entry::Occupied(mut slot) => {
                        let count = slot.get().cardinality() + 1;
                        *slot.get_mut() = DependenceEdge::new(kind, EdgeDatum::Count(count));
                    }
                }
            }
        }

        prevdefs
    }

    fn candidates<'s>(
        &self,
        snapshot: &'s LiveDefinitions,
        variable: &Variable,
    ) -> Vec<&'s DefSet> {
        let mut found: Vec<&DefSet> = snapshot.get(variable).into_iter().collect();

        if self.memory_matching == MemoryMatching::Overlapping {
            let mut overlapping: Vec<(&Variable, &DefSet)> = snapshot
                .iter()
                .filter(|(other, _)| *other != variable && other.overlaps(variable))
                .collect();
            overlapping.sort_by_key(|(other, _)| **other);
            found.extend(overlapping.into_iter().map(|(_, defs)| defs));
        }

        found
    }
}
