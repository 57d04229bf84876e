/*
 * Node Tracker
 *
 * Replays one terminal state's action trace against the live definitions
 * reaching its node:
 * - reads produce def→use edges from every reaching definer
 * - writes kill the written variable's definers
 * - temporaries are local to the trace and resolved from a local map
 *
 * Register and temporary edges go through the edge accumulator so that
 * later structural annotations (address vs data) land on them before they
 * are emitted. Memory read edges are emitted immediately.
 */

use crate::config::DDGConfig;
use crate::errors::{DdgError, Result};
use crate::features::data_flow::domain::{
    Access, Action, ActionKind, CodeLocation, DependenceEdge, DependenceKind, Dependencies,
    EdgeDatum, EdgeSubtype, RegOffset, TempId, Variable,
};
use rustc_hash::FxHashMap;

use super::edge_accumulator::{EdgeGroups, PendingEdge};
use super::live_defs::{DefLookup, LiveDefinitions};

/// Result of replaying one trace
#[derive(Debug, Clone)]
pub struct TrackOutcome {
    /// Live definitions leaving the node along this state
    pub live_defs: LiveDefinitions,
    /// Edges in emission order
    pub edges: Vec<PendingEdge>,
}

#[derive(Debug, Clone, Copy)]
pub struct NodeTracker {
    lookup: DefLookup,
}

/// Per-replay scratch state
#[derive(Default)]
struct Replay {
    temps: FxHashMap<TempId, CodeLocation>,
    temps_to_edges: EdgeGroups<TempId>,
    regs_to_edges: EdgeGroups<RegOffset>,
    emitted: Vec<PendingEdge>,
}

impl Replay {
    fn temp_definer(&self, tmp: TempId, location: &CodeLocation) -> Result<CodeLocation> {
        self.temps
            .get(&tmp)
            .cloned()
            .ok_or_else(|| DdgError::UndefinedTemporary {
                tmp,
                location: location.clone(),
            })
    }

    /// Replace the pending group of `tmp` with a single fresh edge
    fn requeue_temp(&mut self, tmp: TempId, edge: PendingEdge) {
        if self.temps_to_edges.contains(tmp) {
            self.temps_to_edges.flush(tmp, &mut self.emitted);
        }
        self.temps_to_edges.queue(tmp, edge);
    }

    fn annotate(&mut self, deps: &Dependencies, subtype: EdgeSubtype) {
        for &offset in &deps.registers {
            self.regs_to_edges.annotate(offset, subtype);
        }
        for &tmp in &deps.temps {
            self.temps_to_edges.annotate(tmp, subtype);
        }
    }
}

impl NodeTracker {
    pub fn new(lookup: DefLookup) -> Self {
        Self { lookup }
    }

    pub fn from_config(config: &DDGConfig) -> Self {
        Self::new(DefLookup::from_config(config))
    }

    /// Replay `actions` on a copy of `incoming`
    pub fn replay(&self, actions: &[Action], incoming: &LiveDefinitions) -> Result<TrackOutcome> {
        let mut live_defs = incoming.clone();
        let mut replay = Replay::default();

        for action in actions {
            let current = &action.location;

            match &action.kind {
                ActionKind::Memory {
                    access,
                    addresses,
                    size,
                    addr_deps,
                    data_deps,
                } => {
                    for addr in addresses.iter() {
                        let variable = Variable::memory(addr, *size);
                        match access {
                            Access::Read => {
                                for (prev, labels) in self.lookup.lookup(&live_defs, &variable) {
                                    replay
                                        .emitted
                                        .push(PendingEdge::new(prev, current.clone(), labels));
                                }
                            }
                            Access::Write => live_defs.kill(variable, current.clone()),
                        }

                        // One structural application per resolved address
                        replay.annotate(addr_deps, EdgeSubtype::Address);
                        replay.annotate(data_deps, EdgeSubtype::Data);
                    }
                }

                ActionKind::Register {
                    offset,
                    size,
                    access,
                    data_deps,
                } => {
                    let variable = Variable::register(*offset, *size);
                    match access {
                        Access::Read => {
                            let prevdefs = self.lookup.lookup(&live_defs, &variable);

                            // Edges of the previous use of this offset are final now
                            if replay.regs_to_edges.contains(*offset) {
                                replay.regs_to_edges.flush(*offset, &mut replay.emitted);
                            }

                            for (prev, labels) in prevdefs {
                                replay.regs_to_edges.queue(
                                    *offset,
                                    PendingEdge::new(prev, current.clone(), labels),
                                );
                            }
                        }
                        Access::Write => {
                            live_defs.kill(variable, current.clone());
                            replay.annotate(data_deps, EdgeSubtype::Data);
                        }
                    }
                }

                ActionKind::Temporary { tmp, access } => match access {
                    Access::Read => {
                        let prev = replay.temp_definer(*tmp, current)?;
                        let labels =
                            DependenceEdge::new(DependenceKind::Temporary, EdgeDatum::Temporary(*tmp));
                        replay.requeue_temp(*tmp, PendingEdge::new(prev, current.clone(), labels));
                    }
                    Access::Write => {
                        replay.temps.insert(*tmp, current.clone());
                    }
                },

                ActionKind::ControlTransfer { target_deps } => {
                    for &tmp in target_deps {
                        let prev = replay.temp_definer(tmp, current)?;
                        let labels = DependenceEdge::new(
                            DependenceKind::ControlTransfer,
                            EdgeDatum::Temporary(tmp),
                        );
                        replay.requeue_temp(tmp, PendingEdge::new(prev, current.clone(), labels));
                    }
                }
            }
        }

        replay.regs_to_edges.flush_all(&mut replay.emitted);
        replay.temps_to_edges.flush_all(&mut replay.emitted);

        Ok(TrackOutcome {
            live_defs,
            edges: replay.emitted,
        })
    }
}
