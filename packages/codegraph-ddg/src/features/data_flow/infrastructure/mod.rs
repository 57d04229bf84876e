//! Data dependence infrastructure

pub mod ddg; // Dependence graph storage
pub mod ddg_builder; // Worklist fixpoint
pub mod edge_accumulator;
pub mod live_defs;
pub mod node_tracker;

pub use ddg::{DDGDto, DDGEdgeDto, DDGStats, DependenceGraph};
pub use ddg_builder::{ConstructionStats, DDGBuilder, DataDependenceGraph};
pub use edge_accumulator::{EdgeGroups, PendingEdge};
pub use live_defs::{DefLookup, DefSet, LiveDefinitions, MergeOutcome};
pub use node_tracker::{NodeTracker, TrackOutcome};
