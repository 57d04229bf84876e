//! Data dependence domain models

pub mod action;
pub mod code_location;
pub mod edge;
pub mod variable;

pub use action::{Access, Action, ActionKind, Dependencies, RegOffset, ResolvedAddresses, TempId};
pub use code_location::CodeLocation;
pub use edge::{DependenceEdge, DependenceKind, EdgeDatum, EdgeSubtype};
pub use variable::{Variable, VariableKind};
