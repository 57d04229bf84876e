//! Dependence edge labels

use super::action::TempId;
use super::variable::{Variable, VariableKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dependence category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependenceKind {
    Temporary,
    Register,
    Memory,
    ControlTransfer,
}

impl DependenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependenceKind::Temporary => "tmp",
            DependenceKind::Register => "register",
            DependenceKind::Memory => "memory",
            DependenceKind::ControlTransfer => "control-transfer",
        }
    }
}

impl From<VariableKind> for DependenceKind {
    fn from(kind: VariableKind) -> Self {
        match kind {
            VariableKind::Register => DependenceKind::Register,
            VariableKind::Memory => DependenceKind::Memory,
        }
    }
}

/// Whether a dependence feeds an address computation or a data value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSubtype {
    Address,
    Data,
}

impl EdgeSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeSubtype::Address => "address",
            EdgeSubtype::Data => "data",
        }
    }
}

/// What an edge carries about the dependence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeDatum {
    /// Full identity of the variable (data retention enabled)
    Variable(Variable),
    /// Number of extra reaching definitions folded into this edge
    Count(usize),
    /// Temporary that carried the value
    Temporary(TempId),
}

/// Labels of one def→use edge.
///
/// Each field is a list. Merging two label sets concatenates field by
/// field in discovery order, so repeated derivations and repeated
/// annotations accumulate instead of overwriting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependenceEdge {
    pub kinds: Vec<DependenceKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtypes: Vec<EdgeSubtype>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<EdgeDatum>,
}

impl DependenceEdge {
    pub fn new(kind: DependenceKind, datum: EdgeDatum) -> Self {
        Self {
            kinds: vec![kind],
            subtypes: Vec::new(),
            data: vec![datum],
        }
    }

    /// The category recorded first
    pub fn kind(&self) -> Option<DependenceKind> {
        self.kinds.first().copied()
    }

    pub fn has_kind(&self, kind: DependenceKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Sum of cardinality counters (0 when data is retained)
    pub fn cardinality(&self) -> usize {
        self.data
            .iter()
            .map(|d| match d {
                EdgeDatum::Count(n) => *n,
                _ => 0,
            })
            .sum()
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.data.iter().filter_map(|d| match d {
            EdgeDatum::Variable(v) => Some(v),
            _ => None,
        })
    }

    pub fn annotate(&mut self, subtype: EdgeSubtype) {
        self.subtypes.push(subtype);
    }

    /// Concatenate `other`'s labels onto this edge
    pub fn merge(&mut self, other: DependenceEdge) {
        self.kinds.extend(other.kinds);
        self.subtypes.extend(other.subtypes);
        self.data.extend(other.data);
    }
}

impl fmt::Display for DependenceEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<&str> = self.kinds.iter().map(|k| k.as_str()).collect();
        write!(f, "{}", kinds.join(","))?;
        if !self.subtypes.is_empty() {
            let subtypes: Vec<&str> = self.subtypes.iter().map(|s| s.as_str()).collect();
            write!(f, " ({})", subtypes.join(","))?;
        }
        Ok(())
    }
}
