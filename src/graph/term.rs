//! Term representation in the ontology graph

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Unique identifier for an ontology term (e.g. `GO:0008150`)
///
/// Serializes as a plain string. Ordering is lexicographic on the raw
/// identifier and is what slim tie-breaks are decided on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(String);

impl TermId {
    /// Create a TermId from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TermId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TermId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for TermId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TermId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Top-level GO namespace a term belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    BiologicalProcess,
    MolecularFunction,
    CellularComponent,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [
        Namespace::BiologicalProcess,
        Namespace::MolecularFunction,
        Namespace::CellularComponent,
    ];

    /// Root term of the namespace. Every GO slim carries these three terms.
    pub fn root(&self) -> TermId {
        match self {
            Namespace::BiologicalProcess => TermId::from("GO:0008150"),
            Namespace::MolecularFunction => TermId::from("GO:0003674"),
            Namespace::CellularComponent => TermId::from("GO:0005575"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::BiologicalProcess => "biological_process",
            Namespace::MolecularFunction => "molecular_function",
            Namespace::CellularComponent => "cellular_component",
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::ALL
            .into_iter()
            .find(|ns| ns.as_str() == s)
            .ok_or_else(|| format!("unknown namespace: {}", s))
    }
}

/// A term in the ontology graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Unique identifier
    pub id: TermId,
    /// Human-readable label
    pub name: Option<String>,
    /// Namespace, if the loader provided one
    pub namespace: Option<Namespace>,
    /// Direct parents (more general terms)
    pub parents: BTreeSet<TermId>,
    /// Direct children (more specific terms), the inverse of `parents`
    pub children: BTreeSet<TermId>,
}

impl Term {
    /// Create a bare term with no label, namespace or edges
    pub fn new(id: impl Into<TermId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            namespace: None,
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
        }
    }

    /// Set the label
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
