//! The slim vocabulary

use crate::graph::{OntologyGraph, TermId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A curated subset of terms used for summarized reporting
///
/// Serializes as a plain array of term ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlimIndex {
    members: BTreeSet<TermId>,
}

impl SlimIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use every term of a slim ontology as the vocabulary
    pub fn from_graph(slim: &OntologyGraph) -> Self {
        slim.terms().map(|t| t.id.clone()).collect()
    }

    pub fn insert(&mut self, term: impl Into<TermId>) -> bool {
        self.members.insert(term.into())
    }

    pub fn contains(&self, term: &str) -> bool {
        self.members.contains(term)
    }

    /// Members in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &TermId> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<T: Into<TermId>> FromIterator<T> for SlimIndex {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().map(Into::into).collect(),
        }
    }
}
