//! Closest-slim-ancestor mapping

use super::index::SlimIndex;
use crate::error::{OntologyError, OntologyResult};
use crate::graph::{OntologyGraph, TermId};
use crate::query::{Direction, LineageQuery};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// The slim representative of a term
///
/// Serializes as the term id, or as the string `"unknown"` for terms that
/// are not in the full ontology.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SlimTerm {
    Term(TermId),
    Unknown,
}

impl SlimTerm {
    pub const UNKNOWN: &'static str = "unknown";

    pub fn as_str(&self) -> &str {
        match self {
            SlimTerm::Term(id) => id.as_str(),
            SlimTerm::Unknown => Self::UNKNOWN,
        }
    }

    /// The mapped term, or None for `Unknown`
    pub fn term(&self) -> Option<&TermId> {
        match self {
            SlimTerm::Term(id) => Some(id),
            SlimTerm::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SlimTerm::Unknown)
    }
}

impl std::fmt::Display for SlimTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SlimTerm {
    fn from(s: String) -> Self {
        if s == Self::UNKNOWN {
            SlimTerm::Unknown
        } else {
            SlimTerm::Term(TermId::from(s))
        }
    }
}

impl From<SlimTerm> for String {
    fn from(slim: SlimTerm) -> Self {
        match slim {
            SlimTerm::Term(id) => id.as_str().to_string(),
            SlimTerm::Unknown => SlimTerm::UNKNOWN.to_string(),
        }
    }
}

/// Maps full-ontology terms onto their closest slim ancestor
///
/// Distance is counted in whole is_a generations. When several slim
/// ancestors are equally close, the lexicographically smallest id wins,
/// so the mapping is reproducible across runs.
#[derive(Debug, Clone, Copy)]
pub struct SlimMapper<'a> {
    graph: &'a OntologyGraph,
    slim: &'a SlimIndex,
    max_depth: usize,
}

impl<'a> SlimMapper<'a> {
    /// Create a mapper. The search depth defaults to the number of terms in
    /// the graph, which no shortest path can exceed.
    pub fn new(graph: &'a OntologyGraph, slim: &'a SlimIndex) -> Self {
        Self {
            graph,
            slim,
            max_depth: graph.len(),
        }
    }

    /// Bound the number of generations searched before giving up
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn graph(&self) -> &'a OntologyGraph {
        self.graph
    }

    pub fn slim(&self) -> &'a SlimIndex {
        self.slim
    }

    /// Map one term to its slim representative
    ///
    /// Returns [`SlimTerm::Unknown`] for terms absent from the graph and the
    /// term itself for slim members. Otherwise walks the parents generation
    /// by generation until a frontier contains a slim member.
    ///
    /// # Errors
    ///
    /// [`OntologyError::NoSlimAncestor`] if the ancestors run out without
    /// meeting the slim, and [`OntologyError::SlimSearchExhausted`] if the
    /// depth bound is reached first.
    pub fn map_to_slim(&self, term: &str) -> OntologyResult<SlimTerm> {
        if !self.graph.contains(term) {
            trace!(term, "term not in ontology");
            return Ok(SlimTerm::Unknown);
        }
        if self.slim.contains(term) {
            return Ok(SlimTerm::Term(TermId::from(term)));
        }

        let mut generations = LineageQuery::from(term)
            .direction(Direction::Parents)
            .generations(self.graph);

        for depth in 1..=self.max_depth {
            let Some(frontier) = generations.next() else {
                return Err(OntologyError::NoSlimAncestor {
                    term: TermId::from(term),
                });
            };

            // Frontiers are ordered sets, so the first slim hit is the
            // alphabetically smallest of the closest candidates
            if let Some(closest) = frontier
                .into_iter()
                .find(|candidate| self.slim.contains(candidate.as_str()))
            {
                trace!(term, closest = %closest, depth, "mapped to slim");
                return Ok(SlimTerm::Term(closest));
            }
        }

        Err(OntologyError::SlimSearchExhausted {
            term: TermId::from(term),
            depth: self.max_depth,
        })
    }

    /// Map every term of a set independently
    ///
    /// Stops at the first term whose search fails.
    pub fn map_set_to_slim<I>(&self, terms: I) -> OntologyResult<BTreeMap<TermId, SlimTerm>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        terms
            .into_iter()
            .map(|term| {
                let term = term.as_ref();
                Ok((TermId::from(term), self.map_to_slim(term)?))
            })
            .collect()
    }
}
