//! Query types and result structures

use crate::graph::{OntologyGraph, TermId};
use std::collections::BTreeSet;

/// Direction for edge traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Follow is_a edges towards more general terms
    #[default]
    Parents,
    /// Follow is_a edges backwards towards more specific terms
    Children,
}

impl Direction {
    /// Direct neighbors of a term in this direction
    pub fn neighbors<'g>(&self, graph: &'g OntologyGraph, term: &str) -> &'g BTreeSet<TermId> {
        match self {
            Direction::Parents => graph.parents(term),
            Direction::Children => graph.children(term),
        }
    }
}

/// Result of a lineage query
#[derive(Debug, Clone, PartialEq)]
pub struct LineageResult {
    /// Starting term
    pub origin: TermId,
    /// Terms discovered at each generation.
    /// Level 0 = origin, level 1 = direct parents (or children), etc.
    /// Empty when the origin is not in the graph.
    pub levels: Vec<BTreeSet<TermId>>,
}

impl LineageResult {
    pub fn new(origin: TermId) -> Self {
        Self {
            origin,
            levels: Vec::new(),
        }
    }

    /// Get all terms across all levels (excluding origin)
    pub fn all_terms(&self) -> BTreeSet<&TermId> {
        self.levels.iter().skip(1).flatten().collect()
    }

    /// Consume the result, keeping every term except the origin
    pub fn into_terms(self) -> BTreeSet<TermId> {
        self.levels.into_iter().skip(1).flatten().collect()
    }

    /// Get terms at a specific generation
    pub fn at_depth(&self, depth: usize) -> Option<&BTreeSet<TermId>> {
        self.levels.get(depth)
    }

    /// Get the maximum depth reached
    pub fn max_depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }
}
