//! Generation-by-generation lineage traversal

use super::types::{Direction, LineageResult};
use crate::graph::{OntologyGraph, TermId};
use std::collections::{BTreeSet, HashSet};

/// Query for walking the lineage of a term
#[derive(Debug, Clone)]
pub struct LineageQuery {
    /// Starting term
    pub origin: TermId,
    /// Maximum number of generations to expand (None = until exhausted)
    pub max_depth: Option<usize>,
    /// Direction to follow is_a edges
    pub direction: Direction,
}

impl LineageQuery {
    /// Create a new lineage query from a starting term
    pub fn from(origin: impl Into<TermId>) -> Self {
        Self {
            origin: origin.into(),
            max_depth: None,
            direction: Direction::Parents,
        }
    }

    /// Limit the number of generations expanded
    pub fn depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Set the traversal direction
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Lazily expand the frontier one generation at a time
    ///
    /// Generation `k` holds the terms first reached after `k` hops. A visited
    /// set guarantees that each term is yielded once, so the iterator ends
    /// even when the graph contains a cycle.
    pub fn generations<'g>(&self, graph: &'g OntologyGraph) -> Generations<'g> {
        let mut visited = HashSet::new();
        let mut frontier = BTreeSet::new();
        if graph.contains(self.origin.as_str()) {
            visited.insert(self.origin.clone());
            frontier.insert(self.origin.clone());
        }

        Generations {
            graph,
            direction: self.direction,
            visited,
            frontier,
            remaining: self.max_depth,
        }
    }

    /// Execute the traversal, collecting every generation
    pub fn execute(&self, graph: &OntologyGraph) -> LineageResult {
        let mut result = LineageResult::new(self.origin.clone());
        if !graph.contains(self.origin.as_str()) {
            return result;
        }

        result.levels.push(BTreeSet::from([self.origin.clone()]));
        result.levels.extend(self.generations(graph));
        result
    }
}

/// Iterator over the frontiers of a [`LineageQuery`]
#[derive(Debug)]
pub struct Generations<'g> {
    graph: &'g OntologyGraph,
    direction: Direction,
    visited: HashSet<TermId>,
    frontier: BTreeSet<TermId>,
    remaining: Option<usize>,
}

impl Iterator for Generations<'_> {
    type Item = BTreeSet<TermId>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frontier.is_empty() || self.remaining == Some(0) {
            return None;
        }

        let mut next = BTreeSet::new();
        for term in &self.frontier {
            for neighbor in self.direction.neighbors(self.graph, term.as_str()) {
                if self.visited.insert(neighbor.clone()) {
                    next.insert(neighbor.clone());
                }
            }
        }

        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        self.frontier = next;

        if self.frontier.is_empty() {
            None
        } else {
            Some(self.frontier.clone())
        }
    }
}
