//! AnnotationHierarchy: propagates peptide intensities up the ontology

use super::node::AnnotationNode;
use super::observation::{expand, Observation};
use crate::error::OntologyResult;
use crate::graph::{OntologyGraph, TermId};
use crate::slim::{SlimMapper, SlimTerm};
use dashmap::mapref::entry::Entry as SharedEntry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// A slim term together with the full terms collapsed onto it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlimNode {
    #[serde(flatten)]
    pub node: AnnotationNode,
    /// Full terms (including the slim term itself) that map to this slim term
    pub members: BTreeSet<TermId>,
}

/// Term -> [`AnnotationNode`] mapping built from peptide observations
///
/// Every observation contributes to each of its annotated terms and to all
/// of their ancestors, once per peptide. Nodes spring into existence on the
/// first contribution. The graph is borrowed read-only for the lifetime of
/// the hierarchy.
#[derive(Debug, Clone)]
pub struct AnnotationHierarchy<'g> {
    graph: &'g OntologyGraph,
    nodes: BTreeMap<TermId, AnnotationNode>,
    sample_count: Option<usize>,
    unknown_terms: BTreeMap<TermId, usize>,
    observations: usize,
    dropped: usize,
}

impl<'g> AnnotationHierarchy<'g> {
    /// Create an empty hierarchy over a graph
    pub fn new(graph: &'g OntologyGraph) -> Self {
        Self {
            graph,
            nodes: BTreeMap::new(),
            sample_count: None,
            unknown_terms: BTreeMap::new(),
            observations: 0,
            dropped: 0,
        }
    }

    /// Fix the number of samples up front instead of taking it from the
    /// first observation
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = Some(sample_count);
        self
    }

    /// Aggregate a sequence of observations
    pub fn build<I>(graph: &'g OntologyGraph, observations: I) -> OntologyResult<Self>
    where
        I: IntoIterator,
        I::Item: Borrow<Observation>,
    {
        let mut hierarchy = Self::new(graph);
        hierarchy.extend(observations)?;
        Ok(hierarchy)
    }

    /// Add a sequence of observations to an existing hierarchy
    pub fn extend<I>(&mut self, observations: I) -> OntologyResult<()>
    where
        I: IntoIterator,
        I::Item: Borrow<Observation>,
    {
        for observation in observations {
            self.add_observation(observation.borrow())?;
        }
        self.log_summary();
        Ok(())
    }

    /// Merge one peptide into the node of every term it reaches
    ///
    /// Fails without touching any node if the intensity vector breaks the
    /// sample contract. Terms unknown to the graph are counted and skipped.
    pub fn add_observation(&mut self, observation: &Observation) -> OntologyResult<()> {
        observation.validate(self.sample_count)?;
        self.sample_count = Some(observation.intensity.len());
        self.observations += 1;

        let expansion = expand(self.graph, &observation.terms);
        for term in expansion.unknown {
            debug!(term = %term, "observation references a term absent from the ontology");
            *self.unknown_terms.entry(term.clone()).or_insert(0) += 1;
        }
        if expansion.known.is_empty() {
            self.dropped += 1;
            return Ok(());
        }

        for term in expansion.known {
            match self.nodes.entry(term) {
                Entry::Occupied(mut entry) => entry.get_mut().add_peptide(&observation.intensity),
                Entry::Vacant(entry) => {
                    let id = entry.key().clone();
                    entry.insert(AnnotationNode::new(id, observation.intensity.clone()));
                }
            }
        }
        Ok(())
    }

    /// Aggregate observations on several threads
    ///
    /// Workers share a `DashMap`, whose per-entry locking serializes updates
    /// to the same term. Every observation is validated before any worker
    /// starts. The result is identical to [`AnnotationHierarchy::build`].
    pub fn build_concurrent(
        graph: &'g OntologyGraph,
        observations: &[Observation],
        threads: usize,
    ) -> OntologyResult<Self> {
        let sample_count = observations.first().map(|o| o.intensity.len());
        for observation in observations {
            observation.validate(sample_count)?;
        }

        let nodes: DashMap<TermId, AnnotationNode> = DashMap::new();
        let unknown_terms: DashMap<TermId, usize> = DashMap::new();
        let dropped = AtomicUsize::new(0);
        let chunk_size = observations.len().div_ceil(threads.max(1)).max(1);

        std::thread::scope(|scope| {
            for chunk in observations.chunks(chunk_size) {
                let (nodes, unknown_terms, dropped) = (&nodes, &unknown_terms, &dropped);
                scope.spawn(move || {
                    for observation in chunk {
                        let expansion = expand(graph, &observation.terms);
                        for term in expansion.unknown {
                            *unknown_terms.entry(term.clone()).or_insert(0) += 1;
                        }
                        if expansion.known.is_empty() {
                            dropped.fetch_add(1, Ordering::Relaxed);
                            continue;
                        }
                        for term in expansion.known {
                            match nodes.entry(term) {
                                SharedEntry::Occupied(mut entry) => {
                                    entry.get_mut().add_peptide(&observation.intensity)
                                }
                                SharedEntry::Vacant(entry) => {
                                    let id = entry.key().clone();
                                    let intensity = observation.intensity.clone();
                                    entry.insert(AnnotationNode::new(id, intensity));
                                }
                            }
                        }
                    }
                });
            }
        });

        let hierarchy = Self {
            graph,
            nodes: nodes.into_iter().collect(),
            sample_count,
            unknown_terms: unknown_terms.into_iter().collect(),
            observations: observations.len(),
            dropped: dropped.into_inner(),
        };
        hierarchy.log_summary();
        Ok(hierarchy)
    }

    /// `{term} ∪ ancestors(term)`, or nothing if the graph does not know the term
    pub fn expansion_set(&self, term: &str) -> BTreeSet<TermId> {
        expand(self.graph, &[TermId::from(term)]).known
    }

    /// Direct children of a term that were themselves reached by an observation
    pub fn sample_children(&self, term: &str) -> BTreeSet<TermId> {
        self.graph
            .children(term)
            .iter()
            .filter(|child| self.nodes.contains_key(*child))
            .cloned()
            .collect()
    }

    /// Map every aggregated term to its slim representative
    pub fn slim_mapping(
        &self,
        mapper: &SlimMapper<'_>,
    ) -> OntologyResult<BTreeMap<TermId, SlimTerm>> {
        mapper.map_set_to_slim(self.nodes.keys())
    }

    /// Collapse the aggregated terms onto the slim vocabulary
    ///
    /// Every term mapping to a slim term `s` is `s` or one of its
    /// descendants, so `s`'s own node already holds each of their peptides
    /// exactly once and is reported as is. A slim term without a node of its
    /// own (possible when the slim was not derived from this graph) gets the
    /// element-wise sum of its members instead.
    ///
    /// Rows overlap when slim terms are nested: a peptide under slim term
    /// `A` is also inside the row of any slim ancestor of `A`. Summing the
    /// rows does not give the total intensity.
    pub fn collapse_to_slim(
        &self,
        mapper: &SlimMapper<'_>,
    ) -> OntologyResult<BTreeMap<TermId, SlimNode>> {
        Ok(self.collapse(&self.slim_mapping(mapper)?))
    }

    /// Collapse using a term -> slim mapping computed earlier
    ///
    /// Pure reduction over the built nodes; the graph is not consulted. As
    /// with [`AnnotationHierarchy::collapse_to_slim`], rows of nested slim
    /// terms overlap.
    pub fn collapse(&self, mapping: &BTreeMap<TermId, SlimTerm>) -> BTreeMap<TermId, SlimNode> {
        let mut groups: BTreeMap<&TermId, BTreeSet<TermId>> = BTreeMap::new();
        for (term, slim) in mapping {
            if !self.nodes.contains_key(term) {
                continue;
            }
            match slim {
                SlimTerm::Term(slim) => {
                    groups.entry(slim).or_default().insert(term.clone());
                }
                SlimTerm::Unknown => warn!(term = %term, "aggregated term has no slim mapping"),
            }
        }

        groups
            .into_iter()
            .filter_map(|(slim, members)| {
                let node = match self.nodes.get(slim) {
                    Some(node) => node.clone(),
                    None => {
                        let mut nodes = members.iter().filter_map(|m| self.nodes.get(m));
                        let mut sum = nodes.next()?.clone();
                        sum.id = slim.clone();
                        nodes.for_each(|node| sum.absorb(node));
                        sum
                    }
                };
                Some((slim.clone(), SlimNode { node, members }))
            })
            .collect()
    }

    pub fn graph(&self) -> &'g OntologyGraph {
        self.graph
    }

    /// Get the node for a term
    pub fn get(&self, term: &str) -> Option<&AnnotationNode> {
        self.nodes.get(term)
    }

    /// All nodes, ordered by term id
    pub fn nodes(&self) -> &BTreeMap<TermId, AnnotationNode> {
        &self.nodes
    }

    pub fn into_nodes(self) -> BTreeMap<TermId, AnnotationNode> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of samples per intensity vector, once known
    pub fn sample_count(&self) -> Option<usize> {
        self.sample_count
    }

    /// How often each term absent from the graph was referenced
    pub fn unknown_terms(&self) -> &BTreeMap<TermId, usize> {
        &self.unknown_terms
    }

    /// Observations that reached no known term at all
    pub fn dropped_observations(&self) -> usize {
        self.dropped
    }

    /// Observations processed, including dropped ones
    pub fn observations(&self) -> usize {
        self.observations
    }

    fn log_summary(&self) {
        if !self.unknown_terms.is_empty() {
            warn!(
                unknown_terms = self.unknown_terms.len(),
                references = self.unknown_terms.values().sum::<usize>(),
                dropped_observations = self.dropped,
                "observations reference terms absent from the ontology"
            );
        }
        info!(
            observations = self.observations,
            terms = self.nodes.len(),
            "built annotation hierarchy"
        );
    }
}
