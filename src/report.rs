//! Tabular report handed to downstream statistics and plotting

use crate::annotation::{AnnotationHierarchy, AnnotationNode, SlimNode};
use crate::graph::{Namespace, TermId};
use crate::slim::SlimTerm;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One aggregated term with its ontology metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRow {
    #[serde(flatten)]
    pub node: AnnotationNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Namespace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slim: Option<SlimTerm>,
}

/// The result of a quantification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<String>>,
    /// Every term reached by at least one observation, ordered by id
    pub terms: Vec<TermRow>,
    /// Slim-collapsed terms, when a slim vocabulary was supplied. Rows of
    /// nested slim terms overlap and do not add up to a total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slim: Option<Vec<SlimNode>>,
    pub unknown_terms: BTreeMap<TermId, usize>,
    pub dropped_observations: usize,
}

impl Report {
    /// Tabulate a built hierarchy
    pub fn from_hierarchy(
        hierarchy: &AnnotationHierarchy<'_>,
        samples: Option<Vec<String>>,
    ) -> Self {
        let graph = hierarchy.graph();
        let terms = hierarchy
            .nodes()
            .values()
            .map(|node| {
                let term = graph.term(node.id.as_str());
                TermRow {
                    node: node.clone(),
                    name: term.and_then(|t| t.name.clone()),
                    namespace: term.and_then(|t| t.namespace),
                    slim: None,
                }
            })
            .collect();

        Self {
            samples,
            terms,
            slim: None,
            unknown_terms: hierarchy.unknown_terms().clone(),
            dropped_observations: hierarchy.dropped_observations(),
        }
    }

    /// Attach the term -> slim mapping and the collapsed slim table
    pub fn with_slim(
        mut self,
        mapping: &BTreeMap<TermId, SlimTerm>,
        collapsed: BTreeMap<TermId, SlimNode>,
    ) -> Self {
        for row in &mut self.terms {
            row.slim = mapping.get(&row.node.id).cloned();
        }
        self.slim = Some(collapsed.into_values().collect());
        self
    }
}
