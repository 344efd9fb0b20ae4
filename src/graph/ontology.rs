//! OntologyGraph: a directed acyclic graph of terms linked by is_a edges

use super::term::{Namespace, Term, TermId};
use crate::query::{Direction, LineageQuery};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

static NO_TERMS: BTreeSet<TermId> = BTreeSet::new();

/// An ontology as a multi-parent DAG
///
/// The graph is assembled once through [`OntologyGraph::add_term`] and
/// [`OntologyGraph::add_is_a`], then shared by reference with the slim mapper
/// and the annotation hierarchy. Every query on an unknown term answers with
/// an empty set rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GraphDocument", into = "GraphDocument")]
pub struct OntologyGraph {
    terms: HashMap<TermId, Term>,
}

impl OntologyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term, merging its label, namespace and edges into any existing
    /// record with the same id. Returns the term id.
    pub fn add_term(&mut self, term: Term) -> TermId {
        let Term {
            id,
            name,
            namespace,
            parents,
            children,
        } = term;

        let entry = self
            .terms
            .entry(id.clone())
            .or_insert_with(|| Term::new(id.clone()));
        if name.is_some() {
            entry.name = name;
        }
        if namespace.is_some() {
            entry.namespace = namespace;
        }

        for parent in parents {
            self.add_is_a(id.clone(), parent);
        }
        for child in children {
            self.add_is_a(child, id.clone());
        }
        id
    }

    /// Record that `child` is_a `parent`
    ///
    /// Both endpoints are created as bare terms if missing, so the
    /// parent/child relation stays symmetric.
    pub fn add_is_a(&mut self, child: impl Into<TermId>, parent: impl Into<TermId>) {
        let child = child.into();
        let parent = parent.into();

        self.terms
            .entry(child.clone())
            .or_insert_with(|| Term::new(child.clone()))
            .parents
            .insert(parent.clone());
        self.terms
            .entry(parent.clone())
            .or_insert_with(|| Term::new(parent))
            .children
            .insert(child);
    }

    /// Get a term record by id
    pub fn term(&self, id: &str) -> Option<&Term> {
        self.terms.get(id)
    }

    /// Check if a term exists
    pub fn contains(&self, id: &str) -> bool {
        self.terms.contains_key(id)
    }

    /// Direct parents. Empty for roots and unknown terms.
    pub fn parents(&self, id: &str) -> &BTreeSet<TermId> {
        self.terms.get(id).map(|t| &t.parents).unwrap_or(&NO_TERMS)
    }

    /// Direct children. Empty for leaves and unknown terms.
    pub fn children(&self, id: &str) -> &BTreeSet<TermId> {
        self.terms.get(id).map(|t| &t.children).unwrap_or(&NO_TERMS)
    }

    /// Every term reachable by following parent edges
    pub fn ancestors(&self, id: &str) -> BTreeSet<TermId> {
        LineageQuery::from(id)
            .direction(Direction::Parents)
            .execute(self)
            .into_terms()
    }

    /// Every term reachable by following child edges
    pub fn descendants(&self, id: &str) -> BTreeSet<TermId> {
        LineageQuery::from(id)
            .direction(Direction::Children)
            .execute(self)
            .into_terms()
    }

    /// The term's namespace, when the loader supplied one
    pub fn namespace(&self, id: &str) -> Option<Namespace> {
        self.terms.get(id).and_then(|t| t.namespace)
    }

    /// Terms without parents
    pub fn roots(&self) -> BTreeSet<TermId> {
        self.terms
            .values()
            .filter(|t| t.is_root())
            .map(|t| t.id.clone())
            .collect()
    }

    /// Iterate over all terms in arbitrary order
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    /// Get the number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Serialized form of an [`OntologyGraph`], as produced by an external loader
///
/// Only parent edges are stored; children are derived on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub terms: Vec<TermRecord>,
}

/// One term of a [`GraphDocument`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
    pub id: TermId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Namespace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<TermId>,
}

impl From<GraphDocument> for OntologyGraph {
    fn from(doc: GraphDocument) -> Self {
        let mut graph = OntologyGraph::new();
        for record in doc.terms {
            let mut term = Term::new(record.id);
            term.name = record.name;
            term.namespace = record.namespace;
            term.parents = record.parents.into_iter().collect();
            graph.add_term(term);
        }
        graph
    }
}

impl From<OntologyGraph> for GraphDocument {
    fn from(graph: OntologyGraph) -> Self {
        let mut terms: Vec<TermRecord> = graph
            .terms
            .into_values()
            .map(|t| TermRecord {
                id: t.id,
                name: t.name,
                namespace: t.namespace,
                parents: t.parents.into_iter().collect(),
            })
            .collect();
        terms.sort_by(|a, b| a.id.cmp(&b.id));
        GraphDocument { terms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// BP root with a diamond under it:
    ///
    /// ```text
    ///        GO:0008150
    ///        /        \
    ///  GO:0009987  GO:0008152
    ///        \        /
    ///        GO:0044237
    ///            |
    ///        GO:0006091
    /// ```
    fn diamond() -> OntologyGraph {
        let mut graph = OntologyGraph::new();
        graph.add_term(
            Term::new("GO:0008150")
                .with_name("biological_process")
                .with_namespace(Namespace::BiologicalProcess),
        );
        graph.add_is_a("GO:0009987", "GO:0008150");
        graph.add_is_a("GO:0008152", "GO:0008150");
        graph.add_is_a("GO:0044237", "GO:0009987");
        graph.add_is_a("GO:0044237", "GO:0008152");
        graph.add_is_a("GO:0006091", "GO:0044237");
        graph
    }

    fn ids(items: &[&str]) -> BTreeSet<TermId> {
        items.iter().map(|s| TermId::from(*s)).collect()
    }

    #[test]
    fn test_parents_and_children() {
        let graph = diamond();
        assert_eq!(
            graph.parents("GO:0044237"),
            &ids(&["GO:0008152", "GO:0009987"])
        );
        assert_eq!(
            graph.children("GO:0008150"),
            &ids(&["GO:0008152", "GO:0009987"])
        );
        assert!(graph.parents("GO:0008150").is_empty());
        assert!(graph.children("GO:0006091").is_empty());
    }

    #[test]
    fn test_unknown_term_is_empty_not_error() {
        let graph = diamond();
        assert!(!graph.contains("GO:9999999"));
        assert!(graph.parents("GO:9999999").is_empty());
        assert!(graph.children("GO:9999999").is_empty());
        assert!(graph.ancestors("GO:9999999").is_empty());
        assert!(graph.descendants("GO:9999999").is_empty());
    }

    #[test]
    fn test_ancestors_deduplicate_diamond() {
        let graph = diamond();
        assert_eq!(
            graph.ancestors("GO:0006091"),
            ids(&["GO:0044237", "GO:0009987", "GO:0008152", "GO:0008150"])
        );
    }

    #[test]
    fn test_descendants_of_root() {
        let graph = diamond();
        assert_eq!(
            graph.descendants("GO:0008150"),
            ids(&["GO:0009987", "GO:0008152", "GO:0044237", "GO:0006091"])
        );
    }

    #[test]
    fn test_ancestor_closure() {
        let graph = diamond();
        for term in graph.terms() {
            let ancestors = graph.ancestors(term.id.as_str());
            assert!(graph.parents(term.id.as_str()).is_subset(&ancestors));
            for ancestor in &ancestors {
                assert!(graph.parents(ancestor.as_str()).is_subset(&ancestors));
            }
        }
    }

    #[test]
    fn test_parent_child_symmetry() {
        let graph = diamond();
        for child in graph.terms() {
            for parent in &child.parents {
                assert!(graph.children(parent.as_str()).contains(&child.id));
            }
            for ancestor in graph.ancestors(child.id.as_str()) {
                assert!(graph.descendants(ancestor.as_str()).contains(&child.id));
            }
        }
    }

    #[test]
    fn test_add_is_a_creates_missing_parent() {
        let mut graph = OntologyGraph::new();
        graph.add_is_a("GO:0005737", "GO:0005575");
        assert!(graph.contains("GO:0005575"));
        assert_eq!(graph.roots(), ids(&["GO:0005575"]));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_add_term_merges_label_into_existing() {
        let mut graph = OntologyGraph::new();
        graph.add_is_a("GO:0005737", "GO:0005575");
        graph.add_term(
            Term::new("GO:0005575")
                .with_name("cellular_component")
                .with_namespace(Namespace::CellularComponent),
        );
        let root = graph.term("GO:0005575").unwrap();
        assert_eq!(root.name.as_deref(), Some("cellular_component"));
        assert!(root.children.contains("GO:0005737"));
        assert_eq!(
            graph.namespace("GO:0005575"),
            Some(Namespace::CellularComponent)
        );
    }

    #[test]
    fn test_cycle_does_not_hang() {
        let mut graph = OntologyGraph::new();
        graph.add_is_a("A", "B");
        graph.add_is_a("B", "C");
        graph.add_is_a("C", "A");
        assert_eq!(graph.ancestors("A"), ids(&["B", "C"]));
        assert_eq!(graph.descendants("A"), ids(&["B", "C"]));
    }
}
