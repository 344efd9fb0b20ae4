//! ontoquant: ontology-aware annotation abundance quantification
//!
//! Aggregates peptide-level intensities up a Gene Ontology style DAG and
//! collapses the result onto a curated slim vocabulary.
//!
//! # Core Concepts
//!
//! - **OntologyGraph**: multi-parent DAG of terms with parent, child,
//!   ancestor and descendant queries
//! - **SlimMapper**: maps any term to its closest slim ancestor, ties broken
//!   alphabetically
//! - **AnnotationHierarchy**: expands each observation to all ancestors and
//!   accumulates one [`AnnotationNode`] per term
//!
//! # Example
//!
//! ```
//! use ontoquant::{AnnotationHierarchy, Observation, OntologyGraph, SlimIndex, SlimMapper};
//!
//! let mut graph = OntologyGraph::new();
//! graph.add_is_a("A", "R");
//! graph.add_is_a("B", "R");
//!
//! let hierarchy =
//!     AnnotationHierarchy::build(&graph, [Observation::new("A", vec![10.0, 0.0])]).unwrap();
//! assert_eq!(hierarchy.get("R").unwrap().intensity, vec![10.0, 0.0]);
//!
//! let slim: SlimIndex = ["R"].into_iter().collect();
//! let mapper = SlimMapper::new(&graph, &slim);
//! assert_eq!(mapper.map_to_slim("A").unwrap().as_str(), "R");
//! ```

mod error;
mod graph;
mod report;

pub mod annotation;
pub mod config;
pub mod io;
pub mod pipeline;
pub mod query;
pub mod slim;

pub use annotation::{AnnotationHierarchy, AnnotationNode, Observation, SlimNode};
pub use config::QuantConfig;
pub use error::{OntologyError, OntologyResult};
pub use graph::{GraphDocument, Namespace, OntologyGraph, Term, TermId, TermRecord};
pub use query::{Direction, LineageQuery, LineageResult};
pub use report::{Report, TermRow};
pub use slim::{SlimIndex, SlimMapper, SlimTerm};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
