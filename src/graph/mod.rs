//! Core ontology data structures

mod ontology;
mod term;


pub use ontology::{GraphDocument, OntologyGraph, TermRecord};
pub use term::{Namespace, Term, TermId};
