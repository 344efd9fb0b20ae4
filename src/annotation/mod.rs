//! Intensity aggregation over the ontology
//!
//! Peptide observations are expanded to every ancestor of their annotated
//! terms and accumulated into one [`AnnotationNode`] per term.

mod hierarchy;
mod node;
mod observation;

pub use hierarchy::{AnnotationHierarchy, SlimNode};
pub use node::AnnotationNode;
pub use observation::Observation;
