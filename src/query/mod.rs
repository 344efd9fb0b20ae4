//! Lineage queries over an ontology graph
//!
//! Ancestor, descendant and closest-slim searches all expand a frontier one
//! generation at a time with a visited set, which copes with multi-parent
//! terms and never loops on malformed input.

mod traverse;
mod types;

pub use traverse::{Generations, LineageQuery};
pub use types::{Direction, LineageResult};
