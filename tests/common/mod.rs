//! Common test utilities for ontoquant integration tests
//!
//! Provides a small hand-curated GO fixture and seeded random DAGs with
//! matching peptide observations.

pub mod ontology_builder;

pub use ontology_builder::{go_fixture, go_slim, random_dag, random_observations, RandomDagConfig};
