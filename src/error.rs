//! Error types shared across the crate

use crate::graph::TermId;
use thiserror::Error;

/// Errors that can occur while mapping or aggregating over an ontology
#[derive(Debug, Error)]
pub enum OntologyError {
    /// The slim search ran out of ancestors without meeting a slim term.
    /// The ontology is missing a slim member at the top of this term's namespace.
    #[error("No slim ancestor reachable from {term}")]
    NoSlimAncestor { term: TermId },

    #[error("Slim search for {term} exceeded {depth} generations")]
    SlimSearchExhausted { term: TermId, depth: usize },

    #[error("Intensity vector for {term} has {found} samples, expected {expected}")]
    IntensityLength {
        term: TermId,
        expected: usize,
        found: usize,
    },

    #[error("Invalid intensity {value} for {term}: intensities must be finite and non-negative")]
    InvalidIntensity { term: TermId, value: f64 },

    #[error("Observation has no annotated terms")]
    EmptyObservation,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for ontology operations
pub type OntologyResult<T> = Result<T, OntologyError>;
