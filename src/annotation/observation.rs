//! Peptide-level observations fed into the hierarchy

use crate::error::{OntologyError, OntologyResult};
use crate::graph::{OntologyGraph, TermId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One peptide: the terms it is annotated with and its per-sample intensity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub terms: Vec<TermId>,
    pub intensity: Vec<f64>,
}

impl Observation {
    /// A peptide annotated with a single term
    pub fn new(term: impl Into<TermId>, intensity: Vec<f64>) -> Self {
        Self {
            terms: vec![term.into()],
            intensity,
        }
    }

    /// A peptide annotated with several terms
    pub fn with_terms<I, T>(terms: I, intensity: Vec<f64>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TermId>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
            intensity,
        }
    }

    /// Check the observation against the aggregation contract
    ///
    /// `expected` is the fixed number of samples, if already known.
    pub fn validate(&self, expected: Option<usize>) -> OntologyResult<()> {
        let Some(first) = self.terms.first() else {
            return Err(OntologyError::EmptyObservation);
        };

        if let Some(expected) = expected {
            if self.intensity.len() != expected {
                return Err(OntologyError::IntensityLength {
                    term: first.clone(),
                    expected,
                    found: self.intensity.len(),
                });
            }
        }

        if let Some(&value) = self.intensity.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(OntologyError::InvalidIntensity {
                term: first.clone(),
                value,
            });
        }
        Ok(())
    }
}

/// Terms an observation contributes to, split by whether the graph knows them
#[derive(Debug, Default)]
pub(crate) struct Expansion<'o> {
    pub known: BTreeSet<TermId>,
    pub unknown: Vec<&'o TermId>,
}

/// Union of `{t} ∪ ancestors(t)` over every known term of the observation
///
/// A set is used so that a peptide annotated with two related terms still
/// counts once toward their shared ancestors.
pub(crate) fn expand<'o>(graph: &OntologyGraph, terms: &'o [TermId]) -> Expansion<'o> {
    let mut expansion = Expansion::default();
    for term in terms {
        if graph.contains(term.as_str()) {
            expansion.known.insert(term.clone());
            expansion.known.extend(graph.ancestors(term.as_str()));
        } else {
            expansion.unknown.push(term);
        }
    }
    expansion
}
