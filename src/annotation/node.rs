//! Per-term aggregation record

use crate::graph::TermId;
use serde::{Deserialize, Serialize};

/// Aggregated intensity and peptide evidence for one term
///
/// `intensity` holds one accumulator per sample, in the sample order fixed
/// by the caller. Nodes only grow: there is no removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationNode {
    pub id: TermId,
    pub intensity: Vec<f64>,
    pub peptide_count: usize,
}

impl AnnotationNode {
    /// Create a node from its first contributing peptide
    pub fn new(id: impl Into<TermId>, intensity: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            intensity,
            peptide_count: 1,
        }
    }

    /// Add one more peptide's intensities
    ///
    /// The peptide counts as supporting evidence only if it was measured
    /// above zero in at least one sample; an all-zero vector is still summed.
    /// The first positive peptide of a node created from an all-zero vector
    /// takes over that initial count instead of adding to it, so the count is
    /// `max(1, positive peptides)` whatever the arrival order.
    pub fn add_peptide(&mut self, intensity: &[f64]) {
        debug_assert_eq!(self.intensity.len(), intensity.len());
        // Intensities are non-negative, so any positive slot means an
        // earlier positive peptide
        let had_evidence = self.has_evidence();
        for (slot, value) in self.intensity.iter_mut().zip(intensity) {
            *slot += value;
        }
        if had_evidence && intensity.iter().any(|&v| v > 0.0) {
            self.peptide_count += 1;
        }
    }

    /// Whether any contributing peptide was measured above zero
    pub fn has_evidence(&self) -> bool {
        self.intensity.iter().any(|&v| v > 0.0)
    }

    /// Sum another node's intensities and peptide count into this one
    pub fn absorb(&mut self, other: &AnnotationNode) {
        debug_assert_eq!(self.intensity.len(), other.intensity.len());
        for (slot, value) in self.intensity.iter_mut().zip(&other.intensity) {
            *slot += value;
        }
        self.peptide_count += other.peptide_count;
    }

    /// Intensity summed over all samples
    pub fn total_intensity(&self) -> f64 {
        self.intensity.iter().sum()
    }

    pub fn sample_count(&self) -> usize {
        self.intensity.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_counts_one_peptide() {
        let node = AnnotationNode::new("GO:0008150", vec![5.0, 0.0, 2.5]);
        assert_eq!(node.peptide_count, 1);
        assert_eq!(node.intensity, vec![5.0, 0.0, 2.5]);
        assert_eq!(node.sample_count(), 3);
    }

    #[test]
    fn test_zero_peptide_does_not_count() {
        let mut node = AnnotationNode::new("GO:0008150", vec![1.0, 2.0, 3.0]);
        node.add_peptide(&[0.0, 0.0, 0.0]);
        assert_eq!(node.intensity, vec![1.0, 2.0, 3.0]);
        assert_eq!(node.peptide_count, 1);
    }

    #[test]
    fn test_positive_peptide_counts() {
        let mut node = AnnotationNode::new("GO:0008150", vec![1.0, 2.0, 3.0]);
        node.add_peptide(&[5.0, 0.0, 0.0]);
        assert_eq!(node.intensity, vec![6.0, 2.0, 3.0]);
        assert_eq!(node.peptide_count, 2);
    }

    #[test]
    fn test_zero_first_peptide_is_replaced_by_first_positive() {
        let mut node = AnnotationNode::new("GO:0008150", vec![0.0, 0.0]);
        assert!(!node.has_evidence());
        node.add_peptide(&[5.0, 0.0]);
        assert_eq!(node.peptide_count, 1);
        assert!(node.has_evidence());
        node.add_peptide(&[0.0, 2.0]);
        assert_eq!(node.intensity, vec![5.0, 2.0]);
        assert_eq!(node.peptide_count, 2);
    }

    #[test]
    fn test_count_ignores_arrival_order() {
        let peptides = [vec![0.0, 0.0], vec![5.0, 0.0], vec![0.0, 0.0], vec![1.0, 1.0]];

        let mut forward = AnnotationNode::new("GO:0005575", peptides[0].clone());
        peptides[1..].iter().for_each(|p| forward.add_peptide(p));

        let mut reverse = AnnotationNode::new("GO:0005575", peptides[3].clone());
        peptides[..3].iter().rev().for_each(|p| reverse.add_peptide(p));

        assert_eq!(forward, reverse);
        assert_eq!(forward.peptide_count, 2);
    }

    #[test]
    fn test_absorb_sums_counts() {
        let mut a = AnnotationNode::new("GO:0005575", vec![10.0, 0.0]);
        let mut b = AnnotationNode::new("GO:0005737", vec![1.0, 4.0]);
        b.add_peptide(&[0.0, 1.0]);

        a.absorb(&b);
        assert_eq!(a.id.as_str(), "GO:0005575");
        assert_eq!(a.intensity, vec![11.0, 5.0]);
        assert_eq!(a.peptide_count, 3);
        assert_eq!(a.total_intensity(), 16.0);
    }

    #[test]
    fn test_node_serializes_flat() {
        let node = AnnotationNode::new("GO:0003674", vec![1.5]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["id"], "GO:0003674");
        assert_eq!(json["intensity"][0], 1.5);
        assert_eq!(json["peptide_count"], 1);
    }
}
