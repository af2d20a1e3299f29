use crate::encoding::Encoding;
use crate::types::{Interval, Phenotype};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable pairing of raw condition alleles with their decoded phenotype.
///
/// The phenotype is decoded once at construction and cached, since matching
/// runs on every inference step of every rollout. Nothing mutates a condition
/// in place; mutation builds a replacement from fresh alleles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    alleles: Vec<f64>,
    phenotype: Phenotype,
}

impl Condition {
    pub fn new<E: Encoding>(alleles: Vec<f64>, encoding: &E) -> Self {
        let phenotype = encoding.decode(&alleles);
        Self { alleles, phenotype }
    }

    pub fn alleles(&self) -> &[f64] {
        &self.alleles
    }

    pub fn phenotype(&self) -> &[Interval] {
        &self.phenotype
    }

    /// How general this condition is, per the encoding's scoring.
    pub fn generality<E: Encoding>(&self, encoding: &E) -> f64 {
        encoding.condition_generality(&self.phenotype)
    }

    /// True when every phenotype interval contains its observation component.
    pub fn matches(&self, obs: &[f64]) -> bool {
        debug_assert_eq!(obs.len(), self.phenotype.len());
        self.phenotype
            .iter()
            .zip(obs)
            .all(|(interval, &val)| interval.contains(val))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.phenotype.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join(" && "))
    }
}
