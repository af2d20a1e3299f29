pub mod interval;

pub use interval::UnorderedBoundEncoding;

use crate::types::{Interval, ObsDim, Phenotype};
use rand::Rng;

/// Genotype-to-phenotype boundary for rule conditions.
///
/// The genetic operators treat condition alleles as an opaque flat `Vec<f64>`
/// and delegate everything that knows their meaning here: decoding into
/// interval predicates, drawing fresh alleles, and mutating existing ones.
pub trait Encoding {
    /// Ordered dimensions of the observation space this encoding covers.
    fn obs_space(&self) -> &[ObsDim];

    /// Decode raw alleles into one interval predicate per dimension.
    fn decode(&self, alleles: &[f64]) -> Phenotype;

    /// Score how general (wide) a decoded phenotype is.
    fn condition_generality(&self, phenotype: &[Interval]) -> f64;

    /// Fresh random alleles for one condition.
    fn init_condition_alleles<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64>;

    /// Mutated copy of a condition's alleles.
    fn mutate_condition_alleles<R: Rng + ?Sized>(&self, alleles: &[f64], rng: &mut R) -> Vec<f64>;

    /// Number of raw alleles that encode one condition.
    fn alleles_per_condition(&self) -> usize {
        2 * self.obs_space().len()
    }
}
