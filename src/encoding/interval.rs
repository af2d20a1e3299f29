use super::Encoding;
use crate::error::{Result, RulevoError};
use crate::types::{Interval, ObsDim, Phenotype};
use rand::Rng;

/// Interval encoding with two unordered bound alleles per dimension.
///
/// Each dimension owns a pair of raw alleles and decoding sorts the pair, so
/// the smaller value always becomes the interval's lower bound. Every
/// possible allele vector decodes to a valid phenotype, which means crossover
/// and mutation can recombine alleles freely without producing broken
/// conditions.
#[derive(Debug, Clone)]
pub struct UnorderedBoundEncoding {
    obs_space: Vec<ObsDim>,
    p_allele_mut: f64,
    mut_span: f64,
}

impl UnorderedBoundEncoding {
    /// `p_allele_mut` is the per-allele mutation probability. `mut_span`
    /// scales the mutation noise as a fraction of the dimension's width.
    pub fn new(obs_space: Vec<ObsDim>, p_allele_mut: f64, mut_span: f64) -> Result<Self> {
        if obs_space.is_empty() {
            return Err(RulevoError::Configuration(
                "Observation space must have at least one dimension".to_string(),
            ));
        }
        for dim in &obs_space {
            if dim.lower >= dim.upper {
                return Err(RulevoError::Configuration(format!(
                    "Dimension bounds [{}, {}] are not ascending",
                    dim.lower, dim.upper
                )));
            }
        }
        if p_allele_mut < 0.0 || p_allele_mut > 1.0 {
            return Err(RulevoError::Configuration(
                "Allele mutation rate must be between 0 and 1".to_string(),
            ));
        }
        if mut_span <= 0.0 {
            return Err(RulevoError::Configuration(
                "Mutation span must be positive".to_string(),
            ));
        }
        Ok(Self {
            obs_space,
            p_allele_mut,
            mut_span,
        })
    }
}

impl Encoding for UnorderedBoundEncoding {
    fn obs_space(&self) -> &[ObsDim] {
        &self.obs_space
    }

    fn decode(&self, alleles: &[f64]) -> Phenotype {
        assert_eq!(
            alleles.len(),
            self.alleles_per_condition(),
            "condition holds {} alleles, expected {}",
            alleles.len(),
            self.alleles_per_condition()
        );
        alleles
            .chunks_exact(2)
            .map(|pair| Interval::new(pair[0].min(pair[1]), pair[0].max(pair[1])))
            .collect()
    }

    fn condition_generality(&self, phenotype: &[Interval]) -> f64 {
        assert_eq!(phenotype.len(), self.obs_space.len());
        let total: f64 = phenotype
            .iter()
            .zip(&self.obs_space)
            .map(|(interval, dim)| interval.width() / dim.width())
            .sum();
        total / self.obs_space.len() as f64
    }

    fn init_condition_alleles<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let mut alleles = Vec::with_capacity(self.alleles_per_condition());
        for dim in &self.obs_space {
            alleles.push(rng.gen_range(dim.lower..=dim.upper));
            alleles.push(rng.gen_range(dim.lower..=dim.upper));
        }
        alleles
    }

    fn mutate_condition_alleles<R: Rng + ?Sized>(&self, alleles: &[f64], rng: &mut R) -> Vec<f64> {
        assert_eq!(alleles.len(), self.alleles_per_condition());
        alleles
            .iter()
            .enumerate()
            .map(|(idx, &allele)| {
                if rng.gen::<f64>() < self.p_allele_mut {
                    let dim = &self.obs_space[idx / 2];
                    let span = self.mut_span * dim.width();
                    (allele + rng.gen_range(-span..=span)).clamp(dim.lower, dim.upper)
                } else {
                    allele
                }
            })
            .collect()
    }
}
