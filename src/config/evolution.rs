use super::traits::ConfigSection;
use crate::error::{Result, RulevoError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Number of individuals in the population, fixed across generations.
    pub pop_size: usize,
    /// Number of rules in every individual.
    pub indiv_size: usize,
    /// Tournament size as a fraction of the candidate set, in (0, 1].
    pub tourn_percent: f64,
    /// Probability that a parent pair is recombined rather than copied.
    pub p_cross: f64,
    /// Per-position swap probability inside uniform crossover.
    pub p_cross_swap: f64,
    /// Per-rule action mutation probability.
    pub p_mut: f64,
    /// Generations counted from the start of the run that use niched
    /// selection before falling back to standard selection.
    pub num_niched_select_gens: usize,
    /// Generations executed by a full run.
    pub num_gens: usize,
    /// RNG seed. `None` seeds from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            pop_size: 200,
            indiv_size: 10,
            tourn_percent: 0.3,
            p_cross: 0.7,
            p_cross_swap: 0.5,
            p_mut: 0.05,
            num_niched_select_gens: 25,
            num_gens: 50,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<()> {
        if self.pop_size == 0 {
            return Err(RulevoError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.indiv_size == 0 {
            return Err(RulevoError::Configuration(
                "Individual size must be at least 1".to_string(),
            ));
        }
        if self.tourn_percent <= 0.0 || self.tourn_percent > 1.0 {
            return Err(RulevoError::Configuration(
                "Tournament percent must be in (0, 1]".to_string(),
            ));
        }
        if self.p_cross < 0.0 || self.p_cross > 1.0 {
            return Err(RulevoError::Configuration(
                "Crossover rate must be between 0 and 1".to_string(),
            ));
        }
        if self.p_cross_swap < 0.0 || self.p_cross_swap > 1.0 {
            return Err(RulevoError::Configuration(
                "Crossover swap rate must be between 0 and 1".to_string(),
            ));
        }
        if self.p_mut < 0.0 || self.p_mut > 1.0 {
            return Err(RulevoError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}
