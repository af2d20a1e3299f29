pub mod rollout;

pub use rollout::{Environment, RolloutEvaluator, Step};

use crate::config::EvaluationConfig;
use crate::error::Result;
use crate::policy::Individual;
use rayon::prelude::*;

/// Result of one fitness assessment.
#[derive(Debug, Clone, Copy)]
pub struct Assessment {
    pub perf: f64,
    pub time_steps_used: u64,
}

/// Boundary to whatever scores a policy. Implementations must be callable
/// from parallel workers, hence the `Sync` bound at the use sites.
pub trait FitnessEvaluator {
    fn evaluate(&self, indiv: &Individual, num_rollouts: usize, discount: f64)
        -> Result<Assessment>;
}

/// Assess every individual and write the scores back onto it.
///
/// Individuals never share state, so assessments fan out across worker
/// threads and each result lands on the exact individual that produced it.
/// The first failed assessment aborts the whole pass.
pub fn evaluate_population<F>(
    evaluator: &F,
    pop: &mut [Individual],
    cfg: &EvaluationConfig,
) -> Result<()>
where
    F: FitnessEvaluator + Sync + ?Sized,
{
    pop.par_iter_mut().try_for_each(|indiv| {
        let assessment = evaluator.evaluate(indiv, cfg.num_rollouts, cfg.discount)?;
        indiv.set_fitness(assessment.perf);
        indiv.set_time_steps_used(assessment.time_steps_used);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RulevoError;
    use crate::types::Action;

    // scores each individual by its own default action value
    struct DefaultActionScore;

    impl FitnessEvaluator for DefaultActionScore {
        fn evaluate(
            &self,
            indiv: &Individual,
            num_rollouts: usize,
            _discount: f64,
        ) -> Result<Assessment> {
            Ok(Assessment {
                perf: indiv.default_action().0 as f64,
                time_steps_used: num_rollouts as u64,
            })
        }
    }

    struct AlwaysFails;

    impl FitnessEvaluator for AlwaysFails {
        fn evaluate(
            &self,
            _indiv: &Individual,
            _num_rollouts: usize,
            _discount: f64,
        ) -> Result<Assessment> {
            Err(RulevoError::Evaluation("backend went away".to_string()))
        }
    }

    fn pop_of(n: usize) -> Vec<Individual> {
        (0..n)
            .map(|i| Individual::new(vec![], Action(i), vec![Action(n)]))
            .collect()
    }

    #[test]
    fn scores_land_on_the_individual_that_produced_them() {
        let mut pop = pop_of(32);
        let cfg = EvaluationConfig::default();

        evaluate_population(&DefaultActionScore, &mut pop, &cfg).unwrap();

        for (i, indiv) in pop.iter().enumerate() {
            assert_eq!(indiv.fitness().unwrap(), i as f64);
            assert_eq!(indiv.time_steps_used().unwrap(), cfg.num_rollouts as u64);
        }
    }

    #[test]
    fn a_failed_assessment_aborts_the_pass() {
        let mut pop = pop_of(8);
        let cfg = EvaluationConfig::default();

        let result = evaluate_population(&AlwaysFails, &mut pop, &cfg);
        assert!(matches!(result, Err(RulevoError::Evaluation(_))));
    }
}
