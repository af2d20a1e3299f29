use super::{Assessment, FitnessEvaluator};
use crate::error::Result;
use crate::policy::Individual;
use crate::types::{Action, Obs, ObsDim};

/// Outcome of one environment step.
#[derive(Debug, Clone)]
pub struct Step {
    pub obs: Obs,
    pub reward: f64,
    pub terminal: bool,
}

/// A sequential-decision task the evolved policies act in. Only the surface
/// the evaluator needs; the generational loop never touches an environment.
pub trait Environment {
    /// Ordered observation-space dimensions.
    fn obs_space(&self) -> &[ObsDim];

    /// The task's action set. Doubles as the default-action domain.
    fn action_space(&self) -> &[Action];

    /// Hard cap on steps per episode.
    fn time_limit(&self) -> usize;

    /// Start a fresh episode and return the initial observation.
    fn reset(&mut self) -> Obs;

    fn step(&mut self, action: Action) -> Step;
}

/// Scores a policy by its mean discounted return over repeated episodes.
///
/// Each assessment clones the pristine environment the evaluator was built
/// with, so every individual of a generation faces the same episode sequence
/// and scores differ only by policy.
pub struct RolloutEvaluator<E> {
    env: E,
}

impl<E: Environment + Clone> RolloutEvaluator<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }
}

impl<E: Environment + Clone> FitnessEvaluator for RolloutEvaluator<E> {
    fn evaluate(
        &self,
        indiv: &Individual,
        num_rollouts: usize,
        discount: f64,
    ) -> Result<Assessment> {
        assert!(num_rollouts > 0, "at least one rollout is required");
        let mut env = self.env.clone();
        let mut total_return = 0.0;
        let mut total_steps: u64 = 0;

        for _ in 0..num_rollouts {
            let mut obs = env.reset();
            let mut episode_return = 0.0;
            let mut step_count = 0usize;
            loop {
                let action = indiv.select_action(&obs);
                let step = env.step(action);
                episode_return += discount.powi(step_count as i32) * step.reward;
                step_count += 1;
                obs = step.obs;
                if step.terminal || step_count >= env.time_limit() {
                    break;
                }
            }
            total_return += episode_return;
            total_steps += step_count as u64;
        }

        Ok(Assessment {
            perf: total_return / num_rollouts as f64,
            time_steps_used: total_steps,
        })
    }
}
