use super::inference::infer_action;
use super::rule::Rule;
use crate::error::{Result, RulevoError};
use crate::types::Action;
use serde::{Deserialize, Serialize};

/// The population evolved by the genetic algorithm.
pub type Population = Vec<Individual>;

/// A candidate policy: an ordered rule list plus a default action.
///
/// `fitness` and `time_steps_used` stay unset until an evaluator writes
/// them. Reading either earlier is a pipeline-order fault and errors instead
/// of handing back a silent default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Individual {
    rules: Vec<Rule>,
    default_action: Action,
    selectable_actions: Vec<Action>,
    fitness: Option<f64>,
    time_steps_used: Option<u64>,
}

impl Individual {
    pub fn new(rules: Vec<Rule>, default_action: Action, selectable_actions: Vec<Action>) -> Self {
        Self {
            rules,
            default_action,
            selectable_actions,
            fitness: None,
            time_steps_used: None,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub(crate) fn rules_mut(&mut self) -> &mut [Rule] {
        &mut self.rules
    }

    pub fn default_action(&self) -> Action {
        self.default_action
    }

    /// Actions a rule of this individual may carry: the action domain minus
    /// the default action.
    pub fn selectable_actions(&self) -> &[Action] {
        &self.selectable_actions
    }

    /// Performance score from the most recent fitness assessment.
    pub fn fitness(&self) -> Result<f64> {
        self.fitness.ok_or(RulevoError::UnsetProperty("fitness"))
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Environment steps consumed by the most recent fitness assessment.
    pub fn time_steps_used(&self) -> Result<u64> {
        self.time_steps_used
            .ok_or(RulevoError::UnsetProperty("time_steps_used"))
    }

    pub fn set_time_steps_used(&mut self, steps: u64) {
        self.time_steps_used = Some(steps);
    }

    /// Act as a policy: infer an action for `obs` from the rule list.
    pub fn select_action(&self, obs: &[f64]) -> Action {
        infer_action(self, obs)
    }
}
