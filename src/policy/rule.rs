use super::condition::Condition;
use crate::types::Action;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One condition-to-action rule. Mutation replaces its parts through the
/// setters; everything else reads it as a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    condition: Condition,
    action: Action,
}

impl Rule {
    pub fn new(condition: Condition, action: Action) -> Self {
        Self { condition, action }
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn set_condition(&mut self, condition: Condition) {
        self.condition = condition;
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn set_action(&mut self, action: Action) {
        self.action = action;
    }

    pub fn matches(&self, obs: &[f64]) -> bool {
        self.condition.matches(obs)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.condition, self.action)
    }
}
