use super::individual::Individual;
use crate::types::Action;

/// First-match-wins policy inference.
///
/// Rules are scanned in genome order and the first whose condition matches
/// the observation decides the action. The individual's default action
/// answers when no rule matches, so inference is total over the observation
/// space. Rule order is part of the policy's behavior and the genetic
/// operators preserve it exactly.
pub fn infer_action(indiv: &Individual, obs: &[f64]) -> Action {
    for rule in indiv.rules() {
        if rule.matches(obs) {
            return rule.action();
        }
    }
    indiv.default_action()
}
