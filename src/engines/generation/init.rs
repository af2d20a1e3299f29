use crate::config::EvolutionConfig;
use crate::encoding::Encoding;
use crate::error::{Result, RulevoError};
use crate::policy::{Condition, Individual, Population, Rule};
use crate::types::Action;
use rand::Rng;
use std::collections::HashSet;

/// Build the initial population: `pop_size` individuals of `indiv_size`
/// random rules each, default actions drawn uniformly from the domain.
pub fn init_pop<E, R>(
    encoding: &E,
    default_actions: &[Action],
    cfg: &EvolutionConfig,
    rng: &mut R,
) -> Result<Population>
where
    E: Encoding,
    R: Rng + ?Sized,
{
    validate_action_domain(default_actions)?;
    Ok((0..cfg.pop_size)
        .map(|_| init_indiv(encoding, default_actions, cfg.indiv_size, rng))
        .collect())
}

/// The domain must hold at least two distinct actions, otherwise some
/// individual would end up with an empty selectable set and no rule could
/// carry an action.
fn validate_action_domain(default_actions: &[Action]) -> Result<()> {
    let distinct: HashSet<Action> = default_actions.iter().copied().collect();
    if distinct.len() != default_actions.len() {
        return Err(RulevoError::Configuration(
            "Action domain contains duplicates".to_string(),
        ));
    }
    if distinct.len() < 2 {
        return Err(RulevoError::Configuration(
            "Action domain must hold at least two actions".to_string(),
        ));
    }
    Ok(())
}

fn init_indiv<E, R>(
    encoding: &E,
    default_actions: &[Action],
    indiv_size: usize,
    rng: &mut R,
) -> Individual
where
    E: Encoding,
    R: Rng + ?Sized,
{
    let default_action = default_actions[rng.gen_range(0..default_actions.len())];
    let selectable_actions: Vec<Action> = default_actions
        .iter()
        .copied()
        .filter(|&a| a != default_action)
        .collect();
    let rules = (0..indiv_size)
        .map(|_| init_rule(encoding, &selectable_actions, rng))
        .collect();
    Individual::new(rules, default_action, selectable_actions)
}

fn init_rule<E, R>(encoding: &E, selectable_actions: &[Action], rng: &mut R) -> Rule
where
    E: Encoding,
    R: Rng + ?Sized,
{
    let condition = Condition::new(encoding.init_condition_alleles(rng), encoding);
    let action = selectable_actions[rng.gen_range(0..selectable_actions.len())];
    Rule::new(condition, action)
}
