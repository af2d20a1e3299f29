use super::genome;
use crate::config::EvolutionConfig;
use crate::encoding::Encoding;
use crate::error::{Result, RulevoError};
use crate::policy::{Condition, Individual};
use crate::types::Action;
use rand::Rng;
use std::mem;

const MIN_TOURN_SIZE: usize = 2;

/// All population members sharing `default_action`.
pub fn niche(pop: &[Individual], default_action: Action) -> Vec<&Individual> {
    pop.iter()
        .filter(|indiv| indiv.default_action() == default_action)
        .collect()
}

/// Niched selection: each of the `pop_size` draws picks a default action
/// uniformly and runs a tournament inside that action's niche, so every
/// niche is sampled equally regardless of its current population share.
/// Errs as soon as a drawn niche has no members.
pub fn niched_selection<'a, R>(
    pop: &'a [Individual],
    default_actions: &[Action],
    cfg: &EvolutionConfig,
    rng: &mut R,
) -> Result<Vec<&'a Individual>>
where
    R: Rng + ?Sized,
{
    let niches: Vec<(Action, Vec<&Individual>)> = default_actions
        .iter()
        .map(|&action| (action, niche(pop, action)))
        .collect();

    let mut parents = Vec::with_capacity(cfg.pop_size);
    for _ in 0..cfg.pop_size {
        let (action, members) = &niches[rng.gen_range(0..niches.len())];
        if members.is_empty() {
            return Err(RulevoError::EmptyNiche(*action));
        }
        parents.push(tournament_selection(members, cfg.tourn_percent, rng)?);
    }
    Ok(parents)
}

/// Standard selection: `pop_size` tournaments over the whole population.
pub fn standard_selection<'a, R>(
    pop: &'a [Individual],
    cfg: &EvolutionConfig,
    rng: &mut R,
) -> Result<Vec<&'a Individual>>
where
    R: Rng + ?Sized,
{
    let candidates: Vec<&Individual> = pop.iter().collect();
    (0..cfg.pop_size)
        .map(|_| tournament_selection(&candidates, cfg.tourn_percent, rng))
        .collect()
}

/// Tournament selection: pick the best of K candidates drawn with
/// replacement. K scales with the candidate set, `max(2, ceil(tourn_percent
/// * len))`, so niche-local and population-wide tournaments exert comparable
/// relative pressure. Ties keep the earliest-drawn candidate.
pub fn tournament_selection<'a, R>(
    candidates: &[&'a Individual],
    tourn_percent: f64,
    rng: &mut R,
) -> Result<&'a Individual>
where
    R: Rng + ?Sized,
{
    assert!(!candidates.is_empty(), "tournament over an empty candidate set");
    let tourn_size =
        ((tourn_percent * candidates.len() as f64).ceil() as usize).max(MIN_TOURN_SIZE);

    let mut best = candidates[rng.gen_range(0..candidates.len())];
    for _ in 1..tourn_size {
        let challenger = candidates[rng.gen_range(0..candidates.len())];
        if challenger.fitness()? > best.fitness()? {
            best = challenger;
        }
    }
    Ok(best)
}

/// Crossover over a selected parent pool, niche by niche.
///
/// Parents are re-partitioned by default action and paired in selection
/// order, which selection already randomized. An odd parent out is carried
/// over as a single pass-through child. Total offspring equals `pop_size`
/// by construction; the asserts hold the pipeline to that.
pub fn niched_crossover<E, R>(
    parents: &[&Individual],
    default_actions: &[Action],
    encoding: &E,
    cfg: &EvolutionConfig,
    rng: &mut R,
) -> Vec<Individual>
where
    E: Encoding,
    R: Rng + ?Sized,
{
    assert_eq!(
        parents.len(),
        cfg.pop_size,
        "crossover expects exactly pop_size parents"
    );

    let mut offspring = Vec::with_capacity(cfg.pop_size);
    for &action in default_actions {
        let members: Vec<&Individual> = parents
            .iter()
            .copied()
            .filter(|p| p.default_action() == action)
            .collect();
        for pair in members.chunks(2) {
            match pair {
                [a, b] => {
                    let (child_a, child_b) = crossover_pair(a, b, encoding, cfg, rng);
                    offspring.push(child_a);
                    offspring.push(child_b);
                }
                [lone] => offspring.push(fresh_copy(lone)),
                _ => unreachable!(),
            }
        }
    }
    assert_eq!(
        offspring.len(),
        cfg.pop_size,
        "offspring count must equal pop_size"
    );
    offspring
}

/// With probability `p_cross` recombine the pair, otherwise pass both
/// parents through as copies.
fn crossover_pair<E, R>(
    parent_a: &Individual,
    parent_b: &Individual,
    encoding: &E,
    cfg: &EvolutionConfig,
    rng: &mut R,
) -> (Individual, Individual)
where
    E: Encoding,
    R: Rng + ?Sized,
{
    if rng.gen::<f64>() < cfg.p_cross {
        uniform_crossover(parent_a, parent_b, encoding, cfg, rng)
    } else {
        (fresh_copy(parent_a), fresh_copy(parent_b))
    }
}

/// Copy of a parent's genome with fresh unset assessment fields.
fn fresh_copy(parent: &Individual) -> Individual {
    Individual::new(
        parent.rules().to_vec(),
        parent.default_action(),
        parent.selectable_actions().to_vec(),
    )
}

/// Uniform crossover, swapping single positions of the flattened genomes.
///
/// Both parents must come from the same niche: crossover never mixes
/// default actions or selectable sets.
fn uniform_crossover<E, R>(
    parent_a: &Individual,
    parent_b: &Individual,
    encoding: &E,
    cfg: &EvolutionConfig,
    rng: &mut R,
) -> (Individual, Individual)
where
    E: Encoding,
    R: Rng + ?Sized,
{
    assert_eq!(
        parent_a.default_action(),
        parent_b.default_action(),
        "crossover parents must share a default action"
    );
    assert_eq!(
        parent_a.selectable_actions(),
        parent_b.selectable_actions(),
        "crossover parents must share selectable actions"
    );

    let mut genome_a = genome::flatten(parent_a);
    let mut genome_b = genome::flatten(parent_b);

    let total_positions = cfg.indiv_size * (encoding.alleles_per_condition() + 1);
    assert_eq!(genome_a.len(), total_positions);
    assert_eq!(genome_b.len(), total_positions);

    for idx in 0..total_positions {
        if rng.gen::<f64>() < cfg.p_cross_swap {
            mem::swap(&mut genome_a[idx], &mut genome_b[idx]);
        }
    }

    let default_action = parent_a.default_action();
    let selectable_actions = parent_a.selectable_actions().to_vec();

    let child_a = genome::reassemble(
        genome_a,
        default_action,
        selectable_actions.clone(),
        encoding,
        cfg.indiv_size,
    );
    let child_b = genome::reassemble(
        genome_b,
        default_action,
        selectable_actions,
        encoding,
        cfg.indiv_size,
    );
    (child_a, child_b)
}

/// Mutate every rule of `indiv` in place. Conditions are always re-derived
/// through the encoding's own mutation routine; each action flips with
/// probability `p_mut` to a different member of the selectable set.
///
/// The individual is expected to be a private copy, an offspring that no
/// other population member aliases.
pub fn mutate<E, R>(indiv: &mut Individual, encoding: &E, p_mut: f64, rng: &mut R)
where
    E: Encoding,
    R: Rng + ?Sized,
{
    let selectable = indiv.selectable_actions().to_vec();
    for rule in indiv.rules_mut() {
        let mut_alleles = encoding.mutate_condition_alleles(rule.condition().alleles(), rng);
        rule.set_condition(Condition::new(mut_alleles, encoding));
        rule.set_action(mutate_action(rule.action(), &selectable, p_mut, rng));
    }
}

fn mutate_action<R>(
    action: Action,
    selectable_actions: &[Action],
    p_mut: f64,
    rng: &mut R,
) -> Action
where
    R: Rng + ?Sized,
{
    if rng.gen::<f64>() < p_mut {
        let others: Vec<Action> = selectable_actions
            .iter()
            .copied()
            .filter(|&a| a != action)
            .collect();
        if others.is_empty() {
            // two-action domains leave a single selectable action
            return action;
        }
        others[rng.gen_range(0..others.len())]
    } else {
        action
    }
}
