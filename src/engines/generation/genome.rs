use crate::encoding::Encoding;
use crate::policy::{Condition, Individual, Rule};
use crate::types::Action;

/// Linearized form of an individual's rule list.
///
/// Each rule contributes its condition alleles followed by its action, so a
/// genome holds `indiv_size * (alleles_per_condition + 1)` positions. Every
/// individual of a run flattens to the same layout, which is what lets
/// uniform crossover swap positions blindly:
/// - condition slots only ever exchange with condition slots
/// - action slots only ever exchange with action slots
/// - any swap outcome reassembles into a valid individual
///
/// # Conversion
///
/// `flatten` goes from `Individual` to `Genome`, `reassemble` goes back.
pub type Genome = Vec<Allele>;

/// One genome position: a raw condition value or a rule's action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Allele {
    Cond(f64),
    Action(Action),
}

/// Flatten an individual's rules into one linear allele sequence.
pub fn flatten(indiv: &Individual) -> Genome {
    let mut genome = Vec::new();
    for rule in indiv.rules() {
        genome.extend(rule.condition().alleles().iter().map(|&v| Allele::Cond(v)));
        genome.push(Allele::Action(rule.action()));
    }
    genome
}

/// Rebuild an individual from a flattened allele sequence.
///
/// The default action and selectable set are inherited from the parents and
/// the assessment fields start unset. Panics when the genome does not slice
/// into `indiv_size` rules of the encoding's layout; that is a programming
/// fault in the operator pipeline, not a recoverable condition.
pub fn reassemble<E: Encoding>(
    genome: Genome,
    default_action: Action,
    selectable_actions: Vec<Action>,
    encoding: &E,
    indiv_size: usize,
) -> Individual {
    let alleles_per_cond = encoding.alleles_per_condition();
    let alleles_per_rule = alleles_per_cond + 1;
    assert_eq!(
        genome.len(),
        indiv_size * alleles_per_rule,
        "genome of {} positions does not hold {} rules of {} alleles",
        genome.len(),
        indiv_size,
        alleles_per_rule
    );

    let mut rules = Vec::with_capacity(indiv_size);
    for chunk in genome.chunks_exact(alleles_per_rule) {
        let (cond_slots, action_slot) = chunk.split_at(alleles_per_cond);
        let cond_alleles: Vec<f64> = cond_slots
            .iter()
            .map(|allele| match allele {
                Allele::Cond(v) => *v,
                Allele::Action(a) => panic!("action {} landed in a condition slot", a),
            })
            .collect();
        let action = match action_slot[0] {
            Allele::Action(a) => a,
            Allele::Cond(v) => panic!("condition allele {} landed in the action slot", v),
        };
        rules.push(Rule::new(Condition::new(cond_alleles, encoding), action));
    }
    Individual::new(rules, default_action, selectable_actions)
}
