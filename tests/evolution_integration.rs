use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rulevo::config::AppConfig;
use rulevo::encoding::UnorderedBoundEncoding;
use rulevo::engines::evaluation::{
    Assessment, Environment, FitnessEvaluator, RolloutEvaluator, Step,
};
use rulevo::engines::generation::{
    ChannelProgressCallback, EvolutionEngine, ProgressCallback, ProgressMessage,
};
use rulevo::error::{Result as RulevoResult, RulevoError};
use rulevo::policy::Individual;
use rulevo::types::{Action, Obs, ObsDim};

/// Simple progress callback for testing
struct TestProgressCallback {
    starts: usize,
    completes: usize,
    last_generation: usize,
}

impl TestProgressCallback {
    fn new() -> Self {
        Self {
            starts: 0,
            completes: 0,
            last_generation: 0,
        }
    }
}

impl ProgressCallback for TestProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {
        self.starts += 1;
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, mean_fitness: f64) {
        self.completes += 1;
        self.last_generation = generation;
        println!(
            "Generation {}: Best = {:.4}, Mean = {:.4}",
            generation, best_fitness, mean_fitness
        );
    }
}

/// Contextual-bandit style task: each step presents a fresh position in
/// [0, 10] and pays 1.0 when the policy answers with the region's action,
/// action 1 below 5.0 and action 2 from 5.0 up. Episodes never terminate on
/// their own, the time limit cuts them.
#[derive(Clone)]
struct RegionEnv {
    obs_space: Vec<ObsDim>,
    actions: Vec<Action>,
    rng: StdRng,
    position: f64,
}

impl RegionEnv {
    fn new(seed: u64) -> Self {
        Self {
            obs_space: vec![ObsDim::new(0.0, 10.0)],
            actions: vec![Action(0), Action(1), Action(2)],
            rng: StdRng::seed_from_u64(seed),
            position: 0.0,
        }
    }

    fn draw_position(&mut self) -> f64 {
        self.rng.gen_range(0.0..10.0)
    }

    fn correct_action(&self) -> Action {
        if self.position < 5.0 {
            Action(1)
        } else {
            Action(2)
        }
    }
}

impl Environment for RegionEnv {
    fn obs_space(&self) -> &[ObsDim] {
        &self.obs_space
    }

    fn action_space(&self) -> &[Action] {
        &self.actions
    }

    fn time_limit(&self) -> usize {
        10
    }

    fn reset(&mut self) -> Obs {
        self.position = self.draw_position();
        vec![self.position]
    }

    fn step(&mut self, action: Action) -> Step {
        let reward = if action == self.correct_action() {
            1.0
        } else {
            0.0
        };
        self.position = self.draw_position();
        Step {
            obs: vec![self.position],
            reward,
            terminal: false,
        }
    }
}

/// Create a minimal evolution config for fast testing
fn create_test_config(seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.evolution.pop_size = 30;
    config.evolution.indiv_size = 3;
    config.evolution.num_niched_select_gens = 3;
    config.evolution.num_gens = 5;
    config.evolution.seed = Some(seed);
    config.evaluation.num_rollouts = 4;
    config.evaluation.discount = 0.95;
    config
}

fn create_test_engine(
    seed: u64,
) -> RulevoResult<EvolutionEngine<UnorderedBoundEncoding, RolloutEvaluator<RegionEnv>>> {
    let env = RegionEnv::new(99);
    let default_actions = env.action_space().to_vec();
    let encoding = UnorderedBoundEncoding::new(env.obs_space().to_vec(), 0.1, 0.2)?;
    let evaluator = RolloutEvaluator::new(env);
    EvolutionEngine::new(create_test_config(seed), encoding, evaluator, default_actions)
}

fn policy_signature(indiv: &Individual) -> String {
    let mut parts: Vec<String> = indiv.rules().iter().map(|r| r.to_string()).collect();
    parts.push(format!("default -> {}", indiv.default_action()));
    parts.join("; ")
}

#[test]
fn evolution_preserves_population_shape() {
    let mut engine = create_test_engine(42).unwrap();

    engine.init().unwrap();
    assert_eq!(engine.population().len(), 30);

    for _ in 0..5 {
        engine.run_gen().unwrap();
        assert_eq!(engine.population().len(), 30, "population size is fixed");
        for indiv in engine.population() {
            assert_eq!(indiv.rules().len(), 3, "rule count is fixed");
            assert!(
                indiv.fitness().is_ok(),
                "every member is scored after a generation"
            );
            assert!(!indiv
                .selectable_actions()
                .contains(&indiv.default_action()));
        }
    }
    assert_eq!(engine.generation(), 5);
}

#[test]
fn full_runs_are_reproducible_under_a_fixed_seed() {
    let mut first = create_test_engine(7).unwrap();
    let mut second = create_test_engine(7).unwrap();

    first.run(&mut TestProgressCallback::new()).unwrap();
    second.run(&mut TestProgressCallback::new()).unwrap();

    let best_a = first.best_individual().unwrap();
    let best_b = second.best_individual().unwrap();

    assert_eq!(best_a.fitness().unwrap(), best_b.fitness().unwrap());
    assert_eq!(policy_signature(best_a), policy_signature(best_b));

    let sigs_a: Vec<String> = first.population().iter().map(policy_signature).collect();
    let sigs_b: Vec<String> = second.population().iter().map(policy_signature).collect();
    assert_eq!(sigs_a, sigs_b, "whole populations match member by member");
}

#[test]
fn progress_callback_sees_every_generation() {
    let mut engine = create_test_engine(11).unwrap();
    let mut callback = TestProgressCallback::new();

    engine.run(&mut callback).unwrap();

    assert_eq!(callback.starts, 5);
    assert_eq!(callback.completes, 5);
    assert_eq!(callback.last_generation, 5);
}

#[test]
fn channel_callback_streams_the_message_sequence() {
    let (sender, receiver) = std::sync::mpsc::channel();
    let mut engine = create_test_engine(17).unwrap();
    let mut callback = ChannelProgressCallback::new(sender);

    engine.run(&mut callback).unwrap();
    drop(callback);

    let messages: Vec<ProgressMessage> = receiver.iter().collect();
    assert_eq!(messages.len(), 10, "five generations, two messages each");
    for (idx, pair) in messages.chunks(2).enumerate() {
        let generation = idx + 1;
        assert!(matches!(
            pair[0],
            ProgressMessage::GenerationStart(g) if g == generation
        ));
        match pair[1] {
            ProgressMessage::GenerationComplete {
                generation: g,
                best_fitness,
                mean_fitness,
            } => {
                assert_eq!(g, generation);
                assert!(best_fitness >= mean_fitness);
            }
            ProgressMessage::GenerationStart(_) => {
                panic!("generation {} sent no completion", generation)
            }
        }
    }
}

#[test]
fn niched_selection_ends_at_the_configured_generation() {
    // A one-member population fills exactly one of the three niches, so a
    // niched parent draw can land on an empty niche while a standard
    // tournament over the whole population cannot.
    let single_member_engine = |threshold: usize, seed: u64| {
        let env = RegionEnv::new(99);
        let default_actions = env.action_space().to_vec();
        let encoding = UnorderedBoundEncoding::new(env.obs_space().to_vec(), 0.1, 0.2).unwrap();
        let mut config = create_test_config(seed);
        config.evolution.pop_size = 1;
        config.evolution.num_niched_select_gens = threshold;
        EvolutionEngine::new(config, encoding, RolloutEvaluator::new(env), default_actions).unwrap()
    };

    // threshold 1: generation 1 already lies past the niched window
    for seed in 0..20 {
        let mut engine = single_member_engine(1, seed);
        engine.init().unwrap();
        for _ in 0..20 {
            engine.run_gen().unwrap();
        }
        assert_eq!(engine.generation(), 20);
    }

    // a high threshold keeps niched selection active and the empty niches reachable
    let mut engine = single_member_engine(50, 19);
    engine.init().unwrap();
    let mut surfaced = false;
    for _ in 0..40 {
        match engine.run_gen() {
            Ok(_) => continue,
            Err(RulevoError::EmptyNiche(_)) => {
                surfaced = true;
                break;
            }
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
    assert!(surfaced, "40 niched generations never drew an empty niche");
}

#[test]
fn evolved_scores_stay_inside_the_attainable_range() {
    let mut engine = create_test_engine(3).unwrap();

    engine.init().unwrap();
    let initial_best = engine.best_individual().unwrap().fitness().unwrap();

    for _ in 0..12 {
        engine.run_gen().unwrap();
    }
    let final_best = engine.best_individual().unwrap().fitness().unwrap();
    println!("best fitness went {:.4} -> {:.4}", initial_best, final_best);

    // one reward unit per step, discounted over the 10-step episode
    let ceiling: f64 = (0..10).map(|t| 0.95f64.powi(t)).sum();
    assert!(final_best > 0.0, "thirty policies and not one right answer");
    for indiv in engine.population() {
        let fitness = indiv.fitness().unwrap();
        assert!((0.0..=ceiling + 1e-9).contains(&fitness));
    }
}

#[test]
fn different_population_sizes_keep_their_shape() {
    for pop_size in [10, 25, 61] {
        let env = RegionEnv::new(99);
        let default_actions = env.action_space().to_vec();
        let encoding = UnorderedBoundEncoding::new(env.obs_space().to_vec(), 0.1, 0.2).unwrap();
        let evaluator = RolloutEvaluator::new(env);

        let mut config = create_test_config(42 + pop_size as u64);
        config.evolution.pop_size = pop_size;
        config.evolution.num_gens = 3;

        let mut engine =
            EvolutionEngine::new(config, encoding, evaluator, default_actions).unwrap();
        engine.run(&mut TestProgressCallback::new()).unwrap();

        assert_eq!(engine.population().len(), pop_size);
    }
}

/// Evaluator whose backend is down.
struct CrashingEvaluator;

impl FitnessEvaluator for CrashingEvaluator {
    fn evaluate(
        &self,
        _indiv: &Individual,
        _num_rollouts: usize,
        _discount: f64,
    ) -> RulevoResult<Assessment> {
        Err(RulevoError::Evaluation("simulator crashed".to_string()))
    }
}

#[test]
fn an_evaluator_failure_surfaces_from_init() {
    let encoding = UnorderedBoundEncoding::new(vec![ObsDim::new(0.0, 10.0)], 0.1, 0.2).unwrap();
    let default_actions = vec![Action(0), Action(1), Action(2)];
    let mut engine = EvolutionEngine::new(
        create_test_config(5),
        encoding,
        CrashingEvaluator,
        default_actions,
    )
    .unwrap();

    let result = engine.init();
    assert!(matches!(result, Err(RulevoError::Evaluation(_))));
}

#[test]
fn rejects_an_invalid_config_up_front() {
    let encoding = UnorderedBoundEncoding::new(vec![ObsDim::new(0.0, 10.0)], 0.1, 0.2).unwrap();
    let mut config = create_test_config(5);
    config.evolution.tourn_percent = 2.0;

    let result = EvolutionEngine::new(
        config,
        encoding,
        RolloutEvaluator::new(RegionEnv::new(99)),
        vec![Action(0), Action(1)],
    );
    assert!(matches!(result, Err(RulevoError::Configuration(_))));
}

#[test]
fn best_policy_round_trips_through_json() {
    let mut engine = create_test_engine(13).unwrap();
    engine.init().unwrap();
    engine.run_gen().unwrap();

    let best = engine.best_individual().unwrap();
    let json = serde_json::to_string_pretty(best).unwrap();
    let restored: Individual = serde_json::from_str(&json).unwrap();

    assert_eq!(policy_signature(&restored), policy_signature(best));
    assert_eq!(restored.fitness().unwrap(), best.fitness().unwrap());

    // the restored policy answers observations exactly like the original
    for obs in [0.5, 2.5, 5.0, 7.5, 9.9] {
        assert_eq!(restored.select_action(&[obs]), best.select_action(&[obs]));
    }
}
