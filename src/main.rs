use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rulevo::config::AppConfig;
use rulevo::encoding::UnorderedBoundEncoding;
use rulevo::engines::evaluation::{Environment, RolloutEvaluator, Step};
use rulevo::engines::generation::{ConsoleProgressCallback, EvolutionEngine};
use rulevo::types::{Action, Obs, ObsDim};

const CORRIDOR_LEN: f64 = 10.0;
const START_SPAN: f64 = 5.0;
const TIME_LIMIT: usize = 40;

/// One-dimensional corridor task. The agent starts somewhere in the left
/// half and must reach the right end. Observation: its position. Actions:
/// 0 steps left, 1 stays, 2 steps right. Reaching the end pays 1 and ends
/// the episode, so discounting favors short paths.
#[derive(Clone)]
struct CorridorEnv {
    obs_space: Vec<ObsDim>,
    actions: Vec<Action>,
    rng: StdRng,
    position: f64,
}

impl CorridorEnv {
    fn new(seed: u64) -> Self {
        Self {
            obs_space: vec![ObsDim::new(0.0, CORRIDOR_LEN)],
            actions: vec![Action(0), Action(1), Action(2)],
            rng: StdRng::seed_from_u64(seed),
            position: 0.0,
        }
    }
}

impl Environment for CorridorEnv {
    fn obs_space(&self) -> &[ObsDim] {
        &self.obs_space
    }

    fn action_space(&self) -> &[Action] {
        &self.actions
    }

    fn time_limit(&self) -> usize {
        TIME_LIMIT
    }

    fn reset(&mut self) -> Obs {
        self.position = self.rng.gen_range(0.0..START_SPAN);
        vec![self.position]
    }

    fn step(&mut self, action: Action) -> Step {
        match action {
            Action(0) => self.position = (self.position - 1.0).max(0.0),
            Action(1) => {}
            Action(2) => self.position = (self.position + 1.0).min(CORRIDOR_LEN),
            other => panic!("corridor has no action {}", other),
        }
        let terminal = self.position >= CORRIDOR_LEN;
        Step {
            obs: vec![self.position],
            reward: if terminal { 1.0 } else { 0.0 },
            terminal,
        }
    }
}

fn demo_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.evolution.pop_size = 60;
    config.evolution.indiv_size = 4;
    config.evolution.num_gens = 30;
    config.evolution.num_niched_select_gens = 10;
    config.evolution.seed = Some(42);
    config.evaluation.num_rollouts = 10;
    config
}

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => demo_config(),
    };

    let env = CorridorEnv::new(17);
    let default_actions = env.action_space().to_vec();
    let encoding = UnorderedBoundEncoding::new(env.obs_space().to_vec(), 0.1, 0.2)?;
    let evaluator = RolloutEvaluator::new(env);

    let mut engine = EvolutionEngine::new(config, encoding, evaluator, default_actions)?;
    engine.run(&mut ConsoleProgressCallback)?;

    let best = engine.best_individual()?;
    println!(
        "\nBest policy after {} generations (fitness {:.4}, {} env steps):",
        engine.generation(),
        best.fitness()?,
        best.time_steps_used()?
    );
    for rule in best.rules() {
        println!("  {}", rule);
    }
    println!("  default -> {}", best.default_action());

    std::fs::write("best_policy.json", serde_json::to_string_pretty(best)?)?;
    log::info!("wrote best policy to best_policy.json");

    Ok(())
}
