use crate::config::AppConfig;
use crate::encoding::Encoding;
use crate::engines::evaluation::{evaluate_population, FitnessEvaluator};
use crate::engines::generation::{
    init::init_pop,
    operators::{mutate, niched_crossover, niched_selection, standard_selection},
};
use crate::error::Result;
use crate::policy::{Individual, Population};
use crate::types::Action;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Drives the generational loop: select parents, recombine, mutate,
/// evaluate, replace. Holds the only RNG of a run, so a fixed seed makes
/// whole runs reproducible.
pub struct EvolutionEngine<E, F> {
    config: AppConfig,
    encoding: E,
    evaluator: F,
    default_actions: Vec<Action>,
    rng: StdRng,
    pop: Population,
    gen_num: usize,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, mean_fitness: f64);
}

impl<E, F> EvolutionEngine<E, F>
where
    E: Encoding,
    F: FitnessEvaluator + Sync,
{
    pub fn new(
        config: AppConfig,
        encoding: E,
        evaluator: F,
        default_actions: Vec<Action>,
    ) -> Result<Self> {
        config.validate()?;
        let rng = match config.evolution.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            encoding,
            evaluator,
            default_actions,
            rng,
            pop: Vec::new(),
            gen_num: 0,
        })
    }

    /// Build and evaluate the initial population.
    pub fn init(&mut self) -> Result<&[Individual]> {
        let mut pop = init_pop(
            &self.encoding,
            &self.default_actions,
            &self.config.evolution,
            &mut self.rng,
        )?;
        evaluate_population(&self.evaluator, &mut pop, &self.config.evaluation)?;
        log::debug!("initial population of {} evaluated", pop.len());
        self.pop = pop;
        Ok(&self.pop)
    }

    /// Advance one generation and replace the population with its offspring.
    ///
    /// Early generations select within default-action niches to keep every
    /// niche alive while rule lists are still mostly noise; after
    /// `num_niched_select_gens` the run switches to standard selection and
    /// lets the best niche take over.
    pub fn run_gen(&mut self) -> Result<&[Individual]> {
        assert!(!self.pop.is_empty(), "run_gen called before init");
        self.gen_num += 1;

        let use_niched = self.gen_num < self.config.evolution.num_niched_select_gens;
        let mut offspring = {
            let parents = if use_niched {
                log::info!("gen {}: niched selection", self.gen_num);
                niched_selection(
                    &self.pop,
                    &self.default_actions,
                    &self.config.evolution,
                    &mut self.rng,
                )?
            } else {
                log::info!("gen {}: standard selection", self.gen_num);
                standard_selection(&self.pop, &self.config.evolution, &mut self.rng)?
            };
            niched_crossover(
                &parents,
                &self.default_actions,
                &self.encoding,
                &self.config.evolution,
                &mut self.rng,
            )
        };

        for child in &mut offspring {
            mutate(
                child,
                &self.encoding,
                self.config.evolution.p_mut,
                &mut self.rng,
            );
        }

        evaluate_population(&self.evaluator, &mut offspring, &self.config.evaluation)?;
        self.pop = offspring;
        Ok(&self.pop)
    }

    /// Run the full loop: init if needed, then `num_gens` generations.
    pub fn run<C: ProgressCallback>(&mut self, callback: &mut C) -> Result<()> {
        if self.pop.is_empty() {
            self.init()?;
        }

        for _ in 0..self.config.evolution.num_gens {
            callback.on_generation_start(self.gen_num + 1);
            self.run_gen()?;
            let (best, mean) = self.fitness_summary()?;
            callback.on_generation_complete(self.gen_num, best, mean);
        }
        Ok(())
    }

    pub fn population(&self) -> &[Individual] {
        &self.pop
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.gen_num
    }

    /// Highest-fitness member of the current population.
    pub fn best_individual(&self) -> Result<&Individual> {
        assert!(!self.pop.is_empty(), "best_individual called before init");
        let mut best = &self.pop[0];
        for indiv in &self.pop[1..] {
            if indiv.fitness()? > best.fitness()? {
                best = indiv;
            }
        }
        Ok(best)
    }

    fn fitness_summary(&self) -> Result<(f64, f64)> {
        let mut best = f64::NEG_INFINITY;
        let mut total = 0.0;
        for indiv in &self.pop {
            let fitness = indiv.fitness()?;
            best = best.max(fitness);
            total += fitness;
        }
        Ok((best, total / self.pop.len() as f64))
    }
}
