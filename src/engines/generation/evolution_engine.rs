use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::evaluation::FitnessFunction;
use crate::engines::generation::{
    hall_of_fame::HallOfFame,
    node_set::NodeSet,
    operators::{crossover, mutate, ramped_half_and_half, tournament_selection},
    population::{Individual, Population},
    program::Program,
};
use crate::error::{Result, SymgpError};
use crate::types::OptimizationDirection;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;

pub struct EvolutionEngine {
    config: EvolutionConfig,
    node_set: NodeSet,
    hall_of_fame: HallOfFame,
    rng: StdRng,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_population_evaluated(&mut self, generation: usize, rejected: usize, total: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, hall_of_fame_size: usize);
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig, node_set: NodeSet) -> Result<Self> {
        config.validate()?;
        node_set.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // Direction is fixed once the first oracle is seen
        let hall_of_fame = HallOfFame::new(config.hall_of_fame_size, OptimizationDirection::Maximize);

        Ok(Self {
            config,
            node_set,
            hall_of_fame,
            rng,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn node_set(&self) -> &NodeSet {
        &self.node_set
    }

    /// Fresh generation-zero population built with ramped half-and-half
    pub fn initialize_population(&mut self, population_size: usize) -> Population {
        let programs = ramped_half_and_half(
            &self.node_set,
            population_size,
            self.config.min_init_depth,
            self.config.max_init_depth,
            &mut self.rng,
        );
        Population::new(programs)
    }

    /// Run `generations` rounds (at least one) of evaluate, record, breed.
    ///
    /// The returned population is the last one evaluated, with its
    /// `all_time_best` tracking the best program seen over the whole run.
    /// An `Err` from the oracle aborts the run.
    pub fn evolve<F, C>(
        &mut self,
        population: Population,
        oracle: &F,
        generations: usize,
        callback: &mut C,
    ) -> Result<Population>
    where
        F: FitnessFunction + ?Sized,
        C: ProgressCallback,
    {
        if population.is_empty() {
            return Err(SymgpError::Generation("Cannot evolve an empty population".to_string()));
        }
        if oracle.num_variables() != self.node_set.variables().len() {
            return Err(SymgpError::Configuration(format!(
                "Oracle '{}' binds {} variables but node set '{}' declares {}",
                oracle.name(),
                oracle.num_variables(),
                self.node_set.name(),
                self.node_set.variables().len()
            )));
        }

        let direction = oracle.direction();
        if self.hall_of_fame.direction() != direction {
            self.hall_of_fame = HallOfFame::new(self.config.hall_of_fame_size, direction);
        }

        log::info!(
            "Evolving {} programs for {} generations against '{}'",
            population.len(),
            generations.max(1),
            oracle.name()
        );

        let mut population = population;
        let total = generations.max(1);

        for step in 0..total {
            let generation = population.generation;
            callback.on_generation_start(generation);

            self.evaluate_population(&mut population, oracle)?;

            let rejected = population
                .individuals
                .iter()
                .filter(|ind| ind.fitness.map_or(true, f64::is_nan))
                .count();
            callback.on_population_evaluated(generation, rejected, population.len());

            population.update_all_time_best(direction);
            for ind in &population.individuals {
                if let Some(fitness) = ind.fitness {
                    self.hall_of_fame.try_add(&ind.program, fitness, generation);
                }
            }

            let best_fitness = population
                .fittest(direction)
                .and_then(|ind| ind.fitness)
                .unwrap_or(f64::NAN);
            callback.on_generation_complete(generation, best_fitness, self.hall_of_fame.len());

            if step + 1 == total {
                break;
            }

            population.individuals = self.create_next_generation(&population, direction);
            population.generation += 1;
        }

        Ok(population)
    }

    /// Best program a finished run produced
    pub fn best_program(population: &Population) -> Result<Program> {
        population
            .all_time_best
            .as_ref()
            .map(|ind| ind.program.clone())
            .ok_or_else(|| {
                SymgpError::Generation("Population has no evaluated programs".to_string())
            })
    }

    pub fn get_hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }

    // Each candidate gets its own context so workers never share bindings
    fn evaluate_population<F>(&self, population: &mut Population, oracle: &F) -> Result<()>
    where
        F: FitnessFunction + ?Sized,
    {
        let node_set = &self.node_set;
        population
            .individuals
            .par_iter_mut()
            .filter(|ind| !ind.is_evaluated())
            .try_for_each(|ind| {
                let mut context = node_set.new_context();
                ind.fitness = Some(oracle.evaluate(&ind.program, &mut context)?);
                Ok(())
            })
    }

    fn create_next_generation(
        &mut self,
        population: &Population,
        direction: OptimizationDirection,
    ) -> Vec<Individual> {
        let size = population.len();
        let mut next_generation = Vec::with_capacity(size);

        // Elitism: survivors keep their score
        for &idx in population.ranked(direction).iter().take(self.config.elitism_count) {
            next_generation.push(population.individuals[idx].clone());
        }

        // Fresh blood
        let fresh = ((size as f64 * self.config.new_individuals_rate) as usize)
            .min(size.saturating_sub(next_generation.len()));
        let programs = ramped_half_and_half(
            &self.node_set,
            fresh,
            self.config.min_init_depth,
            self.config.max_init_depth,
            &mut self.rng,
        );
        next_generation.extend(programs.into_iter().map(Individual::new));

        let parents = &population.individuals;
        let tournament_size = self.config.tournament_size;
        let function_prob = self.config.function_prob;
        let max_depth = self.config.max_crossover_depth;

        while next_generation.len() < size {
            if self.rng.gen::<f64>() < self.config.crossover_rate {
                let parent1 = tournament_selection(parents, tournament_size, direction, &mut self.rng);
                let parent2 = tournament_selection(parents, tournament_size, direction, &mut self.rng);

                let (child1, child2) = crossover(
                    &parent1.program,
                    &parent2.program,
                    function_prob,
                    max_depth,
                    &mut self.rng,
                );

                for child in [child1, child2] {
                    if next_generation.len() >= size {
                        break;
                    }
                    let mut individual = Individual::new(child);
                    self.maybe_mutate(&mut individual);
                    next_generation.push(individual);
                }
            } else {
                // Reproduction (copy); an untouched copy keeps its score
                let mut child =
                    tournament_selection(parents, tournament_size, direction, &mut self.rng).clone();
                self.maybe_mutate(&mut child);
                next_generation.push(child);
            }
        }

        next_generation.truncate(size);
        next_generation
    }

    fn maybe_mutate(&mut self, individual: &mut Individual) {
        if self.rng.gen::<f64>() < self.config.mutation_rate {
            mutate(
                &mut individual.program,
                &self.node_set,
                self.config.function_prob,
                self.config.max_crossover_depth,
                &mut self.rng,
            );
            individual.fitness = None;
        }
    }
}
