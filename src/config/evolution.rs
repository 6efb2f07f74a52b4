use super::traits::{ConfigSection, ConfigManifest, FieldManifest};
use crate::error::SymgpError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub min_init_depth: usize,
    pub max_init_depth: usize,
    pub max_crossover_depth: usize,
    pub crossover_rate: f64,    // otherwise reproduction
    pub mutation_rate: f64,
    pub function_prob: f64,     // crossover point: function node vs terminal
    pub new_individuals_rate: f64,
    pub tournament_size: usize,
    pub elitism_count: usize,
    pub hall_of_fame_size: usize,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            num_generations: 800,
            min_init_depth: 2,
            max_init_depth: 7,
            max_crossover_depth: 17,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            function_prob: 0.9,
            new_individuals_rate: 0.3,
            tournament_size: 7,
            elitism_count: 1,
            hall_of_fame_size: 3,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Smaller, shallower search used for one-dimensional regression
    pub fn regression_default() -> Self {
        Self {
            population_size: 800,
            num_generations: 500,
            max_init_depth: 5,
            max_crossover_depth: 10,
            ..Self::default()
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), SymgpError> {
        if self.population_size < 2 {
            return Err(SymgpError::Configuration(
                "Population size must be at least 2".to_string()
            ));
        }
        if self.min_init_depth > self.max_init_depth {
            return Err(SymgpError::Configuration(format!(
                "Minimum init depth {} exceeds maximum {}",
                self.min_init_depth, self.max_init_depth
            )));
        }
        if self.max_crossover_depth < self.max_init_depth {
            return Err(SymgpError::Configuration(
                "Max crossover depth must be at least the max init depth".to_string()
            ));
        }
        for (name, rate) in [
            ("Crossover rate", self.crossover_rate),
            ("Mutation rate", self.mutation_rate),
            ("Function probability", self.function_prob),
            ("New individuals rate", self.new_individuals_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(SymgpError::Configuration(format!(
                    "{} must be between 0 and 1",
                    name
                )));
            }
        }
        if self.tournament_size == 0 {
            return Err(SymgpError::Configuration(
                "Tournament size must be at least 1".to_string()
            ));
        }
        if self.elitism_count >= self.population_size {
            return Err(SymgpError::Configuration(
                "Elitism count must be smaller than the population".to_string()
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Evolution".to_string(),
            fields: vec![
                FieldManifest::new(
                    "population_size",
                    "integer",
                    serde_json::json!(self.population_size),
                    "Number of programs in the population",
                )
                .with_range(2.0, 100000.0),
                FieldManifest::new(
                    "num_generations",
                    "integer",
                    serde_json::json!(self.num_generations),
                    "Generations to evolve",
                ),
                FieldManifest::new(
                    "max_init_depth",
                    "integer",
                    serde_json::json!(self.max_init_depth),
                    "Maximum tree depth when the population is created",
                ),
                FieldManifest::new(
                    "max_crossover_depth",
                    "integer",
                    serde_json::json!(self.max_crossover_depth),
                    "Maximum tree depth of a crossover child",
                ),
                FieldManifest::new(
                    "crossover_rate",
                    "float",
                    serde_json::json!(self.crossover_rate),
                    "Chance an offspring comes from crossover rather than reproduction",
                )
                .with_range(0.0, 1.0),
                FieldManifest::new(
                    "mutation_rate",
                    "float",
                    serde_json::json!(self.mutation_rate),
                    "Chance an offspring receives a subtree mutation",
                )
                .with_range(0.0, 1.0),
                FieldManifest::new(
                    "new_individuals_rate",
                    "float",
                    serde_json::json!(self.new_individuals_rate),
                    "Fraction of each generation filled with fresh random programs",
                )
                .with_range(0.0, 1.0),
                FieldManifest::new(
                    "tournament_size",
                    "integer",
                    serde_json::json!(self.tournament_size),
                    "Candidates compared per selection",
                ),
                FieldManifest::new(
                    "seed",
                    "integer",
                    serde_json::json!(self.seed),
                    "RNG seed; random when absent",
                ),
            ],
        }
    }
}
