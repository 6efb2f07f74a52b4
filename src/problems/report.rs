use crate::data::splitters::SplitSummary;
use crate::engines::generation::{EliteSummary, EvolutionEngine, HallOfFame, Population};
use crate::error::Result;
use crate::types::OptimizationDirection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one experiment, ready to print or archive as JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub problem: String,
    pub best_formula: String,
    pub best_fitness: f64,
    pub direction: OptimizationDirection,
    pub generations: usize,
    pub hall_of_fame: Vec<EliteSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitSummary>,
    pub completed_at: DateTime<Utc>,
}

impl RunReport {
    pub(crate) fn from_run(
        problem: &str,
        population: &Population,
        hall_of_fame: &HallOfFame,
    ) -> Result<Self> {
        let best = EvolutionEngine::best_program(population)?;
        let best_fitness = population
            .all_time_best
            .as_ref()
            .and_then(|ind| ind.fitness)
            .unwrap_or(f64::NAN);

        Ok(Self {
            problem: problem.to_string(),
            best_formula: best.to_string(),
            best_fitness,
            direction: hall_of_fame.direction(),
            generations: population.generation + 1,
            hall_of_fame: hall_of_fame.summaries(),
            test_accuracy: None,
            split: None,
            completed_at: Utc::now(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
