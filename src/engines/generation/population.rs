use super::program::Program;
use crate::types::OptimizationDirection;

/// A program and its score, if it has been evaluated since it last changed
#[derive(Debug, Clone)]
pub struct Individual {
    pub program: Program,
    pub fitness: Option<f64>,
}

impl Individual {
    pub fn new(program: Program) -> Self {
        Self {
            program,
            fitness: None,
        }
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Population {
    pub individuals: Vec<Individual>,
    pub generation: usize,
    pub all_time_best: Option<Individual>,
}

impl Population {
    pub fn new(programs: Vec<Program>) -> Self {
        Self {
            individuals: programs.into_iter().map(Individual::new).collect(),
            generation: 0,
            all_time_best: None,
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Best evaluated individual of the current generation
    pub fn fittest(&self, direction: OptimizationDirection) -> Option<&Individual> {
        self.individuals
            .iter()
            .filter_map(|ind| ind.fitness.map(|f| (ind, f)))
            .max_by(|(_, a), (_, b)| direction.compare(*a, *b))
            .map(|(ind, _)| ind)
    }

    /// Indices of evaluated individuals, best first
    pub fn ranked(&self, direction: OptimizationDirection) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.individuals.len())
            .filter(|&i| self.individuals[i].is_evaluated())
            .collect();
        indices.sort_by(|&a, &b| {
            let fa = self.individuals[a].fitness.unwrap_or(f64::NAN);
            let fb = self.individuals[b].fitness.unwrap_or(f64::NAN);
            direction.compare(fb, fa)
        });
        indices
    }

    /// Keep the all-time best current with this generation's scores
    pub fn update_all_time_best(&mut self, direction: OptimizationDirection) {
        let candidate = match self.fittest(direction) {
            Some(ind) => ind.clone(),
            None => return,
        };
        let replace = match &self.all_time_best {
            Some(best) => direction.is_better(
                candidate.fitness.unwrap_or(f64::NAN),
                best.fitness.unwrap_or(f64::NAN),
            ),
            None => true,
        };
        if replace {
            self.all_time_best = Some(candidate);
        }
    }
}
