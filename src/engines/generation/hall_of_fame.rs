use crate::engines::generation::program::Program;
use crate::types::OptimizationDirection;
use serde::{Deserialize, Serialize};

use std::collections::HashSet;

#[derive(Clone, Debug)]
pub struct EliteProgram {
    pub program: Program,
    pub fitness: f64,
    pub generation: usize,
    pub canonical_string: String, // For deduplication
}

/// Serializable view of an elite for reports
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EliteSummary {
    pub formula: String,
    pub fitness: f64,
    pub generation: usize,
    pub size: usize,
}

impl From<&EliteProgram> for EliteSummary {
    fn from(elite: &EliteProgram) -> Self {
        Self {
            formula: elite.canonical_string.clone(),
            fitness: elite.fitness,
            generation: elite.generation,
            size: elite.program.size(),
        }
    }
}

/// Best distinct programs seen over a whole run
pub struct HallOfFame {
    programs: Vec<EliteProgram>,
    max_size: usize,
    seen_signatures: HashSet<String>,
    direction: OptimizationDirection,
}

impl HallOfFame {
    pub fn new(max_size: usize, direction: OptimizationDirection) -> Self {
        Self {
            programs: Vec::new(),
            max_size,
            seen_signatures: HashSet::new(),
            direction,
        }
    }

    /// Attempt to add a program; NaN scores and duplicates are rejected
    pub fn try_add(&mut self, program: &Program, fitness: f64, generation: usize) -> bool {
        if fitness.is_nan() || self.max_size == 0 {
            return false;
        }

        // Full and not better than the worst entry: nothing to do
        if self.programs.len() >= self.max_size {
            if let Some(worst) = self.programs.last() {
                if !self.direction.is_better(fitness, worst.fitness) {
                    return false;
                }
            }
        }

        let canonical_string = get_canonical_string(program);
        if self.seen_signatures.contains(&canonical_string) {
            return false;
        }

        self.seen_signatures.insert(canonical_string.clone());
        self.programs.push(EliteProgram {
            program: program.clone(),
            fitness,
            generation,
            canonical_string,
        });

        let direction = self.direction;
        self.programs.sort_by(|a, b| direction.compare(b.fitness, a.fitness));

        while self.programs.len() > self.max_size {
            if let Some(removed) = self.programs.pop() {
                self.seen_signatures.remove(&removed.canonical_string);
            }
        }

        true
    }

    /// Get all elite programs, best first
    pub fn get_all(&self) -> &[EliteProgram] {
        &self.programs
    }

    /// Get top N programs
    pub fn get_top_n(&self, n: usize) -> &[EliteProgram] {
        &self.programs[..n.min(self.programs.len())]
    }

    pub fn summaries(&self) -> Vec<EliteSummary> {
        self.programs.iter().map(EliteSummary::from).collect()
    }

    pub fn direction(&self) -> OptimizationDirection {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

/// Generate canonical string for deduplication
pub fn get_canonical_string(program: &Program) -> String {
    program.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::program::Node;

    fn constant(v: f64) -> Program {
        Program::new(Node::Constant(v))
    }

    #[test]
    fn test_keeps_best_distinct_maximize() {
        let mut hof = HallOfFame::new(2, OptimizationDirection::Maximize);
        assert!(hof.try_add(&constant(1.0), 10.0, 0));
        assert!(!hof.try_add(&constant(1.0), 99.0, 1)); // duplicate
        assert!(hof.try_add(&constant(2.0), 30.0, 1));
        assert!(hof.try_add(&constant(3.0), 20.0, 2));
        assert!(!hof.try_add(&constant(4.0), 5.0, 2));

        let fitness: Vec<f64> = hof.get_all().iter().map(|e| e.fitness).collect();
        assert_eq!(fitness, vec![30.0, 20.0]);
    }

    #[test]
    fn test_minimize_and_nan() {
        let mut hof = HallOfFame::new(3, OptimizationDirection::Minimize);
        assert!(!hof.try_add(&constant(0.0), f64::NAN, 0));
        hof.try_add(&constant(1.0), 4.0, 0);
        hof.try_add(&constant(2.0), 0.0, 0);
        assert_eq!(hof.get_top_n(1)[0].fitness, 0.0);
        assert_eq!(hof.get_top_n(10).len(), 2);
    }

    #[test]
    fn test_evicted_program_can_return() {
        let mut hof = HallOfFame::new(1, OptimizationDirection::Maximize);
        hof.try_add(&constant(1.0), 1.0, 0);
        hof.try_add(&constant(2.0), 2.0, 0);
        assert!(!hof.try_add(&constant(1.0), 0.5, 1));
        assert!(hof.try_add(&constant(1.0), 3.0, 1));
        assert_eq!(hof.summaries()[0].formula, "1");
    }
}
