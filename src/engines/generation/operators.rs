use super::node_set::NodeSet;
use super::population::Individual;
use super::program::{Node, Program};
use crate::types::OptimizationDirection;
use rand::Rng;

/// Maximum depth of a subtree grown by mutation
pub const MUTATION_DEPTH: usize = 3;

/// Tournament selection: pick best of K random candidates
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [Individual],
    tournament_size: usize,
    direction: OptimizationDirection,
    rng: &mut R,
) -> &'a Individual {
    let fitness = |ind: &Individual| ind.fitness.unwrap_or(f64::NAN);

    let mut best = &population[rng.gen_range(0..population.len())];
    for _ in 1..tournament_size {
        let candidate = &population[rng.gen_range(0..population.len())];
        if direction.is_better(fitness(candidate), fitness(best)) {
            best = candidate;
        }
    }
    best
}

/// Choose a crossover or mutation point; internal nodes are preferred with
/// probability `function_prob` when the tree has any
fn pick_point<R: Rng>(tree: &Node, function_prob: f64, rng: &mut R) -> usize {
    let calls = tree.call_indices();
    if !calls.is_empty() && rng.gen::<f64>() < function_prob {
        return calls[rng.gen_range(0..calls.len())];
    }

    let terminals: Vec<usize> = (0..tree.size())
        .filter(|i| tree.get(*i).map(Node::is_terminal).unwrap_or(false))
        .collect();
    terminals[rng.gen_range(0..terminals.len())]
}

/// Subtree crossover. A child that would exceed `max_depth` is replaced by a
/// copy of the parent it was built from.
pub fn crossover<R: Rng>(
    parent1: &Program,
    parent2: &Program,
    function_prob: f64,
    max_depth: usize,
    rng: &mut R,
) -> (Program, Program) {
    let point1 = pick_point(&parent1.root, function_prob, rng);
    let point2 = pick_point(&parent2.root, function_prob, rng);

    let (subtree1, subtree2) = match (parent1.root.get(point1), parent2.root.get(point2)) {
        (Some(a), Some(b)) => (a.clone(), b.clone()),
        _ => return (parent1.clone(), parent2.clone()),
    };

    let child1 = graft(parent1, point1, subtree2, max_depth);
    let child2 = graft(parent2, point2, subtree1, max_depth);
    (child1, child2)
}

fn graft(parent: &Program, point: usize, subtree: Node, max_depth: usize) -> Program {
    let mut child = parent.clone();
    if let Some(slot) = child.root.get_mut(point) {
        *slot = subtree;
    }
    if child.depth() > max_depth {
        return parent.clone();
    }
    child
}

/// Replace a random subtree with a freshly grown one
pub fn mutate<R: Rng>(
    program: &mut Program,
    node_set: &NodeSet,
    function_prob: f64,
    max_depth: usize,
    rng: &mut R,
) {
    let point = pick_point(&program.root, function_prob, rng);
    let original = program.clone();

    if let Some(slot) = program.root.get_mut(point) {
        *slot = node_set.grow(MUTATION_DEPTH, rng);
    }
    if program.depth() > max_depth {
        *program = original;
    }
}

/// Ramped half-and-half: depths cycle through `min_depth..=max_depth`,
/// alternating between full and grow trees
pub fn ramped_half_and_half<R: Rng>(
    node_set: &NodeSet,
    count: usize,
    min_depth: usize,
    max_depth: usize,
    rng: &mut R,
) -> Vec<Program> {
    let span = max_depth - min_depth + 1;
    (0..count)
        .map(|i| {
            let depth = min_depth + (i / 2) % span;
            let root = if i % 2 == 0 {
                node_set.full(depth, rng)
            } else {
                node_set.grow(depth, rng)
            };
            Program::new(root)
        })
        .collect()
}
