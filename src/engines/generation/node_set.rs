use super::program::{Function, Node};
use crate::engines::evaluation::ExecutionContext;
use crate::error::{Result, SymgpError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An ephemeral constant: sampled once from `[min, max)` when a tree is
/// built, then fixed for the lifetime of that node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantTerminal {
    pub min: f64,
    pub max: f64,
}

impl ConstantTerminal {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..self.max)
    }
}

/// Declares the building blocks available to the search for one problem
///
/// Purely declarative: it knows how to hand out random terminals and
/// functions and how to allocate a matching [`ExecutionContext`], nothing more.
#[derive(Debug, Clone)]
pub struct NodeSet {
    name: String,
    variables: Arc<[String]>,
    constants: Vec<ConstantTerminal>,
    functions: Vec<Function>,
}

impl NodeSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Arc::from(Vec::<String>::new()),
            constants: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn with_variables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_constant(mut self, constant: ConstantTerminal) -> Self {
        self.constants.push(constant);
        self
    }

    pub fn with_functions(mut self, functions: &[Function]) -> Self {
        self.functions.extend_from_slice(functions);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn constants(&self) -> &[ConstantTerminal] {
        &self.constants
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn num_terminals(&self) -> usize {
        self.variables.len() + self.constants.len()
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_terminals() == 0 {
            return Err(SymgpError::Configuration(format!(
                "node set '{}' declares no terminals",
                self.name
            )));
        }
        if self.functions.is_empty() {
            return Err(SymgpError::Configuration(format!(
                "node set '{}' declares no functions",
                self.name
            )));
        }
        if let Some(bad) = self
            .constants
            .iter()
            .find(|c| !(c.min.is_finite() && c.max.is_finite() && c.min < c.max))
        {
            return Err(SymgpError::Configuration(format!(
                "node set '{}' has an invalid constant range [{}, {})",
                self.name, bad.min, bad.max
            )));
        }
        Ok(())
    }

    /// A fresh, unbound context with one slot per declared variable
    pub fn new_context(&self) -> ExecutionContext {
        ExecutionContext::from_shared(self.variables.clone())
    }

    /// Pick a terminal uniformly among variables and constant terminals
    pub fn random_terminal<R: Rng>(&self, rng: &mut R) -> Node {
        let choice = rng.gen_range(0..self.num_terminals());
        if choice < self.variables.len() {
            Node::variable(choice, self.variables[choice].as_str())
        } else {
            Node::Constant(self.constants[choice - self.variables.len()].sample(rng))
        }
    }

    pub fn random_function<R: Rng>(&self, rng: &mut R) -> Function {
        self.functions[rng.gen_range(0..self.functions.len())]
    }

    /// Every branch reaches exactly `depth`
    pub fn full<R: Rng>(&self, depth: usize, rng: &mut R) -> Node {
        if depth == 0 {
            return self.random_terminal(rng);
        }
        let function = self.random_function(rng);
        let args = (0..function.arity()).map(|_| self.full(depth - 1, rng)).collect();
        Node::call(function, args)
    }

    /// Branches stop at random, never deeper than `max_depth`
    pub fn grow<R: Rng>(&self, max_depth: usize, rng: &mut R) -> Node {
        let pick_terminal = max_depth == 0
            || rng.gen_range(0..self.num_terminals() + self.functions.len()) < self.num_terminals();
        if pick_terminal {
            return self.random_terminal(rng);
        }
        let function = self.random_function(rng);
        let args = (0..function.arity()).map(|_| self.grow(max_depth - 1, rng)).collect();
        Node::call(function, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn node_set() -> NodeSet {
        NodeSet::new("test")
            .with_variables(["X"])
            .with_constant(ConstantTerminal::new(0.0, 100.0))
            .with_functions(&[Function::Add, Function::Subtract, Function::Multiply, Function::Divide])
    }

    fn constants_in(node: &Node, out: &mut Vec<f64>) {
        match node {
            Node::Constant(v) => out.push(*v),
            Node::Call { args, .. } => args.iter().for_each(|a| constants_in(a, out)),
            Node::Variable { .. } => {}
        }
    }

    #[test]
    fn test_validate() {
        assert!(node_set().validate().is_ok());
        assert!(NodeSet::new("empty").validate().is_err());
        let no_functions = NodeSet::new("t").with_variables(["X"]);
        assert!(no_functions.validate().is_err());
        let bad_range = node_set().with_constant(ConstantTerminal::new(5.0, 5.0));
        assert!(bad_range.validate().is_err());
    }

    #[test]
    fn test_full_reaches_depth() {
        let mut rng = StdRng::seed_from_u64(3);
        for depth in 0..5 {
            assert_eq!(node_set().full(depth, &mut rng).depth(), depth);
        }
    }

    #[test]
    fn test_grow_respects_max_depth() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            assert!(node_set().grow(4, &mut rng).depth() <= 4);
        }
    }

    #[test]
    fn test_constants_sampled_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut values = Vec::new();
        for _ in 0..50 {
            constants_in(&node_set().full(3, &mut rng), &mut values);
        }
        assert!(!values.is_empty());
        assert!(values.iter().all(|v| (0.0..100.0).contains(v)));
    }

    #[test]
    fn test_context_matches_variables() {
        let set = NodeSet::new("c").with_variables(["CT", "USz", "M"]);
        let ctx = set.new_context();
        assert_eq!(ctx.len(), 3);
        assert_eq!(ctx.slot_of("M"), Some(2));
    }
}
