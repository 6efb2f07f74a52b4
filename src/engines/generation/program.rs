use crate::engines::evaluation::{ExecutionContext, Executor};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Operators available to internal nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Function {
    Add,
    Subtract,
    Multiply,
    /// Returns 1.0 when the divisor is exactly zero
    Divide,
    Sine,
    Cosine,
    Exp,
}

impl Function {
    pub fn arity(&self) -> usize {
        match self {
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide => 2,
            Self::Sine | Self::Cosine | Self::Exp => 1,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Sine => "sin",
            Self::Cosine => "cos",
            Self::Exp => "exp",
        }
    }

    /// Apply to already-evaluated arguments. Callers guarantee `args.len() == self.arity()`.
    pub fn apply(&self, args: &[f64]) -> f64 {
        match self {
            Self::Add => args[0] + args[1],
            Self::Subtract => args[0] - args[1],
            Self::Multiply => args[0] * args[1],
            Self::Divide => {
                if args[1] == 0.0 {
                    1.0
                } else {
                    args[0] / args[1]
                }
            }
            Self::Sine => args[0].sin(),
            Self::Cosine => args[0].cos(),
            Self::Exp => args[0].exp(),
        }
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Reads a context slot; the name is only kept for printing
    Variable { slot: usize, name: Arc<str> },
    Constant(f64),
    Call { function: Function, args: Vec<Node> },
}

/// Generic traversal over a tree. Children are visited first, left to right,
/// and their outputs handed to `visit_call`.
pub trait NodeVisitor {
    type Output;

    fn visit_constant(&mut self, value: f64) -> Result<Self::Output>;
    fn visit_variable(&mut self, slot: usize, name: &str) -> Result<Self::Output>;
    fn visit_call(&mut self, function: Function, args: Vec<Self::Output>) -> Result<Self::Output>;
}

impl Node {
    pub fn variable(slot: usize, name: impl Into<Arc<str>>) -> Self {
        Node::Variable { slot, name: name.into() }
    }

    pub fn call(function: Function, args: Vec<Node>) -> Self {
        Node::Call { function, args }
    }

    pub fn accept<V: NodeVisitor>(&self, visitor: &mut V) -> Result<V::Output> {
        match self {
            Node::Constant(value) => visitor.visit_constant(*value),
            Node::Variable { slot, name } => visitor.visit_variable(*slot, name),
            Node::Call { function, args } => {
                let outputs = args
                    .iter()
                    .map(|arg| arg.accept(visitor))
                    .collect::<Result<Vec<_>>>()?;
                visitor.visit_call(*function, outputs)
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Node::Call { .. })
    }

    /// Number of nodes in this subtree
    pub fn size(&self) -> usize {
        match self {
            Node::Call { args, .. } => 1 + args.iter().map(Node::size).sum::<usize>(),
            _ => 1,
        }
    }

    /// Depth of this subtree; a lone terminal has depth 0
    pub fn depth(&self) -> usize {
        match self {
            Node::Call { args, .. } => 1 + args.iter().map(Node::depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    /// Node at a pre-order index
    pub fn get(&self, index: usize) -> Option<&Node> {
        let mut remaining = index;
        Self::find(self, &mut remaining)
    }

    /// Mutable node at a pre-order index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        let mut remaining = index;
        Self::find_mut(self, &mut remaining)
    }

    /// Pre-order indices of internal nodes
    pub fn call_indices(&self) -> Vec<usize> {
        let mut indices = Vec::new();
        let mut counter = 0;
        self.collect_calls(&mut counter, &mut indices);
        indices
    }

    fn collect_calls(&self, counter: &mut usize, out: &mut Vec<usize>) {
        let index = *counter;
        *counter += 1;
        if let Node::Call { args, .. } = self {
            out.push(index);
            for arg in args {
                arg.collect_calls(counter, out);
            }
        }
    }

    fn find<'a>(node: &'a Node, remaining: &mut usize) -> Option<&'a Node> {
        if *remaining == 0 {
            return Some(node);
        }
        *remaining -= 1;
        if let Node::Call { args, .. } = node {
            for arg in args {
                if let Some(found) = Self::find(arg, remaining) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn find_mut<'a>(node: &'a mut Node, remaining: &mut usize) -> Option<&'a mut Node> {
        if *remaining == 0 {
            return Some(node);
        }
        *remaining -= 1;
        if let Node::Call { args, .. } = node {
            for arg in args.iter_mut() {
                if let Some(found) = Self::find_mut(arg, remaining) {
                    return Some(found);
                }
            }
        }
        None
    }
}

/// Renders a tree in infix form, e.g. `((CT + 3.5) / BN)`
struct FormulaPrinter;

impl NodeVisitor for FormulaPrinter {
    type Output = String;

    fn visit_constant(&mut self, value: f64) -> Result<String> {
        Ok(format!("{}", value))
    }

    fn visit_variable(&mut self, _slot: usize, name: &str) -> Result<String> {
        Ok(name.to_string())
    }

    fn visit_call(&mut self, function: Function, args: Vec<String>) -> Result<String> {
        Ok(match args.as_slice() {
            [lhs, rhs] => format!("({} {} {})", lhs, function.symbol(), rhs),
            _ => format!("{}({})", function.symbol(), args.join(", ")),
        })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formula = self.accept(&mut FormulaPrinter).map_err(|_| fmt::Error)?;
        f.write_str(&formula)
    }
}

/// A candidate program: one expression tree producing a scalar
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub root: Node,
}

impl Program {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Evaluate against the current bindings. NaN is a legitimate result;
    /// an `Err` means the tree asked for something the context cannot give.
    pub fn execute(&self, context: &ExecutionContext) -> Result<f64> {
        self.root.accept(&mut Executor::new(context))
    }

    pub fn size(&self) -> usize {
        self.root.size()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Shortened formula for log lines
    pub fn to_formula_short(&self, max_len: usize) -> String {
        let formula = self.to_string();
        if formula.chars().count() <= max_len {
            formula
        } else {
            let truncated: String = formula.chars().take(max_len).collect();
            format!("{}...", truncated)
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        // (x + 2) * (x / 0)
        Node::call(
            Function::Multiply,
            vec![
                Node::call(Function::Add, vec![Node::variable(0, "X"), Node::Constant(2.0)]),
                Node::call(Function::Divide, vec![Node::variable(0, "X"), Node::Constant(0.0)]),
            ],
        )
    }

    #[test]
    fn test_protected_divide() {
        assert_eq!(Function::Divide.apply(&[5.0, 0.0]), 1.0);
        assert_eq!(Function::Divide.apply(&[5.0, 2.0]), 2.5);
        assert_eq!(Function::Divide.apply(&[0.0, -0.0]), 1.0);
    }

    #[test]
    fn test_size_and_depth() {
        let tree = sample();
        assert_eq!(tree.size(), 7);
        assert_eq!(tree.depth(), 2);
        assert_eq!(Node::Constant(1.0).depth(), 0);
    }

    #[test]
    fn test_preorder_indexing() {
        let tree = sample();
        assert!(matches!(tree.get(0), Some(Node::Call { function: Function::Multiply, .. })));
        assert!(matches!(tree.get(2), Some(Node::Variable { slot: 0, .. })));
        assert_eq!(tree.get(3), Some(&Node::Constant(2.0)));
        assert!(matches!(tree.get(4), Some(Node::Call { function: Function::Divide, .. })));
        assert_eq!(tree.get(7), None);
        assert_eq!(tree.call_indices(), vec![0, 1, 4]);
    }

    #[test]
    fn test_get_mut_replaces_subtree() {
        let mut tree = sample();
        *tree.get_mut(4).unwrap() = Node::Constant(10.0);
        assert_eq!(tree.to_string(), "((X + 2) * 10)");
    }

    #[test]
    fn test_display() {
        assert_eq!(sample().to_string(), "((X + 2) * (X / 0))");
        let unary = Node::call(Function::Sine, vec![Node::variable(0, "X")]);
        assert_eq!(unary.to_string(), "sin(X)");
    }

    #[test]
    fn test_formula_short() {
        let program = Program::new(sample());
        assert_eq!(program.to_formula_short(5), "((X +...");
        assert_eq!(program.to_formula_short(100), "((X + 2) * (X / 0))");
    }
}
