use super::context::ExecutionContext;
use crate::engines::generation::program::{Function, NodeVisitor};
use crate::error::{Result, SymgpError};

/// Evaluates a tree against a context
pub struct Executor<'a> {
    context: &'a ExecutionContext,
}

impl<'a> Executor<'a> {
    pub fn new(context: &'a ExecutionContext) -> Self {
        Self { context }
    }
}

impl NodeVisitor for Executor<'_> {
    type Output = f64;

    fn visit_constant(&mut self, value: f64) -> Result<f64> {
        Ok(value)
    }

    fn visit_variable(&mut self, slot: usize, name: &str) -> Result<f64> {
        self.context.get(slot).ok_or_else(|| {
            SymgpError::Numeric(format!("variable '{}' (slot {}) is unbound", name, slot))
        })
    }

    fn visit_call(&mut self, function: Function, args: Vec<f64>) -> Result<f64> {
        if args.len() != function.arity() {
            return Err(SymgpError::Numeric(format!(
                "'{}' takes {} arguments, got {}",
                function.symbol(),
                function.arity(),
                args.len()
            )));
        }
        Ok(function.apply(&args))
    }
}
