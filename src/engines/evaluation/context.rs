use crate::error::{Result, SymgpError};
use std::sync::Arc;

/// Variable bindings for one evaluation pass
///
/// Slots are addressed by index at execution time; names exist for binding
/// by name and for diagnostics. A context is rebound in place for every
/// record, so each concurrent evaluation needs its own instance.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    names: Arc<[String]>,
    values: Vec<Option<f64>>,
}

impl ExecutionContext {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Arc<[String]> = names.into_iter().map(Into::into).collect();
        Self::from_shared(names)
    }

    /// Build a context over an already-shared name table, without copying it
    pub fn from_shared(names: Arc<[String]>) -> Self {
        let values = vec![None; names.len()];
        Self { names, values }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn get(&self, slot: usize) -> Option<f64> {
        self.values.get(slot).copied().flatten()
    }

    pub fn set(&mut self, slot: usize, value: f64) -> Result<()> {
        match self.values.get_mut(slot) {
            Some(entry) => {
                *entry = Some(value);
                Ok(())
            }
            None => Err(SymgpError::Numeric(format!(
                "slot {} out of range for a {}-slot context",
                slot,
                self.len()
            ))),
        }
    }

    pub fn bind(&mut self, name: &str, value: f64) -> Result<()> {
        let slot = self
            .slot_of(name)
            .ok_or_else(|| SymgpError::Numeric(format!("unknown variable '{}'", name)))?;
        self.set(slot, value)
    }

    /// Bind every slot in order
    pub fn bind_all(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.len() {
            return Err(SymgpError::Numeric(format!(
                "expected {} values, got {}",
                self.len(),
                values.len()
            )));
        }
        for (entry, &value) in self.values.iter_mut().zip(values) {
            *entry = Some(value);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(|v| *v = None);
    }
}
