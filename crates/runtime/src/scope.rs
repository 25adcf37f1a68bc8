use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ScopeError {
    #[error("unbound variable -{0}-")]
    UnboundVariable(String),
}

/// Flat mapping from variable names to their current value.
///
/// A scope has no parent: a function call starts from a fresh scope holding
/// only its parameters, it never sees the bindings of its caller.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Scope {
    vars: HashMap<String, i32>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: &str) -> Result<i32, ScopeError> {
        self.vars
            .get(var)
            .copied()
            .ok_or_else(|| ScopeError::UnboundVariable(var.to_string()))
    }

    // Declares the variable on first assignment, overwrites it afterwards
    pub fn put(&mut self, var: impl Into<String>, value: i32) {
        self.vars.insert(var.into(), value);
    }

    pub fn contains(&self, var: &str) -> bool {
        self.vars.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    // Sorted by name so the output is stable
    pub fn bindings(&self) -> Vec<(&str, i32)> {
        let mut bindings: Vec<(&str, i32)> = self
            .vars
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        bindings.sort_unstable_by(|a, b| a.0.cmp(b.0));

        bindings
    }
}

impl<S: Into<String>> FromIterator<(S, i32)> for Scope {
    fn from_iter<T: IntoIterator<Item = (S, i32)>>(iter: T) -> Self {
        let mut scope = Scope::new();
        for (var, value) in iter {
            scope.put(var, value);
        }
        scope
    }
}
