use std::collections::HashMap;

use meval::ContextProvider;

/// Names that always resolve to a fixed value and cannot be rebound.
pub const CONSTANTS: &[(&str, f64)] = &[
    ("pi", std::f64::consts::PI),
    ("tau", std::f64::consts::TAU),
    ("e", std::f64::consts::E),
];

/// Variable bindings visible to an expression during evaluation.
///
/// A fresh scope holds only the named constants. Variables such as the swept
/// parameter `t` are added with [`Scope::bind`].
#[derive(Debug, Clone)]
pub struct Scope {
    variables: HashMap<String, f64>,
}

impl Scope {
    /// Creates a scope containing only the named constants.
    #[must_use]
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Binds `name` to `value`, replacing any previous binding.
    ///
    /// Returns `false` and leaves the scope unchanged if `name` is a constant.
    pub fn bind(&mut self, name: &str, value: f64) -> bool {
        if is_constant(name) {
            return false;
        }
        if let Some(slot) = self.variables.get_mut(name) {
            *slot = value;
        } else {
            self.variables.insert(name.to_owned(), value);
        }
        true
    }

    /// Looks up a name, constants first.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        CONSTANTS
            .iter()
            .find(|(constant, _)| *constant == name)
            .map(|(_, value)| *value)
            .or_else(|| self.variables.get(name).copied())
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextProvider for Scope {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.get(name)
    }
}

fn is_constant(name: &str) -> bool {
    CONSTANTS.iter().any(|(constant, _)| *constant == name)
}
