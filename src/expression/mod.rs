//! Sandboxed arithmetic expressions.
//!
//! Expressions are plain text in a small grammar: numeric literals, the
//! operators `+ - * / % ^` (`**` is accepted for `^`), parentheses, named
//! constants (`pi`, `tau`, `e`), variables bound through a [`Scope`], and a
//! fixed set of [`Function`]s. Parsing and evaluation go through `meval`
//! with a context that holds nothing but that whitelist.

mod evaluator;
mod functions;
mod scope;

pub use evaluator::{parse, Evaluator, Expr, MAX_DEPTH};
pub use functions::{Function, FUNCTION_NAMES};
pub use scope::{Scope, CONSTANTS};

use crate::error::EvaluationError;

/// Parses and evaluates `source` in one step.
///
/// # Errors
///
/// Returns an error if `source` fails to parse or to evaluate in `scope`.
pub fn evaluate(source: &str, scope: &Scope) -> Result<f64, EvaluationError> {
    parse(source)?.evaluate(scope)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn evaluate_with_bound_variable() {
        let mut scope = Scope::new();
        scope.bind("t", 0.5);
        assert_relative_eq!(evaluate("t**2 + 2*t", &scope).unwrap(), 1.25);
    }

    #[test]
    fn from_str_parses() {
        let expr: Expr = "cos(t)".parse().unwrap();
        let mut scope = Scope::new();
        scope.bind("t", 0.0);
        assert_relative_eq!(expr.evaluate(&scope).unwrap(), 1.0);
    }

    #[test]
    fn reports_parse_errors_before_evaluation() {
        let err = evaluate("1 +", &Scope::new()).unwrap_err();
        assert!(matches!(err, EvaluationError::Syntax(_)));
    }

    #[test]
    fn constants_cannot_be_rebound_through_scope() {
        let mut scope = Scope::new();
        assert!(!scope.bind("pi", 3.0));
        assert_relative_eq!(evaluate("pi", &scope).unwrap(), std::f64::consts::PI);
    }
}
