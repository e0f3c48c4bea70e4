use meval::Context;

use crate::error::EvaluationError;

use super::functions::{build_context, FailureSlot, Function};
use super::scope::Scope;

/// Deepest parenthesis nesting, and longest run of sign operators, an
/// expression may contain.
pub const MAX_DEPTH: usize = 256;

/// A parsed expression, ready to be evaluated many times.
#[derive(Debug, Clone)]
pub struct Expr {
    inner: meval::Expr,
}

impl Expr {
    /// Evaluates the expression once against `scope`.
    ///
    /// Prefer [`Evaluator::evaluate`] when evaluating repeatedly.
    ///
    /// # Errors
    ///
    /// See [`Evaluator::evaluate`].
    pub fn evaluate(&self, scope: &Scope) -> Result<f64, EvaluationError> {
        Evaluator::new().evaluate(self, scope)
    }
}

impl std::str::FromStr for Expr {
    type Err = EvaluationError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        parse(source)
    }
}

/// Parses `source` into an [`Expr`].
///
/// Before handing the text to the parser, it is checked for characters
/// outside the grammar, nesting deeper than [`MAX_DEPTH`], and calls to
/// functions outside the whitelist. `**` is accepted as `^`.
///
/// # Errors
///
/// Returns an error for empty input, disallowed characters, excessive
/// nesting, unknown functions and malformed syntax.
pub fn parse(source: &str) -> Result<Expr, EvaluationError> {
    let normalized = normalize(source)?;
    let inner = normalized
        .parse::<meval::Expr>()
        .map_err(|error| EvaluationError::Syntax(error.to_string()))?;
    Ok(Expr { inner })
}

/// Evaluates parsed expressions with the whitelisted functions.
pub struct Evaluator {
    functions: Context<'static>,
    failure: FailureSlot,
}

impl Evaluator {
    /// Creates an evaluator with the whitelisted function table.
    #[must_use]
    pub fn new() -> Self {
        let failure = FailureSlot::default();
        Self {
            functions: build_context(&failure),
            failure,
        }
    }

    /// Evaluates `expr` with the variables of `scope`.
    ///
    /// The result must be finite: overflow, `NaN` and division by zero all
    /// surface as errors rather than as non-finite coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error for unbound names, wrong argument counts, domain
    /// violations of the whitelisted functions and non-finite results.
    pub fn evaluate(&self, expr: &Expr, scope: &Scope) -> Result<f64, EvaluationError> {
        *self.failure.borrow_mut() = None;
        let result = expr.inner.eval_with_context((scope, &self.functions));
        if let Some(failure) = self.failure.borrow_mut().take() {
            return Err(failure);
        }
        let value = result.map_err(map_eval_error)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvaluationError::NonFinite)
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn map_eval_error(error: meval::Error) -> EvaluationError {
    match error {
        meval::Error::UnknownVariable(name) => EvaluationError::UnboundVariable(name),
        meval::Error::Function(name, _) => match Function::lookup(&name) {
            Some(function) => EvaluationError::ArityMismatch {
                name,
                expected: function.arity(),
            },
            None => EvaluationError::UnknownFunction(name),
        },
        other => EvaluationError::Syntax(other.to_string()),
    }
}

/// Screens `source` and rewrites `**` to `^`.
fn normalize(source: &str) -> Result<String, EvaluationError> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(EvaluationError::Empty);
    }

    let mut depth = 0usize;
    let mut sign_run = 0usize;
    let mut ident: Option<usize> = None;
    let mut pending_call: Option<&str> = None;

    for (pos, ch) in trimmed.char_indices() {
        let is_ident_char = ch.is_ascii_alphanumeric() || ch == '_';
        if let Some(start) = ident {
            if !is_ident_char {
                pending_call = Some(&trimmed[start..pos]);
                ident = None;
            }
        } else if ch.is_ascii_alphabetic() || ch == '_' {
            ident = Some(pos);
            pending_call = None;
        }

        if ch.is_ascii_whitespace() {
            continue;
        }
        match ch {
            '(' => {
                if let Some(name) = pending_call.take() {
                    if Function::lookup(name).is_none() {
                        return Err(EvaluationError::UnknownFunction(name.to_owned()));
                    }
                }
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(EvaluationError::TooDeep { limit: MAX_DEPTH });
                }
            }
            ')' => depth = depth.saturating_sub(1),
            '+' | '-' => {
                sign_run += 1;
                if sign_run > MAX_DEPTH {
                    return Err(EvaluationError::TooDeep { limit: MAX_DEPTH });
                }
            }
            '*' | '/' | '%' | '^' | ',' | '.' => {}
            c if c.is_ascii_alphanumeric() || c == '_' => {}
            _ => return Err(EvaluationError::UnexpectedChar { ch, pos }),
        }
        if ch != '(' && !is_ident_char {
            pending_call = None;
        }
        if ch != '+' && ch != '-' {
            sign_run = 0;
        }
    }

    Ok(trimmed.replace("**", "^"))
}
