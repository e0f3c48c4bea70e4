use thiserror::Error;

use crate::curve::Axis;
use crate::sampling::RangeBound;

/// Top-level error type for building an equation curve.
#[derive(Debug, Error)]
pub enum EqcurveError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Errors caused by settings that cannot produce a finite, ordered range.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("t step must be positive, got {0}")]
    NonPositiveStep(f64),

    #[error("t {bound} evaluated to a non-finite value ({value})")]
    NonFiniteBound { bound: RangeBound, value: f64 },

    #[error("t end ({end}) is before t start ({start})")]
    ReversedRange { start: f64, end: f64 },

    #[error("range would produce {count} samples, limit is {limit}")]
    TooManySamples { count: usize, limit: usize },

    #[error("unknown length unit `{0}`")]
    UnknownUnit(String),
}

/// Errors raised while parsing or evaluating a single expression.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvaluationError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character `{ch}` at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("`{name}` takes {expected} argument(s)")]
    ArityMismatch { name: String, expected: usize },

    #[error("unbound variable `{0}`")]
    UnboundVariable(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("`{function}` is undefined for {value}")]
    Domain { function: &'static str, value: f64 },

    #[error("result is not a finite number (division by zero or overflow)")]
    NonFinite,
}

/// Errors that abort sampling a curve. Each names the failing expression.
#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("failed to evaluate t {bound} `{expression}`: {source}")]
    Bound {
        bound: RangeBound,
        expression: String,
        #[source]
        source: EvaluationError,
    },

    #[error("failed to parse {axis} `{expression}`: {source}")]
    Parse {
        axis: Axis,
        expression: String,
        #[source]
        source: EvaluationError,
    },

    #[error("failed to evaluate {axis} `{expression}` at sample {index} (t = {t}): {source}")]
    Coordinate {
        axis: Axis,
        expression: String,
        index: usize,
        t: f64,
        #[source]
        source: EvaluationError,
    },
}

/// Errors reported by the host modelling application.
#[derive(Debug, Error, PartialEq)]
pub enum HostError {
    #[error("failed to create component: {0}")]
    ComponentCreation(String),

    #[error("failed to fit spline: {0}")]
    SplineFit(String),

    #[error("component not found")]
    ComponentNotFound,
}

/// Convenience type alias for results using [`EqcurveError`].
pub type Result<T> = std::result::Result<T, EqcurveError>;
