//! Parametric sampling of a [`CurveDefinition`] into points.
//!
//! Sampling runs in two phases. The range bounds are evaluated once, in a
//! scope that holds only the named constants, so they cannot depend on `t`.
//! The coordinate expressions are then parsed once and evaluated for every
//! `t` yielded by [`FloatRange`].

mod frange;

pub use frange::{frange, FloatRange};

use std::fmt;

use crate::curve::{Axis, CurveDefinition};
use crate::error::{ConfigurationError, Result, SamplingError};
use crate::expression::{self, Evaluator, Expr, Scope};
use crate::math::Point3;

/// Name of the swept parameter.
pub const PARAMETER: &str = "t";

/// One of the three expressions of a [`SampleRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Start,
    End,
    Step,
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
            Self::Step => f.write_str("step"),
        }
    }
}

/// The `t` range of a curve, as expression text (e.g. `end = "2*pi"`).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRange {
    pub start: String,
    pub end: String,
    pub step: String,
}

impl SampleRange {
    /// Creates a sample range from its three expressions.
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>, step: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            step: step.into(),
        }
    }

    /// Returns the expression text for `bound`.
    #[must_use]
    pub fn expression(&self, bound: RangeBound) -> &str {
        match bound {
            RangeBound::Start => &self.start,
            RangeBound::End => &self.end,
            RangeBound::Step => &self.step,
        }
    }

    /// Evaluates the three bounds and builds the stepper over them.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::Bound`] if a bound fails to evaluate (a bound
    /// referencing `t` is unbound), or a [`ConfigurationError`] if the values
    /// cannot form a terminating range.
    pub fn resolve(&self) -> Result<FloatRange> {
        let scope = Scope::new();
        let eval = |bound: RangeBound| {
            let source = self.expression(bound);
            expression::evaluate(source, &scope).map_err(|source_err| SamplingError::Bound {
                bound,
                expression: source.to_owned(),
                source: source_err,
            })
        };
        let start = eval(RangeBound::Start)?;
        let end = eval(RangeBound::End)?;
        let step = eval(RangeBound::Step)?;
        Ok(FloatRange::new(start, end, step)?)
    }
}

impl Default for SampleRange {
    fn default() -> Self {
        use crate::curve::defaults;
        Self::new(defaults::T_START, defaults::T_END, defaults::T_STEP)
    }
}

/// Sampler settings.
#[derive(Debug, Clone, Copy)]
pub struct SamplerOptions {
    /// Maximum number of points a single curve may produce.
    pub max_samples: usize,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            max_samples: 100_000,
        }
    }
}

/// Samples `curve` into an ordered sequence of points, one per `t`.
///
/// The range is resolved and validated before any coordinate expression is
/// touched. Any failure aborts the whole operation; no partial point list is
/// ever returned.
///
/// # Errors
///
/// - [`ConfigurationError`] if the step is not positive, the range is
///   reversed or non-finite, or it would exceed `options.max_samples`.
/// - [`SamplingError`] naming the failing expression (and the sample index
///   for coordinate failures).
pub fn generate_samples(curve: &CurveDefinition, options: &SamplerOptions) -> Result<Vec<Point3>> {
    let range = curve.range.resolve()?;
    check_sample_limit(&range, options.max_samples)?;

    let [x, y, z] = Axis::ALL.map(|axis| parse_axis(curve, axis));
    let exprs = [x?, y?, z?];

    tracing::debug!(
        curve = %curve.name,
        max_samples = range.max_len(),
        "sampling curve"
    );

    let evaluator = Evaluator::new();
    let mut scope = Scope::new();
    let mut points = Vec::new();
    for (index, t) in range.enumerate() {
        scope.bind(PARAMETER, t);
        let mut coords = [0.0; 3];
        for ((axis, expr), coord) in Axis::ALL.iter().zip(&exprs).zip(&mut coords) {
            *coord = evaluator
                .evaluate(expr, &scope)
                .map_err(|source| SamplingError::Coordinate {
                    axis: *axis,
                    expression: curve.expression(*axis).to_owned(),
                    index,
                    t,
                    source,
                })?;
        }
        points.push(Point3::from(coords));
    }

    tracing::debug!(curve = %curve.name, samples = points.len(), "sampled curve");
    Ok(points)
}

fn parse_axis(curve: &CurveDefinition, axis: Axis) -> std::result::Result<Expr, SamplingError> {
    let source = curve.expression(axis);
    expression::parse(source).map_err(|source_err| SamplingError::Parse {
        axis,
        expression: source.to_owned(),
        source: source_err,
    })
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn check_sample_limit(range: &FloatRange, limit: usize) -> std::result::Result<(), ConfigurationError> {
    let count = range.max_len();
    if count > limit as f64 {
        let count = if count >= usize::MAX as f64 {
            usize::MAX
        } else {
            count as usize
        };
        return Err(ConfigurationError::TooManySamples { count, limit });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{EqcurveError, EvaluationError};
    use approx::assert_relative_eq;

    fn curve(x: &str, y: &str, z: &str, start: &str, end: &str, step: &str) -> CurveDefinition {
        CurveDefinition::new("test", x, y, z, SampleRange::new(start, end, step))
    }

    fn sample(curve: &CurveDefinition) -> Result<Vec<Point3>> {
        generate_samples(curve, &SamplerOptions::default())
    }

    #[test]
    fn binds_t_per_sample() {
        let points = sample(&curve("t", "t*2", "0", "0", "2", "1")).unwrap();
        assert_eq!(
            points,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 2.0, 0.0),
                Point3::new(2.0, 4.0, 0.0),
            ]
        );
    }

    #[test]
    fn default_curve_is_a_closed_turn_of_helix() {
        let points = sample(&CurveDefinition::default()).unwrap();
        assert_eq!(points.len(), 64);
        let last = points.last().unwrap();
        assert_relative_eq!(last.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(last.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(last.z, std::f64::consts::TAU);
    }

    #[test]
    fn range_bounds_accept_expressions() {
        let points = sample(&curve("t", "0", "0", "-pi/2", "pi/2", "pi/4")).unwrap();
        assert_eq!(points.len(), 5);
        assert_relative_eq!(points[0].x, -std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(points[4].x, std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn failing_axis_aborts_with_no_points() {
        let err = sample(&curve("t", "1/0", "0", "0", "1", "0.5")).unwrap_err();
        match err {
            EqcurveError::Sampling(SamplingError::Coordinate {
                axis,
                expression,
                index,
                source,
                ..
            }) => {
                assert_eq!(axis, Axis::Y);
                assert_eq!(expression, "1/0");
                assert_eq!(index, 0);
                assert_eq!(source, EvaluationError::NonFinite);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn failure_reports_the_sample_index() {
        // sqrt(1 - t) is defined up to t = 1, so the third sample fails.
        let err = sample(&curve("sqrt(1 - t)", "0", "0", "0", "2", "0.75")).unwrap_err();
        assert!(matches!(
            err,
            EqcurveError::Sampling(SamplingError::Coordinate {
                axis: Axis::X,
                index: 2,
                ..
            })
        ));
    }

    #[test]
    fn zero_and_negative_step_are_configuration_errors() {
        for step in ["0", "-1"] {
            // The coordinate expressions are invalid too; the step must be
            // rejected before they are looked at.
            let err = sample(&curve("(", "1/0", "nope", "0", "1", step)).unwrap_err();
            assert!(
                matches!(
                    err,
                    EqcurveError::Configuration(ConfigurationError::NonPositiveStep(_))
                ),
                "step {step}: {err:?}"
            );
        }
    }

    #[test]
    fn range_may_not_reference_t() {
        let err = sample(&curve("t", "0", "0", "0", "t + 1", "0.1")).unwrap_err();
        match err {
            EqcurveError::Sampling(SamplingError::Bound { bound, source, .. }) => {
                assert_eq!(bound, RangeBound::End);
                assert_eq!(source, EvaluationError::UnboundVariable("t".into()));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn parse_error_names_axis() {
        let err = sample(&curve("t", "t", "sin(t", "0", "1", "0.1")).unwrap_err();
        assert!(matches!(
            err,
            EqcurveError::Sampling(SamplingError::Parse { axis: Axis::Z, .. })
        ));
        assert!(err.to_string().contains("z(t)"));
    }

    #[test]
    fn deeply_nested_axis_is_a_parse_error() {
        let x = format!("{}t{}", "(".repeat(100_000), ")".repeat(100_000));
        let err = sample(&curve(&x, "0", "0", "0", "1", "0.5")).unwrap_err();
        match err {
            EqcurveError::Sampling(SamplingError::Parse { axis, source, .. }) => {
                assert_eq!(axis, Axis::X);
                assert_eq!(
                    source,
                    EvaluationError::TooDeep {
                        limit: expression::MAX_DEPTH
                    }
                );
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn sample_limit_is_enforced() {
        let options = SamplerOptions { max_samples: 10 };
        let err = generate_samples(&curve("t", "0", "0", "0", "1", "0.01"), &options).unwrap_err();
        assert!(matches!(
            err,
            EqcurveError::Configuration(ConfigurationError::TooManySamples { limit: 10, .. })
        ));
    }

    #[test]
    fn tiny_step_over_huge_range_does_not_allocate() {
        let err = sample(&curve("t", "0", "0", "0", "1e300", "1e-300")).unwrap_err();
        assert!(matches!(
            err,
            EqcurveError::Configuration(ConfigurationError::TooManySamples { .. })
        ));
    }

    #[test]
    fn constant_expressions_ignore_t() {
        let points = sample(&curve("1", "2", "3", "0", "1", "0.5")).unwrap();
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| *p == Point3::new(1.0, 2.0, 3.0)));
    }
}
