use std::iter::FusedIterator;

use crate::error::ConfigurationError;

use super::RangeBound;

/// Closed-range float stepper.
///
/// Yields `start` first, then `start + k * step` for `k = 1, 2, ...` while
/// `start + k * step + step / 2 < end`, and finally `end` itself. Each value
/// is computed from `start` rather than accumulated, and the half-step guard
/// keeps binary rounding of `step` from adding or dropping a sample near
/// `end`.
///
/// A stepped value is always more than `step / 2` below `end`, so the forced
/// final `end` never repeats the last stepped value. When `start == end` the
/// range yields that single value.
#[derive(Debug, Clone)]
pub struct FloatRange {
    start: f64,
    end: f64,
    step: f64,
    index: f64,
    phase: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Stepping,
    Done,
}

impl FloatRange {
    /// Creates a stepper over `[start, end]`.
    ///
    /// A zero-width range (`start == end`) yields its value exactly once;
    /// the closing `end` is never repeated after `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if any argument is non-finite, `step` is not
    /// positive, or `end < start`. Any of these would keep the stepper from
    /// terminating or from ever reaching `end`.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, ConfigurationError> {
        for (bound, value) in [
            (RangeBound::Start, start),
            (RangeBound::End, end),
            (RangeBound::Step, step),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFiniteBound { bound, value });
            }
        }
        if step <= 0.0 {
            return Err(ConfigurationError::NonPositiveStep(step));
        }
        if end < start {
            return Err(ConfigurationError::ReversedRange { start, end });
        }
        Ok(Self {
            start,
            end,
            step,
            index: 0.0,
            phase: Phase::Start,
        })
    }

    /// Upper bound on the number of values the range yields.
    #[must_use]
    pub fn max_len(&self) -> f64 {
        ((self.end - self.start) / self.step).ceil() + 1.0
    }
}

impl Iterator for FloatRange {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match self.phase {
            Phase::Start => {
                self.phase = if self.end > self.start {
                    Phase::Stepping
                } else {
                    Phase::Done
                };
                Some(self.start)
            }
            Phase::Stepping => {
                self.index += 1.0;
                let value = self.start + self.index * self.step;
                if value + self.step / 2.0 < self.end {
                    Some(value)
                } else {
                    self.phase = Phase::Done;
                    Some(self.end)
                }
            }
            Phase::Done => None,
        }
    }
}

impl FusedIterator for FloatRange {}

/// Shorthand for [`FloatRange::new`].
///
/// # Errors
///
/// See [`FloatRange::new`].
pub fn frange(start: f64, end: f64, step: f64) -> Result<FloatRange, ConfigurationError> {
    FloatRange::new(start, end, step)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::cast_precision_loss)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn collect(start: f64, end: f64, step: f64) -> Vec<f64> {
        frange(start, end, step).unwrap().collect()
    }

    #[test]
    fn tenths_yield_eleven_values() {
        let values = collect(0.0, 1.0, 0.1);
        assert_eq!(values.len(), 11);
        for (k, value) in values.iter().enumerate().take(10) {
            assert_relative_eq!(*value, k as f64 * 0.1, epsilon = 1e-12);
        }
        assert_eq!(values[10], 1.0);
    }

    #[test]
    fn first_and_last_are_exact() {
        for (start, end, step) in [
            (0.0, 1.0, 0.3),
            (-2.5, 7.0, 0.7),
            (0.1, 0.2, 0.01),
            (0.0, std::f64::consts::TAU, 0.1),
        ] {
            let values = collect(start, end, step);
            assert_eq!(values[0], start);
            assert_eq!(*values.last().unwrap(), end);
        }
    }

    #[test]
    fn values_increase_and_stay_below_end() {
        let (start, end, step) = (-1.0, 3.3, 0.25);
        let values = collect(start, end, step);
        for pair in values.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for value in &values[..values.len() - 1] {
            assert!(*value + step / 2.0 < end + step);
            assert!(*value < end);
        }
    }

    #[test]
    fn exact_multiple_does_not_repeat_end() {
        assert_eq!(collect(0.0, 2.0, 1.0), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn non_multiple_closes_on_end() {
        let values = collect(0.0, 1.0, 0.3);
        assert_eq!(values.len(), 4);
        assert_relative_eq!(values[2], 0.6, epsilon = 1e-12);
        assert_eq!(values[3], 1.0);
    }

    #[test]
    fn tail_is_at_least_half_a_step_from_previous() {
        let step = 0.3;
        let values = collect(0.0, 0.95, step);
        let n = values.len();
        assert!(values[n - 1] - values[n - 2] > step / 2.0);
    }

    #[test]
    fn step_larger_than_range() {
        assert_eq!(collect(0.0, 1.0, 5.0), vec![0.0, 1.0]);
    }

    #[test]
    fn span_shorter_than_half_a_step_yields_both_ends() {
        assert_eq!(collect(0.0, 0.1, 1.0), vec![0.0, 0.1]);
    }

    #[test]
    fn empty_span_yields_single_value() {
        assert_eq!(collect(3.0, 3.0, 0.5), vec![3.0]);
    }

    #[test]
    fn zero_step_is_rejected() {
        assert_eq!(
            frange(0.0, 1.0, 0.0).unwrap_err(),
            ConfigurationError::NonPositiveStep(0.0)
        );
    }

    #[test]
    fn negative_step_is_rejected() {
        assert_eq!(
            frange(0.0, 1.0, -1.0).unwrap_err(),
            ConfigurationError::NonPositiveStep(-1.0)
        );
        assert!(frange(1.0, 0.0, -1.0).is_err());
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert_eq!(
            frange(2.0, 1.0, 0.1).unwrap_err(),
            ConfigurationError::ReversedRange {
                start: 2.0,
                end: 1.0
            }
        );
    }

    #[test]
    fn non_finite_bound_is_rejected() {
        assert!(matches!(
            frange(0.0, f64::INFINITY, 0.1),
            Err(ConfigurationError::NonFiniteBound {
                bound: RangeBound::End,
                ..
            })
        ));
    }

    #[test]
    fn fused_after_end() {
        let mut range = frange(0.0, 1.0, 1.0).unwrap();
        assert_eq!(range.next(), Some(0.0));
        assert_eq!(range.next(), Some(1.0));
        assert_eq!(range.next(), None);
        assert_eq!(range.next(), None);
    }

    #[test]
    fn max_len_bounds_actual_len() {
        let range = frange(0.0, 1.0, 0.1).unwrap();
        let bound = range.max_len();
        assert!(range.count() as f64 <= bound);
    }
}
