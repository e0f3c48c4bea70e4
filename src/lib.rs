//! Parametric equation curves for CAD sketches.
//!
//! A [`CurveDefinition`] holds `x(t)`, `y(t)`, `z(t)` and a `t` range as
//! plain text. [`generate_samples`] turns it into an ordered point list, and
//! [`BuildCurve`] hands that list to a [`SketchHost`] to fit a spline.

pub mod command;
pub mod curve;
pub mod error;
pub mod expression;
pub mod math;
pub mod sampling;
pub mod sketch;
pub mod units;

pub use command::{BuildCurve, BuildOptions, BuiltCurve};
pub use curve::{Axis, CurveDefinition};
pub use error::{EqcurveError, Result};
pub use sampling::{generate_samples, SampleRange, SamplerOptions};
pub use sketch::{SketchHost, SketchStore};
pub use units::LengthUnit;
