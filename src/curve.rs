use std::fmt;

use crate::sampling::SampleRange;

/// Default values shown in the command dialog.
pub mod defaults {
    pub const NAME: &str = "Curve";
    pub const X: &str = "cos(t)";
    pub const Y: &str = "sin(t)";
    pub const Z: &str = "t";
    pub const T_START: &str = "0";
    pub const T_END: &str = "2*pi";
    pub const T_STEP: &str = "0.1";
}

/// Dialog input ids, as registered by the host command.
pub mod input_ids {
    pub const NAME: &str = "curveName";
    pub const X: &str = "curveFunctionX";
    pub const Y: &str = "curveFunctionY";
    pub const Z: &str = "curveFunctionZ";
    pub const T_START: &str = "tStart";
    pub const T_END: &str = "tEnd";
    pub const T_STEP: &str = "tStep";
}

/// One of the three coordinate functions of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x(t)"),
            Self::Y => f.write_str("y(t)"),
            Self::Z => f.write_str("z(t)"),
        }
    }
}

/// A parametric curve `(x(t), y(t), z(t))` as entered by the user.
///
/// All fields are unvalidated text; they are only parsed when the curve is
/// sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveDefinition {
    /// Name given to the component that receives the curve.
    pub name: String,
    pub x: String,
    pub y: String,
    pub z: String,
    pub range: SampleRange,
}

impl CurveDefinition {
    /// Creates a curve definition from its three coordinate expressions.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        x: impl Into<String>,
        y: impl Into<String>,
        z: impl Into<String>,
        range: SampleRange,
    ) -> Self {
        Self {
            name: name.into(),
            x: x.into(),
            y: y.into(),
            z: z.into(),
            range,
        }
    }

    /// Builds a definition from dialog `(id, value)` pairs.
    ///
    /// Ids not listed in [`input_ids`] are ignored; missing ids keep their
    /// default value.
    #[must_use]
    pub fn from_inputs<'a, I>(inputs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut curve = Self::default();
        for (id, value) in inputs {
            let slot = match id {
                input_ids::NAME => &mut curve.name,
                input_ids::X => &mut curve.x,
                input_ids::Y => &mut curve.y,
                input_ids::Z => &mut curve.z,
                input_ids::T_START => &mut curve.range.start,
                input_ids::T_END => &mut curve.range.end,
                input_ids::T_STEP => &mut curve.range.step,
                _ => continue,
            };
            value.clone_into(slot);
        }
        curve
    }

    /// Returns the expression text for `axis`.
    #[must_use]
    pub fn expression(&self, axis: Axis) -> &str {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl Default for CurveDefinition {
    fn default() -> Self {
        Self::new(
            defaults::NAME,
            defaults::X,
            defaults::Y,
            defaults::Z,
            SampleRange::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_a_helix() {
        let curve = CurveDefinition::default();
        assert_eq!(curve.name, "Curve");
        assert_eq!(curve.expression(Axis::X), "cos(t)");
        assert_eq!(curve.expression(Axis::Y), "sin(t)");
        assert_eq!(curve.expression(Axis::Z), "t");
        assert_eq!(curve.range.end, "2*pi");
    }

    #[test]
    fn from_inputs_maps_dialog_ids() {
        let curve = CurveDefinition::from_inputs([
            ("curveName", "Spiral"),
            ("curveFunctionX", "t*cos(t)"),
            ("curveFunctionZ", "0"),
            ("tStep", "0.05"),
            ("unrelated", "ignored"),
        ]);
        assert_eq!(curve.name, "Spiral");
        assert_eq!(curve.x, "t*cos(t)");
        assert_eq!(curve.y, defaults::Y);
        assert_eq!(curve.z, "0");
        assert_eq!(curve.range.start, defaults::T_START);
        assert_eq!(curve.range.step, "0.05");
    }

    #[test]
    fn axis_display_names_the_function() {
        assert_eq!(Axis::Y.to_string(), "y(t)");
    }
}
