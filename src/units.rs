use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;
use crate::math::Point3;

/// Length units a user may enter coordinates in.
///
/// The host's internal length unit is the centimetre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthUnit {
    Millimeter,
    #[default]
    Centimeter,
    Meter,
    Inch,
    Foot,
}

impl LengthUnit {
    /// Multiplier converting a length in `self` to centimetres.
    #[must_use]
    pub fn to_internal(self) -> f64 {
        match self {
            Self::Millimeter => 0.1,
            Self::Centimeter => 1.0,
            Self::Meter => 100.0,
            Self::Inch => 2.54,
            Self::Foot => 30.48,
        }
    }

    /// The unit's symbol, as accepted by [`FromStr`].
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Inch => "in",
            Self::Foot => "ft",
        }
    }
}

impl FromStr for LengthUnit {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mm" => Ok(Self::Millimeter),
            "cm" => Ok(Self::Centimeter),
            "m" => Ok(Self::Meter),
            "in" => Ok(Self::Inch),
            "ft" => Ok(Self::Foot),
            other => Err(ConfigurationError::UnknownUnit(other.to_owned())),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Multiplies every coordinate of `points` by `factor`, in place.
pub fn scale_points(points: &mut [Point3], factor: f64) {
    for point in points {
        point.coords *= factor;
    }
}
