//! Physical unit conversion anchored at 96 DPI.
//!
//! `to_pixels` rounds to whole pixels; `from_pixels` rounds to the display
//! precision of the target unit (cm and inch to 2 decimals, mm to 1). The
//! two are not inverses: a round trip can drift by up to half a pixel plus
//! half a display step.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Pixels per inch used for every physical conversion.
pub const DPI: f64 = 96.0;

/// Centimeters per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Unit a resize dimension is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "px")]
    Pixel,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "inch")]
    Inch,
}

impl Unit {
    /// All units, in the order the resize form lists them.
    pub const ALL: [Unit; 4] = [Unit::Pixel, Unit::Centimeter, Unit::Millimeter, Unit::Inch];

    /// Short tag used in the UI and in serialized specs.
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Pixel => "px",
            Unit::Centimeter => "cm",
            Unit::Millimeter => "mm",
            Unit::Inch => "inch",
        }
    }

    /// Decimal places kept by [`from_pixels`]; `None` for pixels (unrounded).
    pub fn display_decimals(self) -> Option<i32> {
        match self {
            Unit::Pixel => None,
            Unit::Centimeter | Unit::Inch => Some(2),
            Unit::Millimeter => Some(1),
        }
    }

    /// Size of one pixel in this unit.
    pub fn per_pixel(self) -> f64 {
        match self {
            Unit::Pixel => 1.0,
            Unit::Centimeter => CM_PER_INCH / DPI,
            Unit::Millimeter => MM_PER_INCH / DPI,
            Unit::Inch => 1.0 / DPI,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "px" => Ok(Unit::Pixel),
            "cm" => Ok(Unit::Centimeter),
            "mm" => Ok(Unit::Millimeter),
            "inch" => Ok(Unit::Inch),
            other => Err(EngineError::UnsupportedUnit(other.to_string())),
        }
    }
}

/// A length together with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub value: f64,
    pub unit: Unit,
}

impl Dimension {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn pixels(value: f64) -> Self {
        Self::new(value, Unit::Pixel)
    }

    /// Whole pixels this dimension covers.
    pub fn to_pixels(&self) -> i64 {
        to_pixels(self.value, self.unit)
    }

    /// Re-express in `unit` via whole pixels.
    pub fn convert(&self, unit: Unit) -> Self {
        Self::new(from_pixels(self.to_pixels(), unit), unit)
    }
}

/// Convert a length to whole pixels.
///
/// Rounds half away from zero. Non-finite input yields 0.
pub fn to_pixels(value: f64, unit: Unit) -> i64 {
    let px = match unit {
        Unit::Pixel => value,
        Unit::Centimeter => value * DPI / CM_PER_INCH,
        Unit::Millimeter => value * DPI / MM_PER_INCH,
        Unit::Inch => value * DPI,
    };
    if !px.is_finite() {
        return 0;
    }
    px.round() as i64
}

/// Convert whole pixels to `unit`, rounded to the unit's display precision.
pub fn from_pixels(px: i64, unit: Unit) -> f64 {
    let px = px as f64;
    match unit {
        Unit::Pixel => px,
        Unit::Centimeter => round_to(px * CM_PER_INCH / DPI, 2),
        Unit::Millimeter => round_to(px * MM_PER_INCH / DPI, 1),
        Unit::Inch => round_to(px / DPI, 2),
    }
}

/// Round to `decimals` places from the exact binary value, the way a
/// fixed-point display string does. Exact ties go away from zero.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let scaled = value * scale;
    // Zero residual means `value * scale` was computed without rounding.
    let exact = value.mul_add(scale, -scaled) == 0.0;
    if exact && scaled.fract().abs() == 0.5 {
        return scaled.round() / scale;
    }
    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixels_anchors() {
        assert_eq!(to_pixels(1.0, Unit::Inch), 96);
        assert_eq!(to_pixels(2.54, Unit::Centimeter), 96);
        assert_eq!(to_pixels(25.4, Unit::Millimeter), 96);
        assert_eq!(to_pixels(96.0, Unit::Pixel), 96);
    }

    #[test]
    fn test_to_pixels_rounds() {
        assert_eq!(to_pixels(10.4, Unit::Pixel), 10);
        assert_eq!(to_pixels(10.5, Unit::Pixel), 11);
        // 1 cm = 37.795 px
        assert_eq!(to_pixels(1.0, Unit::Centimeter), 38);
        // 1 mm = 3.7795 px
        assert_eq!(to_pixels(1.0, Unit::Millimeter), 4);
        assert_eq!(to_pixels(0.5, Unit::Inch), 48);
    }

    #[test]
    fn test_to_pixels_non_finite() {
        assert_eq!(to_pixels(f64::NAN, Unit::Pixel), 0);
        assert_eq!(to_pixels(f64::INFINITY, Unit::Inch), 0);
    }

    #[test]
    fn test_from_pixels_anchors() {
        assert_eq!(from_pixels(96, Unit::Inch), 1.0);
        assert_eq!(from_pixels(96, Unit::Centimeter), 2.54);
        assert_eq!(from_pixels(96, Unit::Millimeter), 25.4);
        assert_eq!(from_pixels(96, Unit::Pixel), 96.0);
    }

    #[test]
    fn test_from_pixels_precision() {
        // 100 px = 2.6458 cm
        assert_eq!(from_pixels(100, Unit::Centimeter), 2.65);
        // 100 px = 26.458 mm
        assert_eq!(from_pixels(100, Unit::Millimeter), 26.5);
        // 100 px = 1.0417 in
        assert_eq!(from_pixels(100, Unit::Inch), 1.04);
    }

    #[test]
    fn test_from_pixels_rounds_binary_value() {
        // 216 px is 5.715 cm on paper but 5.71499... as an f64
        assert_eq!(from_pixels(216, Unit::Centimeter), 5.71);
        assert_eq!(from_pixels(216, Unit::Millimeter), 57.1);
        assert_eq!(from_pixels(264, Unit::Millimeter), 69.8);
    }

    #[test]
    fn test_from_pixels_exact_tie_rounds_up() {
        // 12 px is exactly 0.125 in
        assert_eq!(from_pixels(12, Unit::Inch), 0.13);
        assert_eq!(round_to(-0.125, 2), -0.13);
    }

    #[test]
    fn test_unit_parsing() {
        for unit in Unit::ALL {
            assert_eq!(unit.as_str().parse::<Unit>().unwrap(), unit);
            assert_eq!(unit.to_string(), unit.as_str());
        }
        assert_eq!(
            "pt".parse::<Unit>(),
            Err(EngineError::UnsupportedUnit("pt".to_string()))
        );
        assert!("PX".parse::<Unit>().is_err());
    }

    #[test]
    fn test_dimension_convert() {
        let d = Dimension::new(2.54, Unit::Centimeter);
        assert_eq!(d.to_pixels(), 96);
        assert_eq!(d.convert(Unit::Inch), Dimension::new(1.0, Unit::Inch));
        assert_eq!(d.convert(Unit::Pixel), Dimension::pixels(96.0));
    }
}
