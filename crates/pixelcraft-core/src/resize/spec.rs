//! Dimension negotiation for the resize form.

use serde::{Deserialize, Serialize};

use super::units::{Dimension, Unit};
use crate::surface::{allocation_len, RasterSurface};
use crate::EngineError;

/// Requested output size, with optional aspect lock.
///
/// While `lock_aspect` is set, editing one side through [`set_width`] or
/// [`set_height`] derives the other from `aspect_ratio` (`width / height` of
/// the original image).
///
/// [`set_width`]: ResizeSpec::set_width
/// [`set_height`]: ResizeSpec::set_height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeSpec {
    pub width: Dimension,
    pub height: Dimension,
    pub lock_aspect: bool,
    pub aspect_ratio: f64,
}

impl ResizeSpec {
    /// Create a spec from explicit values.
    ///
    /// # Errors
    ///
    /// `InvalidAspectRatio` unless `aspect_ratio` is positive and finite,
    /// `UnsupportedUnit` if `width` and `height` use different units.
    pub fn new(
        width: Dimension,
        height: Dimension,
        lock_aspect: bool,
        aspect_ratio: f64,
    ) -> Result<Self, EngineError> {
        let spec = Self {
            width,
            height,
            lock_aspect,
            aspect_ratio,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Seed a spec from a surface: its own size in pixels, aspect locked.
    pub fn for_surface(surface: &RasterSurface) -> Self {
        let (w, h) = surface.dimensions();
        Self {
            width: Dimension::pixels(w as f64),
            height: Dimension::pixels(h as f64),
            lock_aspect: true,
            aspect_ratio: w as f64 / h as f64,
        }
    }

    /// Unit the form is currently showing (the width's unit).
    pub fn unit(&self) -> Unit {
        self.width.unit
    }

    /// Edit the width. Non-finite input is treated as 0.
    pub fn set_width(&mut self, value: f64) {
        let value = sanitize(value);
        self.width.value = value;
        if self.lock_aspect {
            self.height = Dimension::new(value / self.aspect_ratio, self.width.unit);
        }
    }

    /// Edit the height. Non-finite input is treated as 0.
    pub fn set_height(&mut self, value: f64) {
        let value = sanitize(value);
        self.height.value = value;
        if self.lock_aspect {
            self.width = Dimension::new(value * self.aspect_ratio, self.height.unit);
        }
    }

    /// Re-express both sides in `unit` via whole pixels.
    ///
    /// The aspect ratio and lock flag are left alone.
    pub fn set_unit(&mut self, unit: Unit) {
        self.width = self.width.convert(unit);
        self.height = self.height.convert(unit);
    }

    pub fn set_lock_aspect(&mut self, lock: bool) {
        self.lock_aspect = lock;
    }

    pub fn toggle_lock_aspect(&mut self) {
        self.lock_aspect = !self.lock_aspect;
    }

    /// Negotiated output size in whole pixels.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` if either side rounds to zero or less, doesn't
    /// fit in a `u32`, or the area exceeds
    /// [`MAX_PIXELS`](crate::surface::MAX_PIXELS).
    pub fn target_pixels(&self) -> Result<(u32, u32), EngineError> {
        let w = self.width.to_pixels();
        let h = self.height.to_pixels();
        match (u32::try_from(w), u32::try_from(h)) {
            (Ok(w), Ok(h)) => {
                allocation_len(w, h)?;
                Ok((w, h))
            }
            _ => Err(EngineError::dimensions(w as f64, h as f64)),
        }
    }

    /// Check invariants on a spec that arrived without going through `new`.
    ///
    /// # Errors
    ///
    /// `InvalidAspectRatio` for a bad ratio, `UnsupportedUnit` when width and
    /// height are not in the same unit.
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_aspect_ratio(self.aspect_ratio)?;
        if self.width.unit != self.height.unit {
            return Err(EngineError::UnsupportedUnit(format!(
                "width in {} but height in {}",
                self.width.unit, self.height.unit
            )));
        }
        Ok(())
    }
}

fn validate_aspect_ratio(ratio: f64) -> Result<(), EngineError> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidAspectRatio(ratio))
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
