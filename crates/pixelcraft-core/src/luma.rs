//! Luma and channel-storage helpers shared by the sketch pipeline.
//!
//! Luma uses the ITU-R BT.601 weights. Every intermediate value the pipeline
//! stores goes through [`to_channel`], which follows the canvas `ImageData`
//! rule: clamp to 0..=255, round to nearest with ties to even.

/// ITU-R BT.601 coefficient for red channel in luma calculation.
pub const LUMA_R: f64 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luma calculation.
pub const LUMA_G: f64 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luma calculation.
pub const LUMA_B: f64 = 0.114;

/// Calculate luma from u8 RGB values, unrounded (0.0 to 255.0).
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64
}

/// Calculate luma from u8 RGB values as a stored channel value.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    to_channel(luma(r, g, b))
}

/// Store a computed value in an 8-bit channel.
///
/// NaN maps to 0.
#[inline]
pub fn to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Linear contrast around mid-gray: `factor * v + 128 * (1 - factor)`.
#[inline]
pub fn contrast(value: u8, factor: f64) -> u8 {
    to_channel(factor * value as f64 + 128.0 * (1.0 - factor))
}
