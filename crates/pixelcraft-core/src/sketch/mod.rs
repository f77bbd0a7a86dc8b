//! Pencil-sketch effect.
//!
//! The pipeline runs four stages per invocation:
//! 1. Grayscale using BT.601 luma (alpha untouched)
//! 2. Sobel edge magnitude on the gray channel (border ring = 0)
//! 3. Blend: `gray * (1 - b) + (255 - edge) * b` with `b = intensity / 100`
//! 4. Contrast with a fixed factor of 1.2 around mid-gray
//!
//! Every stage stores its result as an 8-bit channel before the next one
//! reads it. See [`crate::luma::to_channel`] for the storage rule.
//!
//! # Example
//!
//! ```ignore
//! use pixelcraft_core::sketch::{apply_sketch, SketchParams};
//!
//! let sketch = apply_sketch(&surface, SketchParams::new(70))?;
//! ```

mod preview;
mod sobel;

pub use preview::{SketchCache, SketchPreview};
pub use sobel::{edge_magnitude, SOBEL_X, SOBEL_Y};

use serde::{Deserialize, Serialize};

use crate::surface::RasterSurface;
use crate::EngineError;

/// Contrast applied after blending.
pub const CONTRAST_FACTOR: f64 = 1.2;

/// Highest accepted intensity.
pub const MAX_INTENSITY: u8 = 100;

/// Parameters for the sketch effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SketchParams {
    /// Effect intensity (0 to 100). 0 is plain grayscale, 100 is the
    /// inverted edge map.
    pub intensity: u8,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self { intensity: 50 }
    }
}

impl SketchParams {
    /// Create parameters, clamping intensity to 0..=100.
    pub fn new(intensity: u8) -> Self {
        if intensity > MAX_INTENSITY {
            tracing::warn!(intensity, "sketch intensity above 100, clamping");
        }
        Self {
            intensity: intensity.min(MAX_INTENSITY),
        }
    }

    /// Intensity clamped to 0..=100.
    pub fn intensity(&self) -> u8 {
        self.intensity.min(MAX_INTENSITY)
    }

    /// Weight of the inverted edge map in the blend (0.0 to 1.0).
    pub fn blend_factor(&self) -> f64 {
        self.intensity() as f64 / 100.0
    }
}

/// Render a pencil sketch of `surface`.
///
/// Width, height and alpha are preserved exactly. Surfaces narrower or
/// shorter than 3 pixels have no interior, so their output is grayscale plus
/// contrast.
///
/// For repeated renders of one surface at different intensities use
/// [`SketchPreview`] or [`SketchCache`]; the output is identical.
#[tracing::instrument(
    skip_all,
    fields(width = surface.width(), height = surface.height(), intensity = params.intensity())
)]
pub fn apply_sketch(
    surface: &RasterSurface,
    params: SketchParams,
) -> Result<RasterSurface, EngineError> {
    SketchPreview::new(surface).render(params)
}
