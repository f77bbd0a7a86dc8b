//! Resampling onto a new pixel grid using the `image` crate's filters.

use serde::{Deserialize, Serialize};

use crate::surface::{allocation_len, RasterSurface};
use crate::EngineError;

/// Filter used when resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResampleFilter {
    /// Nearest neighbor interpolation (fastest, blocky).
    Nearest,
    /// Bilinear interpolation. Closest to the browser canvas default.
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, sharpest).
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::Nearest => image::imageops::FilterType::Nearest,
            ResampleFilter::Bilinear => image::imageops::FilterType::Triangle,
            ResampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

impl From<u8> for ResampleFilter {
    /// 0 = Nearest, 2 = Lanczos3, anything else = Bilinear.
    fn from(value: u8) -> Self {
        match value {
            0 => ResampleFilter::Nearest,
            2 => ResampleFilter::Lanczos3,
            _ => ResampleFilter::Bilinear,
        }
    }
}

/// Resample `surface` to exactly `width x height`.
///
/// # Errors
///
/// `InvalidDimensions` if either target side is zero or the target area
/// exceeds [`MAX_PIXELS`](crate::surface::MAX_PIXELS).
pub fn resample(
    surface: &RasterSurface,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<RasterSurface, EngineError> {
    allocation_len(width, height)?;

    // Fast path: if dimensions match, just clone
    if surface.dimensions() == (width, height) {
        return Ok(surface.clone());
    }

    let resized = image::imageops::resize(
        &surface.to_rgba_image(),
        width,
        height,
        filter.to_image_filter(),
    );
    RasterSurface::from_rgba_image(resized)
}
