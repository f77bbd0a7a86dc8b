//! Unit-aware resizing.
//!
//! This module provides:
//! - Unit conversion between pixels, cm, mm and inches at 96 DPI
//! - [`ResizeSpec`], the width/height negotiation behind the resize form
//!   (aspect lock, unit switching)
//! - Resampling to the negotiated pixel size
//!
//! # Resampling filter
//!
//! [`apply_resize`] resamples with [`ResampleFilter::Bilinear`], which maps to
//! the `image` crate's `Triangle` filter. Exact pixel output therefore
//! differs from a browser canvas, which picks its own smoothing filter.
//! [`apply_resize_with_filter`] selects another filter explicitly.

mod resample;
mod spec;
mod units;

pub use resample::{resample, ResampleFilter};
pub use spec::ResizeSpec;
pub use units::{from_pixels, to_pixels, Dimension, Unit, CM_PER_INCH, DPI, MM_PER_INCH};

use crate::surface::RasterSurface;
use crate::EngineError;

/// Resize `surface` to the size negotiated by `spec`, using bilinear resampling.
///
/// # Errors
///
/// `InvalidDimensions` if either negotiated side is not at least one pixel;
/// `InvalidAspectRatio` if the spec's ratio is not positive.
pub fn apply_resize(surface: &RasterSurface, spec: &ResizeSpec) -> Result<RasterSurface, EngineError> {
    apply_resize_with_filter(surface, spec, ResampleFilter::default())
}

/// Resize `surface` to the size negotiated by `spec` with an explicit filter.
#[tracing::instrument(
    skip_all,
    fields(width = surface.width(), height = surface.height(), filter = ?filter)
)]
pub fn apply_resize_with_filter(
    surface: &RasterSurface,
    spec: &ResizeSpec,
    filter: ResampleFilter,
) -> Result<RasterSurface, EngineError> {
    spec.validate()?;
    let (width, height) = spec.target_pixels()?;
    tracing::debug!(target_width = width, target_height = height, "negotiated resize target");
    resample(surface, width, height, filter)
}
