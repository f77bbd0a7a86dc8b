//! Memoized sketch rendering for interactive intensity changes.
//!
//! Grayscale and edge detection only depend on the source surface, so a
//! [`SketchPreview`] computes them once and each [`SketchPreview::render`]
//! only redoes the blend and contrast stages. [`SketchCache`] keys a preview
//! by the source's [`SurfaceId`].

use crate::luma::{contrast, luma_u8, to_channel};
use crate::surface::{RasterSurface, SurfaceId, CHANNELS};
use crate::EngineError;

use super::sobel::edge_magnitude;
use super::{SketchParams, CONTRAST_FACTOR};

/// Grayscale and edge buffers for one source surface.
#[derive(Debug, Clone)]
pub struct SketchPreview {
    source: SurfaceId,
    width: u32,
    height: u32,
    gray: Vec<u8>,
    edges: Vec<u8>,
    alpha: Vec<u8>,
}

impl SketchPreview {
    /// Run the grayscale and edge stages for `surface`.
    pub fn new(surface: &RasterSurface) -> Self {
        let (gray, alpha) = grayscale(surface);
        let edges = edge_magnitude(&gray, surface.width() as usize, surface.height() as usize);
        Self {
            source: surface.id(),
            width: surface.width(),
            height: surface.height(),
            gray,
            edges,
            alpha,
        }
    }

    /// Id of the surface this preview was built from.
    pub fn source_id(&self) -> SurfaceId {
        self.source
    }

    /// Grayscale channel, one byte per pixel.
    pub fn gray(&self) -> &[u8] {
        &self.gray
    }

    /// Edge magnitude channel, one byte per pixel. Border pixels are 0.
    pub fn edges(&self) -> &[u8] {
        &self.edges
    }

    /// Blend and contrast stages at the given intensity.
    pub fn render(&self, params: SketchParams) -> Result<RasterSurface, EngineError> {
        let blend = params.blend_factor();
        let mut pixels = Vec::with_capacity(self.gray.len() * CHANNELS);

        for ((&gray, &edge), &alpha) in self.gray.iter().zip(&self.edges).zip(&self.alpha) {
            let inverted = 255.0 - edge as f64;
            let blended = to_channel(gray as f64 * (1.0 - blend) + inverted * blend);
            let v = contrast(blended, CONTRAST_FACTOR);
            pixels.extend_from_slice(&[v, v, v, alpha]);
        }

        RasterSurface::new(self.width, self.height, pixels)
    }
}

/// Split a surface into its luma channel and its alpha channel.
fn grayscale(surface: &RasterSurface) -> (Vec<u8>, Vec<u8>) {
    let count = surface.pixel_count();
    let mut gray = Vec::with_capacity(count);
    let mut alpha = Vec::with_capacity(count);
    for px in surface.pixels().chunks_exact(CHANNELS) {
        gray.push(luma_u8(px[0], px[1], px[2]));
        alpha.push(px[3]);
    }
    (gray, alpha)
}

/// Holds the preview of the most recently sketched surface.
///
/// Rendering a different surface replaces the cached preview.
#[derive(Debug, Clone, Default)]
pub struct SketchCache {
    preview: Option<SketchPreview>,
}

impl SketchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `surface` at `params`, reusing cached stages when the surface
    /// was seen last time.
    pub fn render(
        &mut self,
        surface: &RasterSurface,
        params: SketchParams,
    ) -> Result<RasterSurface, EngineError> {
        if self.cached_source() != Some(surface.id()) {
            tracing::debug!(
                width = surface.width(),
                height = surface.height(),
                "rebuilding sketch preview"
            );
            self.preview = Some(SketchPreview::new(surface));
        }
        let preview = self
            .preview
            .get_or_insert_with(|| SketchPreview::new(surface));
        preview.render(params)
    }

    /// Id of the surface currently cached, if any.
    pub fn cached_source(&self) -> Option<SurfaceId> {
        self.preview.as_ref().map(SketchPreview::source_id)
    }

    /// Drop the cached preview.
    pub fn clear(&mut self) {
        self.preview = None;
    }
}
