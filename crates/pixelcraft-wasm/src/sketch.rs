//! Pencil-sketch bindings.
//!
//! `apply_sketch` is the one-shot form. `JsSketchSession` keeps the
//! grayscale and edge stages of the last surface, so dragging the intensity
//! slider only re-runs the blend.

use crate::types::{to_js_error, JsRasterSurface};
use pixelcraft_core::{SketchCache, SketchParams};
use wasm_bindgen::prelude::*;

/// Render a pencil sketch of `image`.
///
/// # Arguments
///
/// * `image` - Source surface
/// * `intensity` - Edge strength, 0-100 (values above 100 are clamped)
///
/// # Example (TypeScript)
///
/// ```typescript
/// const sketch = apply_sketch(surface, 50);
/// ctx.putImageData(sketch.to_image_data(), 0, 0);
/// ```
#[wasm_bindgen]
pub fn apply_sketch(image: &JsRasterSurface, intensity: u8) -> Result<JsRasterSurface, JsValue> {
    pixelcraft_core::apply_sketch(image.surface(), SketchParams::new(intensity))
        .map(JsRasterSurface::from_surface)
        .map_err(to_js_error)
}

/// Sketch renderer that reuses work between slider moves.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsSketchSession {
    cache: SketchCache,
}

#[wasm_bindgen]
impl JsSketchSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `image` at `intensity`, rebuilding cached stages only when
    /// `image` is not the surface rendered last time.
    pub fn render(
        &mut self,
        image: &JsRasterSurface,
        intensity: u8,
    ) -> Result<JsRasterSurface, JsValue> {
        self.cache
            .render(image.surface(), SketchParams::new(intensity))
            .map(JsRasterSurface::from_surface)
            .map_err(to_js_error)
    }

    /// Whether the session holds stages for `image`.
    pub fn is_cached(&self, image: &JsRasterSurface) -> bool {
        self.cache.cached_source() == Some(image.surface().id())
    }

    /// Drop cached stages, e.g. when a new file is opened.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
