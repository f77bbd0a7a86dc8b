//! WASM bindings for cropping.

use crate::types::{to_js_error, JsRasterSurface};
use pixelcraft_core::{DisplaySize, Rect};
use wasm_bindgen::prelude::*;

/// Crop `image` to a selection drawn on a scaled preview.
///
/// # Arguments
///
/// * `image` - Source surface at full resolution
/// * `display_width`, `display_height` - Size the preview is drawn at
/// * `x`, `y`, `width`, `height` - Selection in preview coordinates
///
/// # Example (TypeScript)
///
/// ```typescript
/// // 200x100 image shown at 100x50
/// const cropped = apply_crop(image, 100, 50, 10, 10, 40, 20); // 80x40
/// ```
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn apply_crop(
    image: &JsRasterSurface,
    display_width: f64,
    display_height: f64,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<JsRasterSurface, JsValue> {
    pixelcraft_core::apply_crop(
        image.surface(),
        DisplaySize::new(display_width, display_height),
        Rect::new(x, y, width, height),
    )
    .map(JsRasterSurface::from_surface)
    .map_err(to_js_error)
}

/// Crop `image` using normalized coordinates in [0, 1].
///
/// ```typescript
/// // Center 50% of the image
/// const cropped = apply_normalized_crop(image, 0.25, 0.25, 0.5, 0.5);
/// ```
#[wasm_bindgen]
pub fn apply_normalized_crop(
    image: &JsRasterSurface,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
) -> Result<JsRasterSurface, JsValue> {
    pixelcraft_core::apply_normalized_crop(image.surface(), Rect::new(left, top, width, height))
        .map(JsRasterSurface::from_surface)
        .map_err(to_js_error)
}
