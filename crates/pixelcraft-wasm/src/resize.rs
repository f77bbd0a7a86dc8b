//! Resize bindings: the dialog state behind the resize form, unit
//! conversion helpers and the resample call itself.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const dialog = JsResizeDialog.for_image(surface);
//! dialog.set_unit("cm");
//! dialog.width = 10;          // height follows while locked
//! const resized = dialog.apply(surface, 1);
//! ```

use crate::types::{to_js_error, JsRasterSurface};
use pixelcraft_core::resize::{from_pixels as core_from_pixels, to_pixels as core_to_pixels, ResampleFilter};
use pixelcraft_core::{apply_resize_with_filter, ResizeSpec, Unit};
use wasm_bindgen::prelude::*;

/// Resize form state.
#[wasm_bindgen]
pub struct JsResizeDialog {
    inner: ResizeSpec,
}

#[wasm_bindgen]
impl JsResizeDialog {
    /// Seed the form from an image: its pixel size, aspect locked.
    pub fn for_image(image: &JsRasterSurface) -> JsResizeDialog {
        Self {
            inner: ResizeSpec::for_surface(image.surface()),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.inner.width.value
    }

    /// Set the width; the height follows while the aspect is locked.
    #[wasm_bindgen(setter)]
    pub fn set_width(&mut self, value: f64) {
        self.inner.set_width(value);
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.inner.height.value
    }

    /// Set the height; the width follows while the aspect is locked.
    #[wasm_bindgen(setter)]
    pub fn set_height(&mut self, value: f64) {
        self.inner.set_height(value);
    }

    /// Current unit tag: "px", "cm", "mm" or "inch".
    #[wasm_bindgen(getter)]
    pub fn unit(&self) -> String {
        self.inner.unit().as_str().to_string()
    }

    /// Switch units, converting both values through whole pixels.
    pub fn set_unit(&mut self, unit: &str) -> Result<(), JsValue> {
        let unit: Unit = unit.parse().map_err(to_js_error)?;
        self.inner.set_unit(unit);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn lock_aspect(&self) -> bool {
        self.inner.lock_aspect
    }

    #[wasm_bindgen(setter)]
    pub fn set_lock_aspect(&mut self, lock: bool) {
        self.inner.set_lock_aspect(lock);
    }

    pub fn toggle_lock_aspect(&mut self) {
        self.inner.toggle_lock_aspect();
    }

    #[wasm_bindgen(getter)]
    pub fn aspect_ratio(&self) -> f64 {
        self.inner.aspect_ratio
    }

    /// Output width in whole pixels.
    pub fn target_width(&self) -> Result<u32, JsValue> {
        self.inner.target_pixels().map(|(w, _)| w).map_err(to_js_error)
    }

    /// Output height in whole pixels.
    pub fn target_height(&self) -> Result<u32, JsValue> {
        self.inner.target_pixels().map(|(_, h)| h).map_err(to_js_error)
    }

    /// Resample `image` to the current size.
    ///
    /// # Arguments
    ///
    /// * `filter` - 0 = Nearest, 1 = Bilinear, 2 = Lanczos3 (others fall
    ///   back to Bilinear)
    pub fn apply(&self, image: &JsRasterSurface, filter: u8) -> Result<JsRasterSurface, JsValue> {
        apply_resize_with_filter(image.surface(), &self.inner, ResampleFilter::from(filter))
            .map(JsRasterSurface::from_surface)
            .map_err(to_js_error)
    }

    /// Serialize to a plain object for storage.
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Restore from a plain object produced by `to_json`.
    pub fn from_json(value: JsValue) -> Result<JsResizeDialog, JsValue> {
        let inner: ResizeSpec =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        inner.validate().map_err(to_js_error)?;
        Ok(Self { inner })
    }
}

/// Resize `image` with a spec given as a plain object
/// (`{ width: { value, unit }, height: { value, unit }, lockAspect, aspectRatio }`).
#[wasm_bindgen]
pub fn apply_resize(image: &JsRasterSurface, spec: JsValue) -> Result<JsRasterSurface, JsValue> {
    let spec: ResizeSpec =
        serde_wasm_bindgen::from_value(spec).map_err(|e| JsValue::from_str(&e.to_string()))?;
    pixelcraft_core::apply_resize(image.surface(), &spec)
        .map(JsRasterSurface::from_surface)
        .map_err(to_js_error)
}

/// Convert a length in `unit` to whole pixels at 96 DPI.
#[wasm_bindgen]
pub fn to_pixels(value: f64, unit: &str) -> Result<f64, JsValue> {
    let unit: Unit = unit.parse().map_err(to_js_error)?;
    Ok(core_to_pixels(value, unit) as f64)
}

/// Convert whole pixels to `unit` at 96 DPI, rounded for display.
#[wasm_bindgen]
pub fn from_pixels(px: f64, unit: &str) -> Result<f64, JsValue> {
    let unit: Unit = unit.parse().map_err(to_js_error)?;
    Ok(core_from_pixels(px.round() as i64, unit))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_json_round_trip() {
        let img = JsRasterSurface::new(4, 2, vec![0u8; 32]).unwrap();
        let mut dialog = JsResizeDialog::for_image(&img);
        dialog.set_width(8.0);

        let json = dialog.to_json().unwrap();
        let restored = JsResizeDialog::from_json(json.clone()).unwrap();
        assert_eq!(restored.width(), 8.0);
        assert_eq!(restored.height(), 4.0);

        let resized = apply_resize(&img, json).unwrap();
        assert_eq!(resized.width(), 8);
        assert_eq!(resized.height(), 4);
    }

    #[wasm_bindgen_test]
    fn test_unknown_unit_is_error() {
        assert!(to_pixels(1.0, "pt").is_err());
        let img = JsRasterSurface::new(1, 1, vec![0u8; 4]).unwrap();
        assert!(JsResizeDialog::for_image(&img).set_unit("furlong").is_err());
    }

    #[wasm_bindgen_test]
    fn test_zero_target_is_error() {
        let img = JsRasterSurface::new(4, 4, vec![0u8; 64]).unwrap();
        let mut dialog = JsResizeDialog::for_image(&img);
        dialog.set_width(0.0);
        assert!(dialog.apply(&img, 1).is_err());
    }

    #[wasm_bindgen_test]
    fn test_from_json_rejects_bad_shape() {
        let invalid = serde_wasm_bindgen::to_value(&42).unwrap();
        assert!(JsResizeDialog::from_json(invalid).is_err());
    }
}
