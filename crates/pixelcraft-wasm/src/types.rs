//! WASM-compatible wrapper types for image data.
//!
//! [`JsRasterSurface`] owns a core [`RasterSurface`] in WASM memory. Pixels
//! only cross into JavaScript when one of the copy methods is called.

use pixelcraft_core::{EngineError, RasterSurface};
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;

/// An RGBA image held in WASM memory.
///
/// Every transform in this module returns a fresh `JsRasterSurface`; inputs
/// are never modified, so a surface can be kept around as an undo snapshot.
#[wasm_bindgen]
pub struct JsRasterSurface {
    inner: RasterSurface,
}

#[wasm_bindgen]
impl JsRasterSurface {
    /// Wrap RGBA pixel data (4 bytes per pixel, row-major).
    ///
    /// # Errors
    ///
    /// Fails if either dimension is zero or `pixels.len()` is not
    /// `width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRasterSurface, JsValue> {
        RasterSurface::new(width, height, pixels)
            .map(Self::from_surface)
            .map_err(to_js_error)
    }

    /// Copy a canvas `ImageData` into WASM memory.
    pub fn from_image_data(data: &web_sys::ImageData) -> Result<JsRasterSurface, JsValue> {
        Self::new(data.width(), data.height(), data.data().0)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of bytes in the pixel buffer (width * height * 4).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Returns RGBA pixel data as a `Uint8Array`.
    ///
    /// Note: this copies the buffer out of WASM memory.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Returns RGBA pixel data as a `Uint8ClampedArray`, ready for `ImageData`.
    pub fn pixels_clamped(&self) -> js_sys::Uint8ClampedArray {
        js_sys::Uint8ClampedArray::from(self.inner.pixels())
    }

    /// Build an `ImageData` for `putImageData`.
    pub fn to_image_data(&self) -> Result<web_sys::ImageData, JsValue> {
        web_sys::ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(self.inner.pixels()),
            self.inner.width(),
            self.inner.height(),
        )
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer handles cleanup otherwise.
    pub fn free(self) {}
}

impl JsRasterSurface {
    pub(crate) fn from_surface(inner: RasterSurface) -> Self {
        Self { inner }
    }

    pub(crate) fn surface(&self) -> &RasterSurface {
        &self.inner
    }
}

pub(crate) fn to_js_error(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_rejects_short_buffer() {
        assert!(JsRasterSurface::new(2, 2, vec![0u8; 15]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_rejects_zero_width() {
        assert!(JsRasterSurface::new(0, 2, Vec::new()).is_err());
    }

    #[wasm_bindgen_test]
    fn test_image_data_round_trip() {
        let pixels: Vec<u8> = (0..16u8).collect();
        let img = JsRasterSurface::new(2, 2, pixels.clone()).unwrap();
        let data = img.to_image_data().unwrap();
        assert_eq!(data.width(), 2);

        let back = JsRasterSurface::from_image_data(&data).unwrap();
        assert_eq!(back.pixels(), pixels);
    }

    #[wasm_bindgen_test]
    fn test_pixels_clamped_length() {
        let img = JsRasterSurface::new(3, 2, vec![9u8; 24]).unwrap();
        assert_eq!(img.pixels_clamped().length(), 24);
    }
}
