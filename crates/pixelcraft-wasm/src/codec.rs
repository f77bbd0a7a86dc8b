//! Image file bindings: decoding uploads and encoding results.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, encode_png } from '@pixelcraft/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const surface = decode_image(bytes);
//! const png = encode_png(apply_sketch(surface, 50));
//! ```

use crate::types::{to_js_error, JsRasterSurface};
use pixelcraft_core::codec;
use wasm_bindgen::prelude::*;

/// Decode a PNG or JPEG file, applying EXIF orientation.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupt.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterSurface, JsValue> {
    codec::decode_image(bytes)
        .map(JsRasterSurface::from_surface)
        .map_err(to_js_error)
}

/// Encode a surface as PNG bytes, alpha preserved.
#[wasm_bindgen]
pub fn encode_png(image: &JsRasterSurface) -> Result<Vec<u8>, JsValue> {
    codec::encode_png(image.surface()).map_err(to_js_error)
}

/// Encode a surface as JPEG bytes.
///
/// # Arguments
///
/// * `image` - Surface to encode; transparent pixels come out black
/// * `quality` - JPEG quality (1-100, recommended: 92)
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRasterSurface, quality: u8) -> Result<Vec<u8>, JsValue> {
    codec::encode_jpeg(image.surface(), quality).map_err(to_js_error)
}
