//! Pixelcraft WASM - WebAssembly bindings for the transform engine
//!
//! This crate exposes pixelcraft-core to the browser editor. Canvas pixels
//! go in as a [`JsRasterSurface`]; every transform hands back a new one.
//!
//! # Module Structure
//!
//! - `types` - the `JsRasterSurface` wrapper and `ImageData` interop
//! - `sketch` - pencil-sketch filter and the slider session cache
//! - `resize` - resize dialog state, unit helpers, resampling
//! - `crop` - display-space and normalized crops
//! - `codec` - PNG/JPEG decoding and encoding
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsRasterSurface, apply_sketch } from '@pixelcraft/wasm';
//!
//! await init();
//!
//! const data = ctx.getImageData(0, 0, canvas.width, canvas.height);
//! const surface = JsRasterSurface.from_image_data(data);
//! ctx.putImageData(apply_sketch(surface, 60).to_image_data(), 0, 0);
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod crop;
mod resize;
mod sketch;
mod types;

pub use codec::{decode_image, encode_jpeg, encode_png};
pub use crop::{apply_crop, apply_normalized_crop};
pub use resize::{apply_resize, from_pixels, to_pixels, JsResizeDialog};
pub use sketch::{apply_sketch, JsSketchSession};
pub use types::JsRasterSurface;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
