//! File codecs on the edge of the engine.
//!
//! The transforms never decode or encode; this module turns uploaded bytes
//! into a [`RasterSurface`](crate::RasterSurface) and a result surface back
//! into PNG or JPEG bytes for the UI.
//!
//! # Examples
//!
//! ```ignore
//! use pixelcraft_core::codec::{decode_image, encode_png};
//!
//! let surface = decode_image(&bytes)?;
//! let png = encode_png(&surface)?;
//! ```

mod decode;
mod encode;

pub use decode::{decode_image, decode_image_no_orientation, read_orientation, Orientation};
pub use encode::{encode_jpeg, encode_png, DEFAULT_JPEG_QUALITY};
