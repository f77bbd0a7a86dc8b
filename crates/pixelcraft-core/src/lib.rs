//! Pixelcraft Core - image transform engine
//!
//! This crate provides the pixel-level operations behind the editor's crop,
//! resize and pencil-sketch tools. Each operation takes a decoded
//! [`RasterSurface`] plus its parameters and returns a new surface or an
//! [`EngineError`]; nothing is mutated and no I/O happens.
//!
//! - [`sketch`] - grayscale, Sobel edges, intensity blend, contrast
//! - [`resize`] - unit conversion, aspect-locked sizing, resampling
//! - [`crop`] - display-space selection mapping and extraction
//! - [`codec`] - decoding uploads and encoding results (UI collaborator)

pub mod codec;
pub mod crop;
mod error;
pub mod luma;
pub mod resize;
pub mod sketch;
pub mod surface;

pub use crop::{apply_crop, apply_normalized_crop, map_selection};
pub use error::EngineError;
pub use resize::{apply_resize, apply_resize_with_filter, Dimension, ResizeSpec, Unit};
pub use sketch::{apply_sketch, SketchCache, SketchParams, SketchPreview};
pub use surface::{DisplaySize, PixelRect, RasterSurface, Rect, SurfaceId, MAX_PIXELS};
