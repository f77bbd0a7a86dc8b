//! Encoding surfaces for display or download.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::surface::{RasterSurface, CHANNELS};
use crate::EngineError;

/// Default JPEG quality for downloads.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Encode a surface as PNG, keeping alpha.
pub fn encode_png(surface: &RasterSurface) -> Result<Vec<u8>, EngineError> {
    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            surface.pixels(),
            surface.width(),
            surface.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EngineError::EncodingFailure(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Encode a surface as JPEG.
///
/// JPEG has no alpha channel, so pixels are composited over black first.
/// Quality is clamped to 1-100.
pub fn encode_jpeg(surface: &RasterSurface, quality: u8) -> Result<Vec<u8>, EngineError> {
    let quality = quality.clamp(1, 100);
    let rgb = flatten_over_black(surface.pixels());

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, surface.width(), surface.height(), ExtendedColorType::Rgb8)
        .map_err(|e| EngineError::EncodingFailure(e.to_string()))?;
    Ok(buffer.into_inner())
}

fn flatten_over_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / CHANNELS * 3);
    for px in rgba.chunks_exact(CHANNELS) {
        let alpha = px[3] as u32;
        for &c in &px[..3] {
            rgb.push(((c as u32 * alpha + 127) / 255) as u8);
        }
    }
    rgb
}
