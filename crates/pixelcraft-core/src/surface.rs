//! The raster surface every transform reads and writes, plus the rectangle
//! types used to describe regions of it.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Bytes per RGBA8 pixel.
pub const CHANNELS: usize = 4;

/// Largest pixel count a newly allocated surface may have (256 megapixels,
/// 1 GiB of RGBA). Resize targets above it are rejected up front.
pub const MAX_PIXELS: u64 = 1 << 28;

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a surface's pixel content.
///
/// Every constructed surface gets a fresh id; clones share it because they
/// share (immutable) content. Used as a memoization key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    fn next() -> Self {
        SurfaceId(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An immutable RGBA8 image buffer.
///
/// Invariants: `width >= 1`, `height >= 1` and
/// `pixels.len() == width * height * 4`, enforced at construction.
/// Transforms never edit a surface; they return a new one.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    id: SurfaceId,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// Create a surface from RGBA pixel data in row-major order.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` if either side is zero or the byte length
    /// overflows `usize`, `InvalidBuffer` if the buffer length doesn't match
    /// the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EngineError> {
        let expected = buffer_len(width, height)?;
        if pixels.len() != expected {
            return Err(EngineError::InvalidBuffer {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            id: SurfaceId::next(),
            width,
            height,
            pixels,
        })
    }

    /// Create a surface where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, EngineError> {
        let len = allocation_len(width, height)?;
        let pixels = rgba.repeat(len / CHANNELS);
        Self::new(width, height, pixels)
    }

    /// Create a surface by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, EngineError>
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        let mut pixels = Vec::with_capacity(allocation_len(width, height)?);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    /// Create a surface from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Result<Self, EngineError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Copy into an `image::RgbaImage` for use with the `image` crate.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        self.clone().into_rgba_image()
    }

    /// Convert into an `image::RgbaImage` without copying.
    pub fn into_rgba_image(self) -> image::RgbaImage {
        // Length is guaranteed by the constructor, so from_raw can't fail.
        image::RgbaImage::from_raw(self.width, self.height, self.pixels)
            .unwrap_or_else(|| image::RgbaImage::new(0, 0))
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA bytes in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the raw RGBA bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA value at `(x, y)`, or `None` outside `[0, width) x [0, height)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let idx = self.index_of(x, y)?;
        let px = &self.pixels[idx..idx + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Byte offset of pixel `(x, y)`, or `None` when out of bounds.
    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Row `y` as a byte slice, or `None` when out of bounds.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let start = self.index_of(0, y)?;
        Some(&self.pixels[start..start + self.width as usize * CHANNELS])
    }
}

/// Surfaces compare by content; the id is ignored.
impl PartialEq for RasterSurface {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.pixels == other.pixels
    }
}

impl Eq for RasterSurface {}

/// Byte length of a `width x height` RGBA buffer.
///
/// `InvalidDimensions` if either side is zero or the length overflows `usize`.
fn buffer_len(width: u32, height: u32) -> Result<usize, EngineError> {
    if width == 0 || height == 0 {
        return Err(EngineError::dimensions(width, height));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| EngineError::dimensions(width, height))
}

/// Like [`buffer_len`], but also enforces [`MAX_PIXELS`] for buffers the
/// engine is about to allocate.
pub(crate) fn allocation_len(width: u32, height: u32) -> Result<usize, EngineError> {
    if width as u64 * height as u64 > MAX_PIXELS {
        return Err(EngineError::dimensions(width, height));
    }
    buffer_len(width, height)
}

/// A rectangle in floating-point coordinates.
///
/// Used both for normalized selections (0.0 to 1.0) and for selections in
/// display pixels. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle has no positive, finite area.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
            || !self.x.is_finite()
            || !self.y.is_finite()
    }
}

/// A rectangle in whole source pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Size of the on-screen representation a selection was drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A display size matching the surface one-to-one.
    pub fn of(surface: &RasterSurface) -> Self {
        Self::new(surface.width() as f64, surface.height() as f64)
    }

    /// The unit square; selections against it are normalized coordinates.
    pub fn normalized() -> Self {
        Self::new(1.0, 1.0)
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_creation() {
        let surface = RasterSurface::new(100, 50, vec![0u8; 100 * 50 * 4]).unwrap();
        assert_eq!(surface.width(), 100);
        assert_eq!(surface.height(), 50);
        assert_eq!(surface.pixel_count(), 5000);
        assert_eq!(surface.pixels().len(), 20000);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            RasterSurface::new(0, 10, vec![]),
            Err(EngineError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            RasterSurface::new(10, 0, vec![]),
            Err(EngineError::InvalidDimensions { .. })
        ));
        assert!(RasterSurface::filled(0, 0, [0, 0, 0, 255]).is_err());
    }

    #[test]
    fn test_buffer_length_mismatch_rejected() {
        let result = RasterSurface::new(2, 2, vec![0u8; 12]);
        assert_eq!(
            result,
            Err(EngineError::InvalidBuffer {
                expected: 16,
                actual: 12
            })
        );
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert!(matches!(
            RasterSurface::new(u32::MAX, u32::MAX, vec![]),
            Err(EngineError::InvalidDimensions { .. })
        ));
        // 2^32 bytes: wraps to 0 on 32-bit targets, a length mismatch elsewhere
        assert!(RasterSurface::new(65536, 16384, vec![]).is_err());
        assert!(matches!(
            RasterSurface::filled(65536, 65536, [0, 0, 0, 255]),
            Err(EngineError::InvalidDimensions { .. })
        ));
        assert!(RasterSurface::from_fn(u32::MAX, 2, |_, _| [0; 4]).is_err());
    }

    #[test]
    fn test_allocation_len_cap() {
        assert_eq!(allocation_len(16384, 16384), Ok(16384 * 16384 * 4));
        assert!(allocation_len(16384, 16385).is_err());
        assert!(allocation_len(0, 1).is_err());
    }

    #[test]
    fn test_pixel_access_is_bounds_checked() {
        let surface = RasterSurface::from_fn(3, 2, |x, y| [x as u8, y as u8, 7, 255]).unwrap();
        assert_eq!(surface.pixel(2, 1), Some([2, 1, 7, 255]));
        assert_eq!(surface.pixel(3, 0), None);
        assert_eq!(surface.pixel(0, 2), None);
        assert_eq!(surface.row(1).map(<[u8]>::len), Some(12));
        assert!(surface.row(2).is_none());
    }

    #[test]
    fn test_ids_are_unique_and_shared_by_clones() {
        let a = RasterSurface::filled(2, 2, [1, 2, 3, 4]).unwrap();
        let b = RasterSurface::filled(2, 2, [1, 2, 3, 4]).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone().id(), a.id());
        // Content equality ignores ids
        assert_eq!(a, b);
    }

    #[test]
    fn test_rgba_image_round_trip() {
        let surface = RasterSurface::from_fn(4, 3, |x, y| [x as u8, y as u8, 0, 200]).unwrap();
        let img = surface.to_rgba_image();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(3, 2).0, [3, 2, 0, 200]);

        let back = RasterSurface::from_rgba_image(img).unwrap();
        assert_eq!(back, surface);
    }

    #[test]
    fn test_rect_degenerate() {
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, 0.0, 1.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, 1.0, -1.0).is_degenerate());
        assert!(Rect::new(f64::NAN, 0.0, 1.0, 1.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, f64::INFINITY, 1.0).is_degenerate());
    }

    #[test]
    fn test_display_size_validity() {
        assert!(DisplaySize::new(100.0, 50.0).is_valid());
        assert!(!DisplaySize::new(0.0, 50.0).is_valid());
        assert!(!DisplaySize::new(100.0, f64::NAN).is_valid());
        assert!(DisplaySize::normalized().is_valid());
    }
}
