//! Cropping from a selection drawn on a scaled display.
//!
//! The crop widget shows the image at some display size and the user drags
//! a rectangle over it. The selection is mapped back to source pixels with
//! `scale = source / display` per axis, each coordinate is rounded to the
//! nearest pixel, and the result is clamped to the source bounds.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Display-space selections use the display's own units (CSS pixels)
//! - Normalized selections use 0.0 to 1.0 on both axes
//!
//! # Example
//!
//! ```ignore
//! // 200x100 image shown at 100x50; the user selected (10, 10, 40, 20)
//! let cropped = apply_crop(&image, DisplaySize::new(100.0, 50.0), Rect::new(10.0, 10.0, 40.0, 20.0))?;
//! assert_eq!(cropped.dimensions(), (80, 40));
//! ```

use crate::surface::{DisplaySize, PixelRect, RasterSurface, Rect, CHANNELS};
use crate::EngineError;

/// Map a display-space selection onto the source pixel grid.
///
/// # Errors
///
/// - `InvalidDimensions` if the display size is not positive and finite
/// - `InvalidSelection` if the selection has no positive area, or if
///   nothing of it is left after clamping to the source
pub fn map_selection(
    source_width: u32,
    source_height: u32,
    display: DisplaySize,
    selection: Rect,
) -> Result<PixelRect, EngineError> {
    if !display.is_valid() {
        return Err(EngineError::dimensions(display.width, display.height));
    }
    if selection.is_degenerate() {
        return Err(EngineError::InvalidSelection(format!(
            "selection {}x{} has no area",
            selection.width, selection.height
        )));
    }

    let scale_x = source_width as f64 / display.width;
    let scale_y = source_height as f64 / display.height;

    let (x, width) = map_span(selection.x, selection.width, scale_x, source_width);
    let (y, height) = map_span(selection.y, selection.height, scale_y, source_height);

    if width == 0 || height == 0 {
        return Err(EngineError::InvalidSelection(format!(
            "selection ({}, {}, {}, {}) is empty in a {}x{} source",
            selection.x, selection.y, selection.width, selection.height, source_width, source_height
        )));
    }

    Ok(PixelRect::new(x, y, width, height))
}

/// Scale and round one axis, then intersect it with `[0, limit)`.
///
/// Returns `(start, length)`; length is 0 when nothing remains.
fn map_span(start: f64, length: f64, scale: f64, limit: u32) -> (u32, u32) {
    let start = (start * scale).round();
    let end = start + (length * scale).round();
    let limit = limit as f64;

    let clamped_start = start.clamp(0.0, limit);
    let clamped_end = end.clamp(0.0, limit);
    let length = (clamped_end - clamped_start).max(0.0);
    (clamped_start as u32, length as u32)
}

/// Copy the pixels inside `rect` into a new surface.
///
/// `rect` must lie within the surface (as produced by [`map_selection`]).
pub fn extract(surface: &RasterSurface, rect: PixelRect) -> Result<RasterSurface, EngineError> {
    let in_bounds = rect.width > 0
        && rect.height > 0
        && rect.x as u64 + rect.width as u64 <= surface.width() as u64
        && rect.y as u64 + rect.height as u64 <= surface.height() as u64;
    if !in_bounds {
        return Err(EngineError::InvalidSelection(format!(
            "{:?} is outside a {}x{} surface",
            rect,
            surface.width(),
            surface.height()
        )));
    }

    let row_bytes = rect.width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * rect.height as usize);

    // Copy pixel data row by row
    for y in rect.y..rect.y + rect.height {
        let row = surface
            .row(y)
            .ok_or_else(|| EngineError::InvalidSelection(format!("row {} out of bounds", y)))?;
        let start = rect.x as usize * CHANNELS;
        output.extend_from_slice(&row[start..start + row_bytes]);
    }

    RasterSurface::new(rect.width, rect.height, output)
}

/// Crop `surface` to a selection drawn against a display of `display` size.
#[tracing::instrument(
    skip_all,
    fields(width = surface.width(), height = surface.height())
)]
pub fn apply_crop(
    surface: &RasterSurface,
    display: DisplaySize,
    selection: Rect,
) -> Result<RasterSurface, EngineError> {
    let rect = map_selection(surface.width(), surface.height(), display, selection)?;
    tracing::debug!(?selection, ?rect, "mapped crop selection");
    extract(surface, rect)
}

/// Crop `surface` to a selection given in normalized (0.0 to 1.0) coordinates.
pub fn apply_normalized_crop(
    surface: &RasterSurface,
    selection: Rect,
) -> Result<RasterSurface, EngineError> {
    apply_crop(surface, DisplaySize::normalized(), selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> RasterSurface {
        RasterSurface::from_fn(width, height, |x, y| {
            let v = ((y * width + x) % 256) as u8;
            [v, v, v, 255]
        })
        .unwrap()
    }

    #[test]
    fn test_scaled_selection_mapping() {
        let rect = map_selection(
            200,
            100,
            DisplaySize::new(100.0, 50.0),
            Rect::new(10.0, 10.0, 40.0, 20.0),
        )
        .unwrap();
        assert_eq!(rect, PixelRect::new(20, 20, 80, 40));
    }

    #[test]
    fn test_scaled_crop_output() {
        let img = test_image(200, 100);
        let result = apply_crop(
            &img,
            DisplaySize::new(100.0, 50.0),
            Rect::new(10.0, 10.0, 40.0, 20.0),
        )
        .unwrap();
        assert_eq!(result.dimensions(), (80, 40));
        assert_eq!(result.pixel(0, 0), img.pixel(20, 20));
        assert_eq!(result.pixel(79, 39), img.pixel(99, 59));
    }

    #[test]
    fn test_identity_display_scale() {
        let rect = map_selection(
            64,
            48,
            DisplaySize::new(64.0, 48.0),
            Rect::new(5.0, 6.0, 20.0, 10.0),
        )
        .unwrap();
        assert_eq!(rect, PixelRect::new(5, 6, 20, 10));
    }

    #[test]
    fn test_fractional_coordinates_round() {
        // Scale 1.5: 3.3 * 1.5 = 4.95 -> 5, 10.1 * 1.5 = 15.15 -> 15
        let rect = map_selection(
            150,
            150,
            DisplaySize::new(100.0, 100.0),
            Rect::new(3.3, 3.3, 10.1, 10.1),
        )
        .unwrap();
        assert_eq!(rect, PixelRect::new(5, 5, 15, 15));
    }

    #[test]
    fn test_selection_clamped_to_bounds() {
        let img = test_image(10, 10);
        let result = apply_crop(
            &img,
            DisplaySize::of(&img),
            Rect::new(8.0, 7.0, 5.0, 5.0),
        )
        .unwrap();
        assert_eq!(result.dimensions(), (2, 3));
        assert_eq!(result.pixel(0, 0), img.pixel(8, 7));
    }

    #[test]
    fn test_negative_origin_clamped() {
        let img = test_image(10, 10);
        let result = apply_crop(
            &img,
            DisplaySize::of(&img),
            Rect::new(-3.0, -2.0, 6.0, 5.0),
        )
        .unwrap();
        assert_eq!(result.dimensions(), (3, 3));
        assert_eq!(result.pixel(0, 0), img.pixel(0, 0));
    }

    #[test]
    fn test_selection_outside_source_is_invalid() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, DisplaySize::of(&img), Rect::new(10.0, 0.0, 5.0, 5.0));
        assert!(matches!(result, Err(EngineError::InvalidSelection(_))));

        let result = apply_crop(&img, DisplaySize::of(&img), Rect::new(-8.0, 0.0, 5.0, 5.0));
        assert!(matches!(result, Err(EngineError::InvalidSelection(_))));
    }

    #[test]
    fn test_tiny_selection_rounds_to_nothing() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, DisplaySize::of(&img), Rect::new(2.0, 2.0, 0.2, 0.2));
        assert!(matches!(result, Err(EngineError::InvalidSelection(_))));
    }

    #[test]
    fn test_degenerate_selection_is_invalid() {
        let img = test_image(10, 10);
        for rect in [
            Rect::new(0.0, 0.0, 0.0, 5.0),
            Rect::new(0.0, 0.0, 5.0, -1.0),
            Rect::new(f64::NAN, 0.0, 5.0, 5.0),
        ] {
            let result = apply_crop(&img, DisplaySize::of(&img), rect);
            assert!(matches!(result, Err(EngineError::InvalidSelection(_))), "{:?}", rect);
        }
    }

    #[test]
    fn test_invalid_display_size() {
        let img = test_image(10, 10);
        for display in [
            DisplaySize::new(0.0, 10.0),
            DisplaySize::new(10.0, -1.0),
            DisplaySize::new(f64::INFINITY, 10.0),
        ] {
            let result = apply_crop(&img, display, Rect::new(0.0, 0.0, 5.0, 5.0));
            assert!(matches!(result, Err(EngineError::InvalidDimensions { .. })));
        }
    }

    #[test]
    fn test_normalized_crop() {
        let img = test_image(100, 100);
        // The crop widget's default: 25% inset, 50% size
        let result = apply_normalized_crop(&img, Rect::new(0.25, 0.25, 0.5, 0.5)).unwrap();
        assert_eq!(result.dimensions(), (50, 50));
        assert_eq!(result.pixel(0, 0), img.pixel(25, 25));
    }

    #[test]
    fn test_full_crop_copies_everything() {
        let img = test_image(20, 15);
        let result = apply_normalized_crop(&img, Rect::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_extract_rejects_out_of_bounds() {
        let img = test_image(10, 10);
        assert!(extract(&img, PixelRect::new(5, 5, 6, 1)).is_err());
        assert!(extract(&img, PixelRect::new(0, 0, 0, 1)).is_err());
        assert!(extract(&img, PixelRect::new(9, 9, 1, 1)).is_ok());
    }

    #[test]
    fn test_crop_preserves_alpha() {
        let img = RasterSurface::from_fn(6, 6, |x, y| [1, 2, 3, (x * 10 + y) as u8]).unwrap();
        let result = apply_crop(&img, DisplaySize::of(&img), Rect::new(2.0, 1.0, 3.0, 4.0)).unwrap();
        assert_eq!(result.pixel(2, 3), Some([1, 2, 3, 44]));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
