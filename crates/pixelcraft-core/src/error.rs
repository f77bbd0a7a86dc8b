//! Error type shared by every engine operation.

use thiserror::Error;

/// Errors returned by the transform engine and its codec collaborator.
///
/// Every operation either returns a complete surface or one of these; the
/// input surface is never modified on failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Width or height (of a surface, display area or resize target) is zero,
    /// negative or not a finite number.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be positive")]
    InvalidDimensions { width: f64, height: f64 },

    /// Pixel buffer length doesn't match `width * height * 4`.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    /// Aspect ratio is zero, negative or not a finite number.
    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(f64),

    /// Crop selection has no area once mapped into source pixels.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Unit tag outside `px`, `cm`, `mm`, `inch`.
    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),

    /// Input bytes could not be turned into a surface.
    #[error("Decoding failed: {0}")]
    DecodingFailure(String),

    /// A surface could not be turned into an output artifact.
    #[error("Encoding failed: {0}")]
    EncodingFailure(String),
}

impl EngineError {
    pub(crate) fn dimensions(width: impl Into<f64>, height: impl Into<f64>) -> Self {
        EngineError::InvalidDimensions {
            width: width.into(),
            height: height.into(),
        }
    }
}
