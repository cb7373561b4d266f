//! Error types for edgeview-core operations.
//!
//! The [`Error`] enum covers the failure modes of buffer construction and
//! access. Downstream crates wrap it in their own error types
//! (`edgeview-ops::OpsError`, `edgeview-bridge::BridgeError`).

use thiserror::Error;

use crate::buffer::PixelFormat;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing or accessing pixel buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or dimensions would overflow
    /// the buffer size calculation.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Pixel data length doesn't match the buffer geometry.
    ///
    /// Returned by [`PixelBuffer::from_data`](crate::PixelBuffer::from_data)
    /// when `data.len() != width * height * channels`.
    #[error("data length {got} doesn't match {width}x{height} {format} (expected {expected})")]
    DataLength {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
        /// Pixel format of the buffer
        format: PixelFormat,
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        got: usize,
    },

    /// Buffer has the wrong pixel format for an operation.
    ///
    /// Returned when an operation requires a specific format (e.g. the
    /// pipeline entry point requires [`PixelFormat::Rgba`]).
    #[error("format mismatch: expected {expected}, got {got}")]
    FormatMismatch {
        /// Expected pixel format
        expected: PixelFormat,
        /// Actual pixel format
        got: PixelFormat,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DataLength`] error.
    #[inline]
    pub fn data_length(
        width: u32,
        height: u32,
        format: PixelFormat,
        expected: usize,
        got: usize,
    ) -> Self {
        Self::DataLength {
            width,
            height,
            format,
            expected,
            got,
        }
    }

    /// Creates an [`Error::FormatMismatch`] error.
    #[inline]
    pub fn format_mismatch(expected: PixelFormat, got: PixelFormat) -> Self {
        Self::FormatMismatch { expected, got }
    }
}
