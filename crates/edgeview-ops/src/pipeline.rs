//! The three-stage frame transform.
//!
//! Chains color reduction, edge detection, and color expansion into the
//! single operation the bridge layer runs per frame.

use crate::canny::detect_edges;
use crate::config::EdgeConfig;
use crate::gray::{gray_to_rgba, rgba_to_gray};
use crate::OpsResult;
use edgeview_core::PixelBuffer;
use tracing::debug;

/// Transforms one RGBA frame into its displayable edge map.
///
/// Equivalent to [`process_with`] using the default thresholds.
///
/// # Errors
///
/// Returns [`OpsError::ChannelMismatch`](crate::OpsError::ChannelMismatch)
/// unless the input is 4-channel RGBA.
pub fn process(input: &PixelBuffer) -> OpsResult<PixelBuffer> {
    process_with(input, &EdgeConfig::default())
}

/// Transforms one RGBA frame into its displayable edge map with explicit
/// thresholds.
///
/// Stages:
///
/// 1. RGBA to BT.601 luminance
/// 2. Sobel + non-maximum suppression + hysteresis edge detection
/// 3. Edge map back to RGBA with full opacity
///
/// The result is a newly allocated buffer with the input's dimensions;
/// the input is never mutated or aliased into the output.
///
/// # Example
///
/// ```rust
/// use edgeview_core::{PixelBuffer, PixelFormat};
/// use edgeview_ops::{process_with, EdgeConfig};
///
/// let frame = PixelBuffer::filled(32, 32, PixelFormat::Rgba, &[90, 90, 90, 255]).unwrap();
/// let out = process_with(&frame, &EdgeConfig::new(50.0, 150.0)).unwrap();
/// assert_eq!(out.format(), PixelFormat::Rgba);
/// ```
pub fn process_with(input: &PixelBuffer, config: &EdgeConfig) -> OpsResult<PixelBuffer> {
    let gray = rgba_to_gray(input)?;
    debug!(width = gray.width(), height = gray.height(), "frame reduced to luminance");
    let edges = detect_edges(&gray, config)?;
    gray_to_rgba(&edges)
}
