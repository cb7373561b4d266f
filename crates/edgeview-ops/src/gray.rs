//! Color reduction and expansion stages.
//!
//! Two per-pixel maps with no neighborhood access:
//!
//! - [`rgba_to_gray`] collapses interleaved RGBA to ITU-R BT.601 luminance.
//! - [`gray_to_rgba`] replicates a single-channel map into displayable RGBA
//!   with full opacity.
//!
//! Both allocate a fresh output buffer and never touch the input. Luminance
//! uses 16-bit fixed-point weights so the rounding is exact on every
//! platform.

use crate::{OpsError, OpsResult};
use edgeview_core::{PixelBuffer, PixelFormat};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// BT.601 luminance weight for red, as a 16-bit fixed-point fraction.
pub const BT601_LUMA_R: u32 = 19595;
/// BT.601 luminance weight for green, as a 16-bit fixed-point fraction.
pub const BT601_LUMA_G: u32 = 38470;
/// BT.601 luminance weight for blue, as a 16-bit fixed-point fraction.
pub const BT601_LUMA_B: u32 = 7471;

/// Weighted BT.601 luminance of one 8-bit RGB triple, rounded to nearest.
#[inline]
pub fn luminance_bt601(r: u8, g: u8, b: u8) -> u8 {
    let y = BT601_LUMA_R * r as u32 + BT601_LUMA_G * g as u32 + BT601_LUMA_B * b as u32;
    ((y + (1 << 15)) >> 16) as u8
}

fn expect_format(buf: &PixelBuffer, expected: PixelFormat) -> OpsResult<()> {
    if buf.format() != expected {
        return Err(OpsError::ChannelMismatch {
            expected,
            got: buf.format(),
        });
    }
    Ok(())
}

#[inline]
fn gray_row(src: &[u8], dst: &mut [u8]) {
    for (px, out) in src.chunks_exact(4).zip(dst.iter_mut()) {
        *out = luminance_bt601(px[0], px[1], px[2]);
    }
}

#[inline]
fn expand_row(src: &[u8], dst: &mut [u8]) {
    for (&v, out) in src.iter().zip(dst.chunks_exact_mut(4)) {
        out[0] = v;
        out[1] = v;
        out[2] = v;
        out[3] = 255;
    }
}

/// Converts a 4-channel RGBA buffer to single-channel luminance.
///
/// Alpha is ignored. The output has the same dimensions as the input.
///
/// # Errors
///
/// Returns [`OpsError::ChannelMismatch`] unless the input is
/// [`PixelFormat::Rgba`].
///
/// # Example
///
/// ```rust
/// use edgeview_core::{PixelBuffer, PixelFormat};
/// use edgeview_ops::gray::rgba_to_gray;
///
/// let white = PixelBuffer::filled(8, 8, PixelFormat::Rgba, &[255, 255, 255, 255]).unwrap();
/// let gray = rgba_to_gray(&white).unwrap();
/// assert_eq!(gray.format(), PixelFormat::Gray);
/// assert_eq!(gray.pixel(0, 0), &[255]);
/// ```
pub fn rgba_to_gray(input: &PixelBuffer) -> OpsResult<PixelBuffer> {
    expect_format(input, PixelFormat::Rgba)?;
    let (width, height) = input.dimensions();
    let mut out = PixelBuffer::new(width, height, PixelFormat::Gray)?;

    let src_stride = input.stride();
    let dst_stride = out.stride();

    #[cfg(feature = "parallel")]
    input
        .data()
        .par_chunks_exact(src_stride)
        .zip(out.data_mut().par_chunks_exact_mut(dst_stride))
        .for_each(|(src, dst)| gray_row(src, dst));

    #[cfg(not(feature = "parallel"))]
    input
        .data()
        .chunks_exact(src_stride)
        .zip(out.data_mut().chunks_exact_mut(dst_stride))
        .for_each(|(src, dst)| gray_row(src, dst));

    Ok(out)
}

/// Expands a single-channel buffer into displayable RGBA.
///
/// Each of R, G, B takes the source value; alpha is set to full opacity.
///
/// # Errors
///
/// Returns [`OpsError::ChannelMismatch`] unless the input is
/// [`PixelFormat::Gray`].
pub fn gray_to_rgba(input: &PixelBuffer) -> OpsResult<PixelBuffer> {
    expect_format(input, PixelFormat::Gray)?;
    let (width, height) = input.dimensions();
    let mut out = PixelBuffer::new(width, height, PixelFormat::Rgba)?;

    let src_stride = input.stride();
    let dst_stride = out.stride();

    #[cfg(feature = "parallel")]
    input
        .data()
        .par_chunks_exact(src_stride)
        .zip(out.data_mut().par_chunks_exact_mut(dst_stride))
        .for_each(|(src, dst)| expand_row(src, dst));

    #[cfg(not(feature = "parallel"))]
    input
        .data()
        .chunks_exact(src_stride)
        .zip(out.data_mut().chunks_exact_mut(dst_stride))
        .for_each(|(src, dst)| expand_row(src, dst));

    Ok(out)
}
