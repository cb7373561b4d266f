//! Pixel buffer types for the frame bridge.
//!
//! This module provides [`PixelBuffer`], the single image container used on
//! both sides of the handle protocol, and [`PixelFormat`], its runtime
//! format tag.
//!
//! # Memory Layout
//!
//! Buffers store pixels in **row-major** order, top-to-bottom, 8 bits per
//! channel, interleaved, with no row padding (`stride == width * channels`):
//!
//! ```text
//! RGBA: [R G B A R G B A ...]  <- Row 0
//!       [R G B A R G B A ...]  <- Row 1
//! Gray: [Y Y Y ...]
//! ```
//!
//! This matches the display surface's native pixel format, so an RGBA
//! buffer produced by the pipeline can be handed to the caller byte-for-byte.
//!
//! # Ownership
//!
//! A `PixelBuffer` exclusively owns its allocation. There is no copy-on-write
//! sharing: buffers that cross the boundary are owned by exactly one handle
//! at a time, and cloning a buffer is an explicit deep copy.
//!
//! # Usage
//!
//! ```rust
//! use edgeview_core::{PixelBuffer, PixelFormat};
//!
//! // A 640x480 RGBA frame, zero-initialized
//! let mut frame = PixelBuffer::new(640, 480, PixelFormat::Rgba).unwrap();
//!
//! frame.set_pixel(10, 10, &[255, 0, 0, 255]);
//! assert_eq!(frame.pixel(10, 10), &[255, 0, 0, 255]);
//! assert_eq!(frame.stride(), 640 * 4);
//! ```

use crate::error::{Error, Result};
use core::fmt;

/// Pixel format of a [`PixelBuffer`].
///
/// The bridge only deals in two formats: the display surface's native
/// 4-channel RGBA and the pipeline's intermediate single-channel grayscale.
/// Both are 8 bits per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Single-channel 8-bit luminance.
    Gray,
    /// Interleaved 8-bit R, G, B, A.
    Rgba,
}

impl PixelFormat {
    /// Returns the number of channels (bytes per pixel) for this format.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            PixelFormat::Gray => 1,
            PixelFormat::Rgba => 4,
        }
    }

    /// Returns the row stride in bytes for an image of the given width.
    #[inline]
    pub const fn row_stride(self, width: u32) -> usize {
        self.channels() * width as usize
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelFormat::Gray => write!(f, "gray"),
            PixelFormat::Rgba => write!(f, "rgba"),
        }
    }
}

/// Owned 8-bit raster image buffer.
///
/// `PixelBuffer` is the unit of ownership in the handle protocol: the
/// pipeline consumes and produces them, and the registry in
/// `edgeview-bridge` maps each live handle to exactly one buffer.
///
/// # Example
///
/// ```rust
/// use edgeview_core::{PixelBuffer, PixelFormat};
///
/// let buf = PixelBuffer::filled(4, 4, PixelFormat::Gray, &[128]).unwrap();
/// assert_eq!(buf.dimensions(), (4, 4));
/// assert_eq!(buf.channels(), 1);
/// assert!(buf.data().iter().all(|&b| b == 128));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl PixelBuffer {
    fn checked_len(width: u32, height: u32, format: PixelFormat) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                "width and height must be > 0",
            ));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(format.channels()))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
    }

    /// Creates a new zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero or
    /// the byte count overflows `usize`.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let len = Self::checked_len(width, height, format)?;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
            format,
        })
    }

    /// Creates a buffer filled with a single pixel value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for zero-area images, or
    /// [`Error::DataLength`] if `pixel.len()` doesn't match the format's
    /// channel count.
    pub fn filled(width: u32, height: u32, format: PixelFormat, pixel: &[u8]) -> Result<Self> {
        let len = Self::checked_len(width, height, format)?;
        if pixel.len() != format.channels() {
            return Err(Error::data_length(
                width,
                height,
                format,
                format.channels(),
                pixel.len(),
            ));
        }
        let mut data = Vec::with_capacity(len);
        for _ in 0..width as usize * height as usize {
            data.extend_from_slice(pixel);
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Creates a buffer from existing pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLength`] if `data.len()` doesn't equal
    /// `width * height * channels`.
    pub fn from_data(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = Self::checked_len(width, height, format)?;
        if data.len() != expected {
            return Err(Error::data_length(width, height, format, expected, data.len()));
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the number of channels per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Returns the row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.format.row_stride(self.width)
    }

    /// Returns the total buffer length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the raw pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw pixel data mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its pixel data.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns row `y` as a byte slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Returns row `y` as a mutable byte slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Returns the pixel at (x, y) as a channel slice.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let c = self.channels();
        let offset = (y as usize * self.width as usize + x as usize) * c;
        &self.data[offset..offset + c]
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds or `pixel.len()` doesn't match the
    /// channel count.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: &[u8]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let c = self.channels();
        let offset = (y as usize * self.width as usize + x as usize) * c;
        self.data[offset..offset + c].copy_from_slice(pixel);
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroed() {
        let buf = PixelBuffer::new(100, 50, PixelFormat::Rgba).unwrap();
        assert_eq!(buf.width(), 100);
        assert_eq!(buf.height(), 50);
        assert_eq!(buf.channels(), 4);
        assert_eq!(buf.len(), 100 * 50 * 4);
        assert!(buf.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_zero_area() {
        assert!(PixelBuffer::new(0, 50, PixelFormat::Gray).is_err());
        assert!(PixelBuffer::new(100, 0, PixelFormat::Rgba).is_err());
    }

    #[test]
    fn test_filled() {
        let buf = PixelBuffer::filled(10, 10, PixelFormat::Rgba, &[1, 2, 3, 4]).unwrap();
        assert_eq!(buf.pixel(0, 0), &[1, 2, 3, 4]);
        assert_eq!(buf.pixel(9, 9), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_filled_wrong_pixel_len() {
        assert!(PixelBuffer::filled(10, 10, PixelFormat::Rgba, &[1, 2]).is_err());
    }

    #[test]
    fn test_from_data() {
        let data = vec![7u8; 8 * 4 * 1];
        let buf = PixelBuffer::from_data(8, 4, PixelFormat::Gray, data).unwrap();
        assert_eq!(buf.pixel(3, 2), &[7]);
    }

    #[test]
    fn test_from_data_wrong_size() {
        let data = vec![0u8; 10];
        assert!(PixelBuffer::from_data(8, 4, PixelFormat::Gray, data).is_err());
    }

    #[test]
    fn test_set_get_pixel() {
        let mut buf = PixelBuffer::new(4, 4, PixelFormat::Rgba).unwrap();
        buf.set_pixel(2, 3, &[10, 20, 30, 40]);
        assert_eq!(buf.pixel(2, 3), &[10, 20, 30, 40]);
        assert_eq!(buf.pixel(0, 0), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_row_access() {
        let mut buf = PixelBuffer::new(3, 2, PixelFormat::Gray).unwrap();
        buf.row_mut(1).copy_from_slice(&[9, 8, 7]);
        assert_eq!(buf.row(0), &[0, 0, 0]);
        assert_eq!(buf.row(1), &[9, 8, 7]);
    }

    #[test]
    fn test_stride_matches_format() {
        let gray = PixelBuffer::new(640, 480, PixelFormat::Gray).unwrap();
        let rgba = PixelBuffer::new(640, 480, PixelFormat::Rgba).unwrap();
        assert_eq!(gray.stride(), 640);
        assert_eq!(rgba.stride(), 640 * 4);
    }

    #[test]
    fn test_clone_is_deep() {
        let buf = PixelBuffer::filled(2, 2, PixelFormat::Gray, &[5]).unwrap();
        let mut copy = buf.clone();
        copy.set_pixel(0, 0, &[99]);
        assert_eq!(buf.pixel(0, 0), &[5]);
        assert_eq!(copy.pixel(0, 0), &[99]);
    }
}
