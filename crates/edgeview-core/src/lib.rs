//! # edgeview-core
//!
//! Core types for the edgeview frame bridge.
//!
//! This crate provides the foundational types used throughout the edgeview
//! workspace:
//!
//! - [`PixelBuffer`] - Owned 8-bit raster image buffer
//! - [`PixelFormat`] - Runtime pixel format tag (grayscale or RGBA)
//! - [`Error`] - Buffer construction and access errors
//!
//! ## Design Philosophy
//!
//! Buffers in this workspace cross a language boundary as opaque integer
//! handles, so pixel format is a **runtime** property rather than a type
//! parameter, and every buffer is **exclusively owned**: a `PixelBuffer`
//! holds its own heap allocation and is never shared between two live
//! handles. The handle protocol built on top of these types lives in
//! `edgeview-bridge`.
//!
//! ## Crate Structure
//!
//! This crate is the foundation of the workspace and has no internal
//! dependencies:
//!
//! ```text
//! edgeview-core (this crate)
//!    ^
//!    |
//!    +-- edgeview-ops    (pixel pipeline)
//!    +-- edgeview-bridge (handle lifecycle, C ABI)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;

// Re-exports for convenience
pub use buffer::{PixelBuffer, PixelFormat};
pub use error::{Error, Result};
