//! # edgeview-ops
//!
//! The frame transform pipeline for the edgeview bridge.
//!
//! This crate implements the deterministic three-stage transform applied to
//! every camera frame:
//!
//! 1. [`gray::rgba_to_gray`] - 4-channel RGBA to single-channel luminance
//! 2. [`canny::detect_edges`] - gradient edge detection with hysteresis
//! 3. [`gray::gray_to_rgba`] - edge map back to displayable RGBA
//!
//! The stages are chained by [`process`], the only entry point the bridge
//! layer calls.
//!
//! # Determinism
//!
//! Every stage is deterministic: the same input buffer always produces a
//! byte-identical output buffer, with or without the `parallel` feature.
//! There is no data-dependent branching in the color stages, and the
//! hysteresis traversal in the edge stage visits pixels in a fixed order.
//!
//! # Example
//!
//! ```rust
//! use edgeview_core::{PixelBuffer, PixelFormat};
//! use edgeview_ops::process;
//!
//! let frame = PixelBuffer::filled(64, 64, PixelFormat::Rgba, &[80, 80, 80, 255]).unwrap();
//! let out = process(&frame).unwrap();
//!
//! // Uniform input has no gradients, so no edges
//! assert_eq!(out.dimensions(), frame.dimensions());
//! assert!(out.data().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - Row-parallel color and gradient passes via rayon
//!   (enabled by default)
//! - `serde` - Serialization for [`EdgeConfig`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;

pub mod canny;
pub mod config;
pub mod gray;
pub mod pipeline;

pub use config::EdgeConfig;
pub use error::{OpsError, OpsResult};
pub use pipeline::{process, process_with};
