//! # edgeview-bridge
//!
//! The frame handle lifecycle: ownership protocol for pixel buffers
//! crossing the language boundary.
//!
//! A caller on the far side of the boundary has no compile-time notion of
//! Rust ownership, so buffers are never exposed by address. Instead every
//! live buffer is owned by the process-wide [`FrameRegistry`] and named by
//! an opaque [`FrameHandle`] token. The registry makes the two classic
//! failure modes of address-passing protocols - double release and
//! use-after-release - detectable, reportable errors instead of undefined
//! behavior.
//!
//! ## Protocol
//!
//! Per handle: `UNALLOCATED -> LIVE` (on [`create_frame`] /
//! [`create_processed_frame`]) `-> RELEASED` (terminal, on
//! [`release_frame`]). Every successful creation obligates the caller to
//! exactly one future release. Handle `0` never names a live buffer, and
//! releasing it is an explicit no-op.
//!
//! ## Layers
//!
//! - [`FrameRegistry`] - the liveness table (mutex-guarded, monotonic ids)
//! - [`api`] - the safe lifecycle operations over a registry
//! - [`ffi`] - the C ABI surface over the process-wide registry; never
//!   panics or unwinds across the boundary, failures collapse to sentinel
//!   returns
//!
//! ## Example
//!
//! ```rust
//! use edgeview_bridge::{api, FrameRegistry};
//!
//! let registry = FrameRegistry::new();
//! let pixels = vec![128u8; 16 * 16 * 4];
//! let input = api::create_frame(&registry, 16, 16, &pixels).unwrap();
//!
//! let output = api::create_processed_frame(&registry, input).unwrap();
//! assert_eq!(api::frame_dimensions(&registry, output), Some((16, 16)));
//!
//! // Caller owns both frames; each must be released exactly once.
//! api::release_frame(&registry, input).unwrap();
//! api::release_frame(&registry, output).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod ffi;
pub mod registry;

pub use api::{create_frame, create_processed_frame, release_frame, BridgeError, BridgeResult};
pub use registry::{registry, FrameHandle, FrameRegistry};
