//! Safe lifecycle operations over a [`FrameRegistry`].
//!
//! These functions implement the ownership protocol; the [`crate::ffi`]
//! module is a thin C-ABI shim over them using the process-wide registry.
//!
//! Every successful [`create_frame`] or [`create_processed_frame`] returns
//! a handle the caller must eventually pass to [`release_frame`] exactly
//! once. Reading operations ([`frame_dimensions`], [`copy_frame_data`])
//! never affect liveness.

use crate::registry::{FrameHandle, FrameRegistry};
use edgeview_core::{PixelBuffer, PixelFormat};
use edgeview_ops::OpsError;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors crossing out of the lifecycle operations.
///
/// The C ABI collapses all of these to sentinel returns; embedders using
/// the safe API get the full taxonomy.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Handle is null, released, or was never issued by the registry.
    #[error("invalid frame handle {handle}: not a live frame")]
    InvalidHandle {
        /// The offending handle.
        handle: FrameHandle,
    },

    /// Caller-supplied pixel data doesn't match the stated geometry.
    #[error("buffer size mismatch: expected {expected} bytes, got {got}")]
    BufferSize {
        /// Byte count implied by width, height, and format.
        expected: usize,
        /// Byte count actually supplied.
        got: usize,
    },

    /// The transform pipeline rejected the frame.
    #[error(transparent)]
    Ops(#[from] OpsError),
}

/// Result type for lifecycle operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Imports caller pixel data as a new live RGBA frame.
///
/// The data is copied; the caller keeps ownership of its own storage and
/// acquires the obligation to release the returned handle.
///
/// # Errors
///
/// Returns [`BridgeError::BufferSize`] if `data.len()` is not
/// `width * height * 4`, or [`BridgeError::Ops`] for zero-area dimensions.
pub fn create_frame(
    registry: &FrameRegistry,
    width: u32,
    height: u32,
    data: &[u8],
) -> BridgeResult<FrameHandle> {
    let expected = PixelFormat::Rgba.row_stride(width) * height as usize;
    if expected != 0 && data.len() != expected {
        return Err(BridgeError::BufferSize {
            expected,
            got: data.len(),
        });
    }
    let frame = PixelBuffer::from_data(width, height, PixelFormat::Rgba, data.to_vec())
        .map_err(OpsError::from)?;
    let handle = registry.insert(frame);
    debug!(%handle, width, height, "frame imported");
    Ok(handle)
}

/// Runs the transform pipeline on the frame named by `input` and registers
/// the result as a new live frame.
///
/// The input frame is read without transferring ownership and is never
/// released by this operation; on success the caller owes one release for
/// `input` and one for the returned handle.
///
/// The input's pixels are copied out under the registry lock and the
/// transform runs outside it, so independent frames process in parallel
/// and a concurrent release of `input` cannot invalidate the read.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidHandle`] if `input` is null or not live,
/// or [`BridgeError::Ops`] if the frame violates the pipeline's 4-channel
/// precondition.
pub fn create_processed_frame(
    registry: &FrameRegistry,
    input: FrameHandle,
) -> BridgeResult<FrameHandle> {
    let frame = registry
        .clone_frame(input)
        .ok_or(BridgeError::InvalidHandle { handle: input })?;

    debug!(%input, width = frame.width(), height = frame.height(), "processing frame");
    let output = edgeview_ops::process(&frame)?;

    let handle = registry.insert(output);
    debug!(%input, %handle, "processed frame ready");
    Ok(handle)
}

/// Releases the frame named by `handle`, deallocating its buffer.
///
/// Releasing [`FrameHandle::NULL`] is an explicit no-op: "nothing to
/// release" is a valid outcome, not an error. Releasing a dead or unknown
/// handle is a protocol violation the registry detects and reports.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidHandle`] for a non-null handle that names
/// no live frame (double release, or a handle never issued).
pub fn release_frame(registry: &FrameRegistry, handle: FrameHandle) -> BridgeResult<()> {
    if handle.is_null() {
        return Ok(());
    }
    match registry.remove(handle) {
        Some(frame) => {
            debug!(%handle, bytes = frame.len(), "frame released");
            Ok(())
        }
        None => {
            warn!(%handle, "release of dead or never-issued frame handle");
            Err(BridgeError::InvalidHandle { handle })
        }
    }
}

/// Returns the dimensions of a live frame, or `None` if `handle` is dead.
pub fn frame_dimensions(registry: &FrameRegistry, handle: FrameHandle) -> Option<(u32, u32)> {
    registry.with_frame(handle, |f| f.dimensions())
}

/// Copies a live frame's pixels into `dst` for display.
///
/// Ownership is unaffected; the frame stays live until released.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidHandle`] if `handle` is not live, or
/// [`BridgeError::BufferSize`] if `dst` doesn't match the frame's byte
/// length exactly.
pub fn copy_frame_data(
    registry: &FrameRegistry,
    handle: FrameHandle,
    dst: &mut [u8],
) -> BridgeResult<()> {
    registry
        .with_frame(handle, |f| {
            if dst.len() != f.len() {
                return Err(BridgeError::BufferSize {
                    expected: f.len(),
                    got: dst.len(),
                });
            }
            dst.copy_from_slice(f.data());
            Ok(())
        })
        .ok_or(BridgeError::InvalidHandle { handle })?
}
