//! C ABI boundary surface.
//!
//! Thin shims over [`crate::api`] using the process-wide registry. The
//! boundary contract:
//!
//! - Handles travel as plain `u64`; `0` is the failure sentinel and never
//!   names a live frame.
//! - Nothing unwinds across these functions. Every entry point catches
//!   panics and converts them, like any other failure, to its sentinel
//!   return value. A caller that sees `0` treats it as "no output
//!   produced".
//! - Every non-zero handle returned by [`edgeview_frame_create`] or
//!   [`edgeview_process_frame`] must be passed to
//!   [`edgeview_release_frame`] exactly once. Readers never affect
//!   liveness.
//!
//! Pixel format across the boundary is fixed: 8-bit interleaved RGBA,
//! row-major, no padding.

use crate::api;
use crate::registry::{registry, FrameHandle};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::slice;
use tracing::warn;

fn guarded<T>(sentinel: T, body: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(body)) {
        Ok(value) => value,
        Err(_) => {
            warn!("panic caught at boundary; returning sentinel");
            sentinel
        }
    }
}

/// Imports `width * height * 4` bytes of RGBA pixel data as a new frame.
///
/// Returns the new frame's handle, or `0` if `data` is null, `len` doesn't
/// match the geometry, or the dimensions are invalid.
///
/// # Safety
///
/// `data` must point to `len` readable bytes (or be null, which fails
/// cleanly).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn edgeview_frame_create(
    width: u32,
    height: u32,
    data: *const u8,
    len: usize,
) -> u64 {
    guarded(0, || {
        if data.is_null() {
            return 0;
        }
        let pixels = unsafe { slice::from_raw_parts(data, len) };
        match api::create_frame(registry(), width, height, pixels) {
            Ok(handle) => handle.raw(),
            Err(err) => {
                warn!(%err, "frame import rejected");
                0
            }
        }
    })
}

/// Processes the frame named by `handle` through the edge pipeline.
///
/// Returns the handle of a newly allocated output frame, or `0` if the
/// input handle is invalid or the frame is not 4-channel RGBA. The input
/// frame is never released by this call.
#[unsafe(no_mangle)]
pub extern "C" fn edgeview_process_frame(handle: u64) -> u64 {
    guarded(0, || {
        match api::create_processed_frame(registry(), FrameHandle::from_raw(handle)) {
            Ok(out) => out.raw(),
            Err(err) => {
                warn!(%err, handle, "processing rejected");
                0
            }
        }
    })
}

/// Releases the frame named by `handle`.
///
/// Passing `0` is a no-op. Releasing a handle twice, or a handle that was
/// never issued, is a caller protocol violation; it is logged and ignored
/// rather than allowed to corrupt state.
#[unsafe(no_mangle)]
pub extern "C" fn edgeview_release_frame(handle: u64) {
    guarded((), || {
        // All failures already logged by the api layer.
        let _ = api::release_frame(registry(), FrameHandle::from_raw(handle));
    })
}

/// Returns the width in pixels of a live frame, or `0` for a dead handle.
#[unsafe(no_mangle)]
pub extern "C" fn edgeview_frame_width(handle: u64) -> u32 {
    guarded(0, || {
        api::frame_dimensions(registry(), FrameHandle::from_raw(handle))
            .map(|(w, _)| w)
            .unwrap_or(0)
    })
}

/// Returns the height in pixels of a live frame, or `0` for a dead handle.
#[unsafe(no_mangle)]
pub extern "C" fn edgeview_frame_height(handle: u64) -> u32 {
    guarded(0, || {
        api::frame_dimensions(registry(), FrameHandle::from_raw(handle))
            .map(|(_, h)| h)
            .unwrap_or(0)
    })
}

/// Copies a live frame's pixels into `dst` for display.
///
/// `len` must equal the frame's full byte length
/// (`width * height * 4`). Returns `true` on success; `false` for a dead
/// handle, null `dst`, or length mismatch. Liveness is unaffected.
///
/// # Safety
///
/// `dst` must point to `len` writable bytes (or be null, which fails
/// cleanly).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn edgeview_frame_read(handle: u64, dst: *mut u8, len: usize) -> bool {
    guarded(false, || {
        if dst.is_null() {
            return false;
        }
        let out = unsafe { slice::from_raw_parts_mut(dst, len) };
        match api::copy_frame_data(registry(), FrameHandle::from_raw(handle), out) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, handle, "frame readback rejected");
                false
            }
        }
    })
}
