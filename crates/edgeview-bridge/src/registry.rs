//! The frame liveness registry.
//!
//! Maps opaque handle tokens to live [`PixelBuffer`]s. Handles are issued
//! from a monotonic counter and never reused within a process lifetime, so
//! a released handle can never accidentally name a newer buffer.
//!
//! The table is guarded by a single mutex; calls may arrive from different
//! caller threads (a capture thread and a cleanup thread, typically). The
//! lock is held only for map operations, never across a pipeline run.

use edgeview_core::PixelBuffer;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};
use tracing::debug;

/// Opaque token naming a live frame in a [`FrameRegistry`].
///
/// The zero value ([`FrameHandle::NULL`]) never names a live buffer. A
/// non-zero handle names exactly one buffer from the moment it is issued
/// until it is released exactly once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// The null handle: never live, always legal to release (as a no-op).
    pub const NULL: FrameHandle = FrameHandle(0);

    /// Reconstructs a handle from its raw token value.
    ///
    /// This does not validate liveness; it only restores the token a caller
    /// previously received from the boundary.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        FrameHandle(raw)
    }

    /// Returns the raw token value passed across the boundary.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns `true` for the null handle.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct RegistryInner {
    frames: HashMap<u64, PixelBuffer>,
    next_id: u64,
}

/// Liveness table mapping handles to owned frame buffers.
///
/// The registry owns every buffer it holds. Ownership transfers exactly
/// twice per frame: in at [`insert`](Self::insert), out at
/// [`remove`](Self::remove). Readers ([`with_frame`](Self::with_frame),
/// [`clone_frame`](Self::clone_frame)) never take ownership.
///
/// The C ABI operates on the process-wide instance returned by
/// [`registry()`]; tests and embedders can hold their own.
pub struct FrameRegistry {
    inner: Mutex<RegistryInner>,
}

impl FrameRegistry {
    /// Creates an empty registry. Ids start at 1; 0 is reserved for
    /// [`FrameHandle::NULL`].
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                frames: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryInner> {
        // A panic can only happen outside the critical sections below, so a
        // poisoned map is still structurally sound.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes ownership of a buffer and issues a fresh live handle for it.
    ///
    /// The returned handle is non-zero and unique for the life of the
    /// process.
    pub fn insert(&self, frame: PixelBuffer) -> FrameHandle {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.frames.insert(id, frame);
        let handle = FrameHandle(id);
        debug!(%handle, "frame registered");
        handle
    }

    /// Runs `f` against the buffer named by `handle` without transferring
    /// ownership.
    ///
    /// Returns `None` if the handle is null, released, or never issued. The
    /// registry lock is held while `f` runs; keep it short.
    pub fn with_frame<R>(&self, handle: FrameHandle, f: impl FnOnce(&PixelBuffer) -> R) -> Option<R> {
        let inner = self.lock();
        inner.frames.get(&handle.0).map(f)
    }

    /// Returns a deep copy of the buffer named by `handle`, or `None` if it
    /// is not live.
    ///
    /// The copy lets long-running reads (the transform pipeline) proceed
    /// outside the registry lock, so a concurrent release of `handle` can
    /// never invalidate the read.
    pub fn clone_frame(&self, handle: FrameHandle) -> Option<PixelBuffer> {
        self.with_frame(handle, PixelBuffer::clone)
    }

    /// Removes the buffer named by `handle`, transferring ownership to the
    /// caller (usually to be dropped immediately).
    ///
    /// Returns `None` if the handle is not live - releasing twice yields
    /// `None` the second time, which the API layer reports as a protocol
    /// violation.
    pub fn remove(&self, handle: FrameHandle) -> Option<PixelBuffer> {
        let mut inner = self.lock();
        inner.frames.remove(&handle.0)
    }

    /// Returns `true` if `handle` currently names a live buffer.
    pub fn contains(&self, handle: FrameHandle) -> bool {
        let inner = self.lock();
        inner.frames.contains_key(&handle.0)
    }

    /// Returns the number of live frames.
    pub fn len(&self) -> usize {
        let inner = self.lock();
        inner.frames.len()
    }

    /// Returns `true` if no frames are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FrameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrameRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("FrameRegistry")
            .field("live", &inner.frames.len())
            .field("next_id", &inner.next_id)
            .finish()
    }
}

/// The process-wide registry backing the C ABI.
pub fn registry() -> &'static FrameRegistry {
    static REGISTRY: OnceLock<FrameRegistry> = OnceLock::new();
    REGISTRY.get_or_init(FrameRegistry::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgeview_core::PixelFormat;

    fn frame() -> PixelBuffer {
        PixelBuffer::filled(4, 4, PixelFormat::Rgba, &[1, 2, 3, 4]).unwrap()
    }

    #[test]
    fn test_insert_issues_nonzero_unique_handles() {
        let reg = FrameRegistry::new();
        let a = reg.insert(frame());
        let b = reg.insert(frame());
        assert!(!a.is_null());
        assert!(!b.is_null());
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_with_frame_reads_without_removing() {
        let reg = FrameRegistry::new();
        let h = reg.insert(frame());
        let dims = reg.with_frame(h, |f| f.dimensions());
        assert_eq!(dims, Some((4, 4)));
        assert!(reg.contains(h));
    }

    #[test]
    fn test_remove_makes_handle_dead() {
        let reg = FrameRegistry::new();
        let h = reg.insert(frame());
        assert!(reg.remove(h).is_some());
        assert!(!reg.contains(h));
        assert!(reg.with_frame(h, |_| ()).is_none());
    }

    #[test]
    fn test_double_remove_yields_none() {
        let reg = FrameRegistry::new();
        let h = reg.insert(frame());
        assert!(reg.remove(h).is_some());
        assert!(reg.remove(h).is_none());
    }

    #[test]
    fn test_handles_never_reused() {
        let reg = FrameRegistry::new();
        let a = reg.insert(frame());
        reg.remove(a);
        let b = reg.insert(frame());
        assert_ne!(a, b);
        assert!(!reg.contains(a));
    }

    #[test]
    fn test_null_handle_never_live() {
        let reg = FrameRegistry::new();
        reg.insert(frame());
        assert!(!reg.contains(FrameHandle::NULL));
        assert!(reg.remove(FrameHandle::NULL).is_none());
    }

    #[test]
    fn test_clone_frame_outlives_release() {
        let reg = FrameRegistry::new();
        let h = reg.insert(frame());
        let copy = reg.clone_frame(h).unwrap();
        reg.remove(h);
        // The copy is untouched by the release
        assert_eq!(copy.pixel(0, 0), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_concurrent_inserts_stay_unique() {
        use std::sync::Arc;
        let reg = Arc::new(FrameRegistry::new());
        let mut joins = Vec::new();
        for _ in 0..8 {
            let reg = Arc::clone(&reg);
            joins.push(std::thread::spawn(move || {
                (0..50).map(|_| reg.insert(frame()).raw()).collect::<Vec<_>>()
            }));
        }
        let mut all: Vec<u64> = joins
            .into_iter()
            .flat_map(|j| j.join().unwrap())
            .collect();
        let issued = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), issued);
        assert_eq!(reg.len(), issued);
    }
}
