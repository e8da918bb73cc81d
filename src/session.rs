//! Process-wide picker state and the single-flight guard around `pick`.
//!
//! Create one [`PickerSession`] at startup and share it (usually as an
//! `Arc<PickerSession>`) with everything that opens the picker. Independent
//! instances never see each other, which keeps tests isolated.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Flags describing the picker's lifecycle.
///
/// `initialized` and the in-progress flag are independent. `initialized` only flips
/// to `true` after the native layer confirms initialization; the in-progress flag is
/// only ever set through [`try_acquire`](Self::try_acquire) or [`acquire`](Self::acquire).
#[derive(Debug, Default)]
pub struct PickerSession {
    initialized: AtomicBool,
    picker_in_progress: AtomicBool,
    permissions_requested_upfront: AtomicBool,
    photo_permission_requested: AtomicBool,
}

impl PickerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Records a confirmed native initialization.
    pub fn mark_initialized(&self) {
        self.initialized.store(true, Ordering::Release);
    }

    pub fn is_picker_in_progress(&self) -> bool {
        self.picker_in_progress.load(Ordering::Acquire)
    }

    /// Atomically claims the picker. Returns `false` if a pick is already in flight.
    ///
    /// Pair every successful call with [`release`](Self::release), or use
    /// [`acquire`](Self::acquire) to get a guard that does it on drop.
    pub fn try_acquire(&self) -> bool {
        self.picker_in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Clears the in-progress flag. Releasing an idle session is a no-op.
    pub fn release(&self) {
        self.picker_in_progress.store(false, Ordering::Release);
    }

    /// Claims the picker and returns a guard that releases it when dropped.
    ///
    /// The guard covers every way out of the guarded code: early returns, `?`,
    /// panics, and a future being dropped while suspended on it.
    ///
    /// ```rust
    /// use exif_gallery::session::PickerSession;
    ///
    /// let session = PickerSession::new();
    /// {
    ///     let _guard = session.acquire().expect("idle session");
    ///     assert!(session.acquire().is_none());
    /// }
    /// assert!(session.acquire().is_some());
    /// ```
    pub fn acquire(&self) -> Option<PickGuard<'_>> {
        // Lazily built: a guard constructed on failure would release someone else's claim.
        self.try_acquire().then(|| PickGuard { session: self })
    }

    /// Set by [`ExifGallery::initialize`](crate::ExifGallery::initialize) when the
    /// caller asked for permissions during initialization.
    pub fn permissions_requested_upfront(&self) -> bool {
        self.permissions_requested_upfront.load(Ordering::Acquire)
    }

    pub fn set_permissions_requested_upfront(&self, value: bool) {
        self.permissions_requested_upfront
            .store(value, Ordering::Release);
    }

    /// Whether the native layer has already prompted for photo library access.
    ///
    /// Nothing in this crate sets it. It gives a platform bridge that drives its own
    /// permission prompt somewhere to record that, next to the rest of the picker
    /// state; it has no effect on initialization or on claiming the picker.
    pub fn photo_permission_requested(&self) -> bool {
        self.photo_permission_requested.load(Ordering::Acquire)
    }

    pub fn set_photo_permission_requested(&self, value: bool) {
        self.photo_permission_requested
            .store(value, Ordering::Release);
    }

    /// Returns every flag to its initial `false`. Meant for tests.
    pub fn reset(&self) {
        self.initialized.store(false, Ordering::Release);
        self.picker_in_progress.store(false, Ordering::Release);
        self.permissions_requested_upfront
            .store(false, Ordering::Release);
        self.photo_permission_requested
            .store(false, Ordering::Release);
    }
}

/// Holds the picker claim for one pick operation.
#[must_use = "the picker is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct PickGuard<'a> {
    session: &'a PickerSession,
}

impl Drop for PickGuard<'_> {
    fn drop(&mut self) {
        self.session.release();
        debug!("picker released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_new_session_is_idle() {
        let session = PickerSession::new();
        assert!(!session.is_initialized());
        assert!(!session.is_picker_in_progress());
        assert!(!session.permissions_requested_upfront());
        assert!(!session.photo_permission_requested());
    }

    #[test]
    fn test_second_acquire_fails_until_release() {
        let session = PickerSession::new();
        assert!(session.try_acquire());
        assert!(!session.try_acquire());
        assert!(session.is_picker_in_progress());

        session.release();
        assert!(!session.is_picker_in_progress());
        assert!(session.try_acquire());
    }

    #[test]
    fn test_release_is_idempotent() {
        let session = PickerSession::new();
        session.release();
        session.release();
        assert!(session.try_acquire());
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let session = PickerSession::new();
        let guard = session.acquire();
        assert!(guard.is_some());
        assert!(session.acquire().is_none());
        drop(guard);
        assert!(!session.is_picker_in_progress());
    }

    #[test]
    fn test_guard_releases_on_error_path() {
        fn guarded(session: &PickerSession) -> Result<(), &'static str> {
            let _guard = session.acquire().ok_or("busy")?;
            Err("validation failed")
        }

        let session = PickerSession::new();
        assert_eq!(guarded(&session), Err("validation failed"));
        assert!(!session.is_picker_in_progress());
    }

    #[test]
    fn test_guard_releases_on_panic() {
        let session = PickerSession::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = session.acquire().unwrap();
            panic!("bridge blew up");
        }));
        assert!(result.is_err());
        assert!(!session.is_picker_in_progress());
    }

    #[test]
    fn test_instances_are_independent() {
        let first = PickerSession::new();
        let second = PickerSession::new();
        assert!(first.try_acquire());
        assert!(second.try_acquire());
        first.mark_initialized();
        assert!(!second.is_initialized());
    }

    #[test]
    fn test_reset_clears_every_flag() {
        let session = PickerSession::new();
        session.mark_initialized();
        assert!(session.try_acquire());
        session.set_permissions_requested_upfront(true);
        session.set_photo_permission_requested(true);

        session.reset();
        assert!(!session.is_initialized());
        assert!(!session.is_picker_in_progress());
        assert!(!session.permissions_requested_upfront());
        assert!(!session.photo_permission_requested());
    }

    #[test]
    fn test_photo_permission_flag_is_independent_of_picker_claim() {
        let session = PickerSession::new();
        session.set_photo_permission_requested(true);
        assert!(session.photo_permission_requested());
        assert!(!session.is_initialized());

        let guard = session.acquire().expect("idle session");
        drop(guard);
        assert!(session.photo_permission_requested());
        assert!(!session.is_picker_in_progress());

        session.set_photo_permission_requested(false);
        assert!(!session.photo_permission_requested());
    }

    #[test]
    fn test_only_one_thread_acquires() {
        let session = Arc::new(PickerSession::new());
        let winners = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(std::sync::Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = Arc::clone(&session);
                let winners = Arc::clone(&winners);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    if session.try_acquire() {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
    }
}
