//! State shared between the frame-processing loop and the overlay polling
//! loop.
//!
//! Exactly two values cross the thread boundary, the mapped cursor
//! position and the overlay-visibility flag, written by the frame loop
//! and read by the poll loop as one atomic pair behind a single mutex.
//! A cooperative stop flag rides alongside; the poll loop checks it once
//! per tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// The pair of values shared across the loop boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlayShared {
    /// Mapped absolute cursor position.
    pub cursor: (f64, f64),
    /// Whether the keyboard overlay should be visible.
    pub visible: bool,
}

/// Guarded access point for [`OverlayShared`] plus the stop flag.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<OverlayShared>>,
    stop: Arc<AtomicBool>,
}

impl SharedState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish cursor position and visibility as one pair.
    pub fn publish(&self, cursor: (f64, f64), visible: bool) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = OverlayShared { cursor, visible };
    }

    /// Read the current pair.
    #[must_use]
    pub fn snapshot(&self) -> OverlayShared {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Ask the overlay loop to exit; it observes the flag within one tick.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_snapshot_pair() {
        let shared = SharedState::new();
        assert_eq!(shared.snapshot(), OverlayShared::default());

        shared.publish((100.0, 200.0), true);
        let snap = shared.snapshot();
        assert_eq!(snap.cursor, (100.0, 200.0));
        assert!(snap.visible);
    }

    #[test]
    fn test_clones_share_state() {
        let shared = SharedState::new();
        let other = shared.clone();

        shared.publish((5.0, 6.0), false);
        assert_eq!(other.snapshot().cursor, (5.0, 6.0));

        other.request_stop();
        assert!(shared.stop_requested());
    }
}
