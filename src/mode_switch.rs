//! Double-blink input mode switching.
//!
//! Completed both-eyes blinks are collected in a sliding time window; two
//! or more inside the window toggle the input mode. This is a counting
//! detector, not an exact two-pulse timer: the sequence clears on firing,
//! so a burst of three blinks still toggles exactly once.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Current interpretation of gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Gestures drive the pointer: winks click, closed-eye head motion
    /// scrolls.
    #[default]
    Pointer,
    /// Gestures drive the on-screen keyboard: the cursor hovers keys and
    /// dwell selects them.
    TextEntry,
}

impl Mode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pointer => Self::TextEntry,
            Self::TextEntry => Self::Pointer,
        }
    }

    #[must_use]
    pub const fn is_pointer(self) -> bool {
        matches!(self, Self::Pointer)
    }

    #[must_use]
    pub const fn is_text_entry(self) -> bool {
        matches!(self, Self::TextEntry)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::TextEntry => "text-entry",
        }
    }
}

/// Sliding-window counter over completed both-eyes blink events.
#[derive(Debug)]
pub struct ModeSwitchDetector {
    window: Duration,
    sequence: VecDeque<Instant>,
}

impl ModeSwitchDetector {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            sequence: VecDeque::new(),
        }
    }

    /// Register a completed both-eyes blink ending at `now`.
    ///
    /// Prunes entries that have aged out of the window, then reports `true`
    /// when the registration completes a double blink; the window's memory
    /// is cleared on firing so a subsequent lone blink cannot retoggle.
    pub fn register_blink(&mut self, now: Instant) -> bool {
        self.sequence.push_back(now);

        while let Some(&oldest) = self.sequence.front() {
            if now.duration_since(oldest) >= self.window {
                self.sequence.pop_front();
            } else {
                break;
            }
        }

        if self.sequence.len() >= 2 {
            self.sequence.clear();
            true
        } else {
            false
        }
    }

    /// Blinks currently remembered inside the window.
    #[must_use]
    pub fn pending_blinks(&self) -> usize {
        self.sequence.len()
    }

    pub fn reset(&mut self) {
        self.sequence.clear();
    }
}
