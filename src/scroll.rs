//! Drag-scroll engine: vertical head travel converted to discrete scroll
//! ticks while both eyes are held closed.
//!
//! Each emitted tick re-anchors the reference coordinate, so scroll rate is
//! limited by head travel, not time.

/// Direction of one scroll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTick {
    Up,
    Down,
}

impl ScrollTick {
    /// Signed direction: positive scrolls up.
    #[must_use]
    pub const fn direction(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// State machine for closed-eyes drag scrolling.
#[derive(Debug)]
pub struct DragScrollEngine {
    diff_threshold: f64,
    reference_y: Option<f64>,
}

impl DragScrollEngine {
    #[must_use]
    pub const fn new(diff_threshold: f64) -> Self {
        Self {
            diff_threshold,
            reference_y: None,
        }
    }

    /// Whether a scroll session is currently active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.reference_y.is_some()
    }

    /// Advance one frame with the live both-eyes-closed state and the
    /// current head-reference vertical coordinate.
    ///
    /// The session starts on the first closed frame (anchoring only, no
    /// tick) and ends the moment the eyes reopen, with no trailing ticks.
    /// Head travel beyond the threshold emits one tick and re-anchors;
    /// head down maps to scroll up (inverted control scheme).
    pub fn update(&mut self, both_closed: bool, head_y: f64) -> Option<ScrollTick> {
        if !both_closed {
            self.reference_y = None;
            return None;
        }

        let Some(reference) = self.reference_y else {
            self.reference_y = Some(head_y);
            return None;
        };

        let diff = head_y - reference;
        if diff.abs() > self.diff_threshold {
            self.reference_y = Some(head_y);
            Some(if diff > 0.0 {
                ScrollTick::Up
            } else {
                ScrollTick::Down
            })
        } else {
            None
        }
    }

    /// End any active session without emitting.
    pub fn reset(&mut self) {
        self.reference_y = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_frame_emits_nothing() {
        let mut engine = DragScrollEngine::new(5.0);
        assert_eq!(engine.update(true, 100.0), None);
        assert!(engine.is_active());
    }

    #[test]
    fn test_head_down_scrolls_up() {
        let mut engine = DragScrollEngine::new(5.0);
        engine.update(true, 100.0);
        assert_eq!(engine.update(true, 106.0), Some(ScrollTick::Up));
    }

    #[test]
    fn test_head_up_scrolls_down() {
        let mut engine = DragScrollEngine::new(5.0);
        engine.update(true, 100.0);
        assert_eq!(engine.update(true, 94.0), Some(ScrollTick::Down));
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut engine = DragScrollEngine::new(5.0);
        engine.update(true, 100.0);
        assert_eq!(engine.update(true, 105.0), None);
        assert_eq!(engine.update(true, 95.0), None);
    }

    #[test]
    fn test_tick_reanchors_reference() {
        let mut engine = DragScrollEngine::new(5.0);
        engine.update(true, 100.0);
        assert_eq!(engine.update(true, 106.0), Some(ScrollTick::Up));
        // Holding at the new position: no further ticks.
        assert_eq!(engine.update(true, 106.0), None);
        assert_eq!(engine.update(true, 110.0), None);
        assert_eq!(engine.update(true, 112.0), Some(ScrollTick::Up));
    }

    #[test]
    fn test_reopen_ends_session_immediately() {
        let mut engine = DragScrollEngine::new(5.0);
        engine.update(true, 100.0);
        assert_eq!(engine.update(false, 150.0), None);
        assert!(!engine.is_active());

        // The next session anchors fresh; old travel is forgotten.
        assert_eq!(engine.update(true, 150.0), None);
        assert_eq!(engine.update(true, 152.0), None);
    }
}
