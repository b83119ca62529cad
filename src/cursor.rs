//! Head-reference to screen-coordinate mapping with moving-average
//! smoothing.
//!
//! Displacement of the head reference from a calibration center is scaled
//! linearly onto the screen around its center, clamped to the screen
//! bounds, and low-passed through a fixed-capacity history. The filter
//! trades responsiveness for jitter suppression, with lag proportional to
//! the window size.

use std::collections::VecDeque;

use crate::constants::CURSOR_SCALE_FACTOR;

/// Maps head displacement to absolute, smoothed screen coordinates.
#[derive(Debug)]
pub struct CursorMapper {
    screen_width: f64,
    screen_height: f64,
    sensitivity: f64,
    smoothing_window: usize,
    history_x: VecDeque<f64>,
    history_y: VecDeque<f64>,
    center: Option<(f64, f64)>,
}

impl CursorMapper {
    #[must_use]
    pub fn new(
        screen_width: f64,
        screen_height: f64,
        sensitivity: f64,
        smoothing_window: usize,
    ) -> Self {
        Self {
            screen_width,
            screen_height,
            sensitivity,
            smoothing_window,
            history_x: VecDeque::with_capacity(smoothing_window),
            history_y: VecDeque::with_capacity(smoothing_window),
            center: None,
        }
    }

    /// Reset the calibration center to the given head-reference point.
    ///
    /// The smoothing history is kept, so the resulting jump is still
    /// low-passed.
    pub fn recalibrate(&mut self, center: (f64, f64)) {
        self.center = Some(center);
    }

    /// Whether a calibration center has been established.
    #[must_use]
    pub const fn is_calibrated(&self) -> bool {
        self.center.is_some()
    }

    /// Map one head-reference sample to a smoothed screen position.
    ///
    /// The first sample ever seen becomes the calibration center, placing
    /// the cursor at the screen center until recalibration or head motion.
    pub fn map(&mut self, x: f64, y: f64) -> (f64, f64) {
        let (cx, cy) = *self.center.get_or_insert((x, y));

        let dx = x - cx;
        let dy = y - cy;

        let target_x = (self.screen_width / 2.0 + dx * self.sensitivity * CURSOR_SCALE_FACTOR)
            .clamp(0.0, self.screen_width);
        let target_y = (self.screen_height / 2.0 + dy * self.sensitivity * CURSOR_SCALE_FACTOR)
            .clamp(0.0, self.screen_height);

        if self.history_x.len() >= self.smoothing_window {
            self.history_x.pop_front();
        }
        if self.history_y.len() >= self.smoothing_window {
            self.history_y.pop_front();
        }
        self.history_x.push_back(target_x);
        self.history_y.push_back(target_y);

        let avg_x = self.history_x.iter().sum::<f64>() / self.history_x.len() as f64;
        let avg_y = self.history_y.iter().sum::<f64>() / self.history_y.len() as f64;

        (avg_x, avg_y)
    }

    /// Drop all smoothing history.
    pub fn reset_history(&mut self) {
        self.history_x.clear();
        self.history_y.clear();
    }

    #[must_use]
    pub const fn screen_size(&self) -> (f64, f64) {
        (self.screen_width, self.screen_height)
    }
}
