//! Constants used throughout the application

/// Eye aperture ratio below this value counts as a closed eye
pub const DEFAULT_EAR_THRESHOLD: f64 = 0.25;

/// Consecutive closed frames a closure must exceed to count as a gesture
pub const DEFAULT_BLINK_CONSEC_FRAMES: u32 = 2;

/// Two both-eyes blinks inside this window toggle the input mode (seconds)
pub const DEFAULT_DOUBLE_BLINK_WINDOW_SECS: f64 = 1.0;

/// Vertical head travel required to emit one scroll tick (pixels)
pub const DEFAULT_SCROLL_DIFF_THRESHOLD: f64 = 5.0;

/// Sink scroll units emitted per tick
pub const DEFAULT_SCROLL_UNIT: i32 = 50;

/// Cursor sensitivity gain
pub const DEFAULT_SENSITIVITY: f64 = 3.0;

/// Fixed multiplier applied on top of the sensitivity gain
pub const CURSOR_SCALE_FACTOR: f64 = 5.0;

/// Moving-average window for cursor smoothing
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Continuous hover time required to select a key (seconds)
pub const DEFAULT_DWELL_SECS: f64 = 1.0;

/// Overlay polling cadence (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Fallback screen dimensions when no display server reports them
pub const DEFAULT_SCREEN_WIDTH: f64 = 1920.0;
pub const DEFAULT_SCREEN_HEIGHT: f64 = 1080.0;

/// Height of the on-screen keyboard overlay (pixels)
pub const DEFAULT_KEYBOARD_HEIGHT: f64 = 300.0;

/// FaceMesh contour indices used for the left eye aperture
pub const LEFT_EYE_INDICES: [usize; 6] = [33, 160, 158, 133, 153, 144];

/// FaceMesh contour indices used for the right eye aperture
pub const RIGHT_EYE_INDICES: [usize; 6] = [362, 385, 387, 263, 373, 380];

/// FaceMesh index of the nose tip, the head-reference point
pub const NOSE_TIP_INDEX: usize = 1;
