//! Configuration management for the face gesture control application

use crate::constants::{
    DEFAULT_BLINK_CONSEC_FRAMES, DEFAULT_DOUBLE_BLINK_WINDOW_SECS, DEFAULT_DWELL_SECS,
    DEFAULT_EAR_THRESHOLD, DEFAULT_KEYBOARD_HEIGHT, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, DEFAULT_SCROLL_DIFF_THRESHOLD,
    DEFAULT_SCROLL_UNIT, DEFAULT_SENSITIVITY, DEFAULT_SMOOTHING_WINDOW,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Blink and mode-switch gesture parameters
    pub gesture: GestureConfig,

    /// Drag-scroll parameters
    pub scroll: ScrollConfig,

    /// Cursor mapping and smoothing parameters
    pub cursor: CursorConfig,

    /// Dwell selection parameters
    pub dwell: DwellConfig,

    /// Screen and overlay geometry fallbacks
    pub screen: ScreenConfig,
}

/// Blink and mode-switch gesture parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Eye aperture ratio below which an eye counts as closed
    pub ear_threshold: f64,

    /// Consecutive closed frames a closure must exceed to be a gesture
    pub blink_consec_frames: u32,

    /// Sliding window for double-blink mode switching (seconds)
    pub double_blink_window_secs: f64,
}

/// Drag-scroll parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Vertical head travel required per scroll tick (pixels)
    pub diff_threshold: f64,

    /// Sink scroll units emitted per tick
    pub scroll_unit: i32,
}

/// Cursor mapping and smoothing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Linear sensitivity gain applied to head displacement
    pub sensitivity: f64,

    /// Moving-average window size for jitter suppression
    pub smoothing_window: usize,
}

/// Dwell selection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DwellConfig {
    /// Continuous hover time required to select a key (seconds)
    pub dwell_secs: f64,

    /// Overlay polling cadence (milliseconds)
    pub poll_interval_ms: u64,
}

/// Screen and overlay geometry fallbacks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Screen width used when no display server reports one
    pub width: f64,

    /// Screen height used when no display server reports one
    pub height: f64,

    /// Height of the keyboard overlay docked at the bottom edge
    pub keyboard_height: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            scroll: ScrollConfig::default(),
            cursor: CursorConfig::default(),
            dwell: DwellConfig::default(),
            screen: ScreenConfig::default(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            ear_threshold: DEFAULT_EAR_THRESHOLD,
            blink_consec_frames: DEFAULT_BLINK_CONSEC_FRAMES,
            double_blink_window_secs: DEFAULT_DOUBLE_BLINK_WINDOW_SECS,
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            diff_threshold: DEFAULT_SCROLL_DIFF_THRESHOLD,
            scroll_unit: DEFAULT_SCROLL_UNIT,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self {
            dwell_secs: DEFAULT_DWELL_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
            keyboard_height: DEFAULT_KEYBOARD_HEIGHT,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// The mode-switch window as a [`Duration`]
    #[must_use]
    pub fn double_blink_window(&self) -> Duration {
        Duration::from_secs_f64(self.gesture.double_blink_window_secs)
    }

    /// The dwell threshold as a [`Duration`]
    #[must_use]
    pub fn dwell_threshold(&self) -> Duration {
        Duration::from_secs_f64(self.dwell.dwell_secs)
    }

    /// The overlay polling interval as a [`Duration`]
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.dwell.poll_interval_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.gesture.ear_threshold <= 0.0 || self.gesture.ear_threshold > 1.0 {
            return Err(Error::ConfigError(
                "EAR threshold must be within (0.0, 1.0]".to_string(),
            ));
        }
        if self.gesture.blink_consec_frames == 0 {
            return Err(Error::ConfigError(
                "blink debounce must require at least one frame".to_string(),
            ));
        }
        if self.gesture.double_blink_window_secs <= 0.0 {
            return Err(Error::ConfigError(
                "double-blink window must be positive".to_string(),
            ));
        }

        if self.scroll.diff_threshold <= 0.0 {
            return Err(Error::ConfigError(
                "scroll travel threshold must be positive".to_string(),
            ));
        }
        if self.scroll.scroll_unit == 0 {
            return Err(Error::ConfigError(
                "scroll unit must be non-zero".to_string(),
            ));
        }

        if self.cursor.sensitivity <= 0.0 {
            return Err(Error::ConfigError(
                "cursor sensitivity must be positive".to_string(),
            ));
        }
        if self.cursor.smoothing_window == 0 {
            return Err(Error::ConfigError(
                "smoothing window size must be greater than 0".to_string(),
            ));
        }

        if self.dwell.dwell_secs <= 0.0 {
            return Err(Error::ConfigError(
                "dwell threshold must be positive".to_string(),
            ));
        }
        if self.dwell.poll_interval_ms == 0 {
            return Err(Error::ConfigError(
                "poll interval must be at least 1 ms".to_string(),
            ));
        }

        if self.screen.width <= 0.0 || self.screen.height <= 0.0 {
            return Err(Error::ConfigError(
                "screen dimensions must be positive".to_string(),
            ));
        }
        if self.screen.keyboard_height <= 0.0 || self.screen.keyboard_height > self.screen.height {
            return Err(Error::ConfigError(
                "keyboard height must fit within the screen".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Face Gesture Control Configuration

# Blink and mode-switch gestures
gesture:
  ear_threshold: 0.25
  blink_consec_frames: 2
  double_blink_window_secs: 1.0

# Drag scrolling (both eyes closed, head moves vertically)
scroll:
  diff_threshold: 5.0
  scroll_unit: 50

# Cursor mapping
cursor:
  sensitivity: 3.0
  smoothing_window: 5

# Dwell key selection
dwell:
  dwell_secs: 1.0
  poll_interval_ms: 50

# Screen fallbacks (used when no display server reports a size)
screen:
  width: 1920.0
  height: 1080.0
  keyboard_height: 300.0
"#;
