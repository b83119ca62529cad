//! Hands-free pointer and on-screen keyboard control driven by facial
//! landmarks.
//!
//! This library translates a live stream of face-mesh landmark positions
//! into discrete input events:
//! - Winks click: a debounced left-eye closure clicks the left button, a
//!   right-eye closure the right button.
//! - Holding both eyes closed and moving the head vertically scrolls.
//! - Two quick both-eyes blinks toggle between pointer control and
//!   text-entry on the virtual keyboard.
//! - Head motion steers an absolute, moving-average-smoothed cursor.
//! - In text-entry mode, hovering a key for a dwell period selects it.
//!
//! Landmark detection, camera capture and overlay rendering are external
//! collaborators behind the [`app::LandmarkSource`], [`sink::InputSink`]
//! and [`overlay::WidgetGeometry`] traits.
//!
//! # Examples
//!
//! ## Blink detection
//!
//! ```
//! use face_gesture_control::blink::BlinkDetector;
//! use face_gesture_control::eye_metrics::EyeClosure;
//!
//! let mut detector = BlinkDetector::new(2);
//!
//! // Three frames with only the left eye closed, then one open frame.
//! for _ in 0..3 {
//!     let frame = detector.update(EyeClosure { left: true, right: false }, false);
//!     assert!(frame.is_quiet());
//! }
//! let frame = detector.update(EyeClosure::default(), false);
//! assert_eq!(frame.left_wink, Some(3));
//! ```
//!
//! ## Cursor mapping
//!
//! ```
//! use face_gesture_control::cursor::CursorMapper;
//!
//! let mut mapper = CursorMapper::new(1920.0, 1080.0, 3.0, 5);
//! mapper.recalibrate((320.0, 240.0));
//!
//! // 20 px of head travel maps 300 screen pixels right of center.
//! let (x, y) = mapper.map(340.0, 240.0);
//! assert_eq!((x, y), (1260.0, 540.0));
//! ```
//!
//! ## Full pipeline
//!
//! ```no_run
//! use std::sync::mpsc;
//! use face_gesture_control::app::{ControlSignal, GestureApp, LandmarkSource};
//! use face_gesture_control::config::Config;
//! use face_gesture_control::landmarks::LandmarkFrame;
//! use face_gesture_control::overlay::ScreenKeyboard;
//! use face_gesture_control::sink::NullSink;
//!
//! struct Detector;
//!
//! impl LandmarkSource for Detector {
//!     fn next_frame(&mut self) -> Option<Option<LandmarkFrame>> {
//!         // Pull one frame from the upstream face-mesh detector here.
//!         None
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let keyboard = ScreenKeyboard::bottom_of_screen(1920.0, 1080.0, 300.0);
//! let mut app = GestureApp::new(config, NullSink, (1920.0, 1080.0));
//!
//! let (_signal_tx, signal_rx) = mpsc::channel::<ControlSignal>();
//! app.run(&mut Detector, &signal_rx, keyboard)?;
//! # Ok(())
//! # }
//! ```

/// Landmark frame type and fixed-index facial feature accessors
pub mod landmarks;

/// Eye-aperture ratio computation and closed-state thresholding
pub mod eye_metrics;

/// Debounced blink detection state machines
pub mod blink;

/// Double-blink input mode switching
pub mod mode_switch;

/// Drag-scroll engine for closed-eyes head scrolling
pub mod scroll;

/// Cursor mapping and moving-average smoothing
pub mod cursor;

/// Dwell-based key selection
pub mod dwell;

/// Virtual keyboard layout model
pub mod keyboard;

/// Input sink boundary and built-in sinks
pub mod sink;

/// X11 input sink backed by the XTEST extension
pub mod x11_sink;

/// State shared between the frame loop and the overlay polling loop
pub mod shared_state;

/// Overlay polling loop and widget geometry boundary
pub mod overlay;

/// Top-level gesture translation application
pub mod app;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
