//! Top-level gesture translation application.
//!
//! Owns the input mode and every gesture state machine, and drives the
//! sequential frame-processing loop: pull a frame, derive eye apertures,
//! advance the blink, mode-switch and scroll machines, dispatch click and
//! scroll commands, map the cursor and publish the shared pair for the
//! overlay polling loop.

use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use log::{debug, info, warn};

use crate::blink::BlinkDetector;
use crate::config::Config;
use crate::cursor::CursorMapper;
use crate::eye_metrics::{aperture_ratio, EyeClosure};
use crate::landmarks::LandmarkFrame;
use crate::mode_switch::{Mode, ModeSwitchDetector};
use crate::overlay::{OverlayPoller, WidgetGeometry};
use crate::scroll::DragScrollEngine;
use crate::shared_state::SharedState;
use crate::sink::{InputSink, MouseButton};
use crate::Result;

/// Upstream landmark detector boundary.
///
/// `next_frame` returns `None` when the stream ends, `Some(None)` for a
/// frame with no detected face, and `Some(Some(frame))` otherwise. The
/// application tolerates faceless frames indefinitely.
pub trait LandmarkSource {
    fn next_frame(&mut self) -> Option<Option<LandmarkFrame>>;
}

/// Externally issued control signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// Re-zero the cursor mapping at the current head position.
    Recalibrate,
    /// Stop both loops and exit.
    Quit,
}

/// Everything one processed frame produced, for observability and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameEvents {
    /// Clicks dispatched this frame.
    pub clicks: Vec<MouseButton>,
    /// Scroll amount dispatched this frame.
    pub scroll: Option<i32>,
    /// The input mode toggled this frame.
    pub mode_toggled: bool,
    /// Smoothed cursor position emitted this frame.
    pub cursor: Option<(f64, f64)>,
}

/// The gesture-to-input translation engine.
pub struct GestureApp<S: InputSink> {
    config: Config,
    mode: Mode,
    blinks: BlinkDetector,
    mode_switch: ModeSwitchDetector,
    scroll: DragScrollEngine,
    cursor: CursorMapper,
    shared: SharedState,
    sink: Arc<Mutex<S>>,
    pending_recalibrate: bool,
}

impl<S: InputSink + 'static> GestureApp<S> {
    /// Build the engine for the given screen dimensions.
    #[must_use]
    pub fn new(config: Config, sink: S, screen: (f64, f64)) -> Self {
        let cursor = CursorMapper::new(
            screen.0,
            screen.1,
            config.cursor.sensitivity,
            config.cursor.smoothing_window,
        );
        let blinks = BlinkDetector::new(config.gesture.blink_consec_frames);
        let mode_switch = ModeSwitchDetector::new(config.double_blink_window());
        let scroll = DragScrollEngine::new(config.scroll.diff_threshold);

        Self {
            config,
            mode: Mode::default(),
            blinks,
            mode_switch,
            scroll,
            cursor,
            shared: SharedState::new(),
            sink: Arc::new(Mutex::new(sink)),
            pending_recalibrate: false,
        }
    }

    /// Current input mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Handle to the state shared with the overlay polling loop.
    #[must_use]
    pub fn shared_state(&self) -> SharedState {
        self.shared.clone()
    }

    /// Handle to the sink shared between both loops.
    #[must_use]
    pub fn sink(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.sink)
    }

    /// Apply a control signal. `Quit` is handled by the run loop itself.
    pub fn handle_signal(&mut self, signal: ControlSignal) {
        match signal {
            ControlSignal::Recalibrate => {
                // Applied on the next frame with a face.
                self.pending_recalibrate = true;
            }
            ControlSignal::Quit => {}
        }
    }

    /// Process one frame at time `now`.
    ///
    /// `frame` is `None` when no face was detected: an idle frame on which
    /// the cursor holds still and no event fires. A frame with unreliable
    /// eye geometry is skipped the same way.
    pub fn process_frame(&mut self, frame: Option<&LandmarkFrame>, now: Instant) -> FrameEvents {
        let mut events = FrameEvents::default();

        let Some(frame) = frame else {
            return events;
        };

        let (left_contour, right_contour, nose) =
            match (frame.left_eye(), frame.right_eye(), frame.nose_tip()) {
                (Ok(l), Ok(r), Ok(n)) => (l, r, n),
                (l, r, n) => {
                    let e = l.err().or(r.err()).or(n.err()).map(|e| e.to_string());
                    debug!("skipping malformed frame: {}", e.unwrap_or_default());
                    return events;
                }
            };

        let (ear_left, ear_right) =
            match (aperture_ratio(&left_contour), aperture_ratio(&right_contour)) {
                (Ok(l), Ok(r)) => (l, r),
                _ => {
                    debug!("no reliable aperture reading, skipping gesture evaluation");
                    return events;
                }
            };

        let head = (f64::from(nose.x), f64::from(nose.y));

        if self.pending_recalibrate {
            self.cursor.recalibrate(head);
            self.pending_recalibrate = false;
            info!("calibration center reset to ({:.0}, {:.0})", head.0, head.1);
        }

        let closure =
            EyeClosure::from_apertures(ear_left, ear_right, self.config.gesture.ear_threshold);
        let both_closed = closure.both();

        // The blink detector and the mode-switch registration both see the
        // scroll session state as it was entering this frame.
        let scroll_was_active = self.scroll.is_active();
        let blink = self.blinks.update(closure, scroll_was_active);

        if let Some(period) = blink.both_blink {
            debug!("both-eyes closure ended after {period} frames");
            if self.mode_switch.register_blink(now) {
                self.mode = self.mode.toggled();
                events.mode_toggled = true;
                info!("double blink detected, mode switched to {}", self.mode.as_str());
            }
        }

        let tick = if self.mode.is_pointer() {
            self.scroll.update(both_closed, head.1)
        } else {
            self.scroll.reset();
            None
        };
        if let Some(tick) = tick {
            let amount = tick.direction() * self.config.scroll.scroll_unit;
            events.scroll = Some(amount);
            self.dispatch("scroll", |sink| sink.scroll(amount));
        }

        if self.mode.is_pointer() {
            if blink.left_wink.is_some() {
                events.clicks.push(MouseButton::Left);
                info!("left wink click");
                self.dispatch("click", |sink| sink.click(MouseButton::Left));
            }
            if blink.right_wink.is_some() {
                events.clicks.push(MouseButton::Right);
                info!("right wink click");
                self.dispatch("click", |sink| sink.click(MouseButton::Right));
            }
        }

        let position = self.cursor.map(head.0, head.1);
        events.cursor = Some(position);
        self.dispatch("cursor move", |sink| sink.move_cursor(position.0, position.1));
        self.shared.publish(position, self.mode.is_text_entry());

        events
    }

    /// Run the frame loop to completion, with the overlay polling loop on
    /// its own thread.
    ///
    /// Returns when the source ends or a `Quit` signal arrives; the
    /// overlay loop is stopped and joined before returning.
    pub fn run<G: WidgetGeometry + 'static>(
        &mut self,
        source: &mut dyn LandmarkSource,
        signals: &Receiver<ControlSignal>,
        geometry: G,
    ) -> Result<()> {
        info!("starting frame-processing loop");

        let poller = OverlayPoller::new(
            geometry,
            self.config.dwell_threshold(),
            self.config.poll_interval(),
            self.shared.clone(),
            Arc::clone(&self.sink),
        );
        let overlay_handle = poller.spawn()?;

        'frames: while let Some(frame) = source.next_frame() {
            for signal in signals.try_iter() {
                if signal == ControlSignal::Quit {
                    info!("quit signal received");
                    break 'frames;
                }
                self.handle_signal(signal);
            }

            self.process_frame(frame.as_ref(), Instant::now());
        }

        self.shared.request_stop();
        if overlay_handle.join().is_err() {
            warn!("overlay polling thread panicked during shutdown");
        }

        info!("frame-processing loop finished");
        Ok(())
    }

    fn dispatch(&self, what: &str, command: impl FnOnce(&mut S) -> Result<()>) {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = command(&mut sink) {
            // The sink is fire-and-forget: a refused command must never
            // disturb the gesture state machines.
            warn!("{what} command dropped: {e}");
        }
    }
}
