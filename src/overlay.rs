//! Overlay polling loop: dwell selection against overlay-reported widget
//! geometry.
//!
//! Runs on its own thread at a fixed cadence, logically concurrent with
//! the frame loop. Each tick reads the shared cursor/visibility pair,
//! re-queries the widget geometry (layouts may change between polls, so
//! nothing is cached across ticks), advances the dwell selector and
//! dispatches any selected key to the input sink.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::dwell::{DwellSelector, DwellTick, KeyRect};
use crate::keyboard::{KeyPress, KeyboardLayout};
use crate::shared_state::SharedState;
use crate::sink::InputSink;

/// Overlay collaborator boundary: reports where the widget sits on screen
/// and where each key's rectangle sits inside it.
pub trait WidgetGeometry: Send {
    /// Widget top-left in screen coordinates, or None while the overlay is
    /// not yet realized.
    fn origin(&self) -> Option<(f64, f64)>;

    /// Current local rectangle for every named key.
    fn key_rects(&self) -> Vec<(String, KeyRect)>;
}

/// A keyboard layout pinned to a fixed screen position, the geometry the
/// built-in overlay reports.
#[derive(Debug, Clone)]
pub struct ScreenKeyboard {
    layout: KeyboardLayout,
    origin: (f64, f64),
}

impl ScreenKeyboard {
    #[must_use]
    pub const fn new(layout: KeyboardLayout, origin: (f64, f64)) -> Self {
        Self { layout, origin }
    }

    /// Full-width keyboard docked to the bottom edge of the screen.
    #[must_use]
    pub fn bottom_of_screen(screen_width: f64, screen_height: f64, height: f64) -> Self {
        Self {
            layout: KeyboardLayout::new(screen_width, height),
            origin: (0.0, screen_height - height),
        }
    }
}

impl WidgetGeometry for ScreenKeyboard {
    fn origin(&self) -> Option<(f64, f64)> {
        Some(self.origin)
    }

    fn key_rects(&self) -> Vec<(String, KeyRect)> {
        self.layout.key_rects()
    }
}

/// The overlay-side polling driver.
pub struct OverlayPoller<G: WidgetGeometry, S: InputSink> {
    geometry: G,
    selector: DwellSelector,
    shared: SharedState,
    sink: Arc<Mutex<S>>,
    interval: Duration,
}

impl<G: WidgetGeometry + 'static, S: InputSink + 'static> OverlayPoller<G, S> {
    #[must_use]
    pub fn new(
        geometry: G,
        dwell: Duration,
        interval: Duration,
        shared: SharedState,
        sink: Arc<Mutex<S>>,
    ) -> Self {
        Self {
            geometry,
            selector: DwellSelector::new(dwell),
            shared,
            sink,
            interval,
        }
    }

    /// One polling tick. Public so tests can drive time explicitly.
    pub fn tick(&mut self, now: Instant) -> DwellTick {
        let snapshot = self.shared.snapshot();

        if !snapshot.visible {
            // Hidden overlay: any hover episode is broken.
            self.selector.reset();
            return DwellTick::default();
        }

        let local = self
            .geometry
            .origin()
            .map(|(ox, oy)| (snapshot.cursor.0 - ox, snapshot.cursor.1 - oy));
        let rects = self.geometry.key_rects();

        let tick = self.selector.update(local, &rects, now);

        if let Some(name) = &tick.selected {
            info!("key selected by dwell: {name}");
            if let Some(press) = KeyPress::from_key_name(name) {
                let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
                if let Err(e) = sink.press_key(&press) {
                    warn!("key press dropped: {e}");
                }
            }
        } else if let Some(name) = &tick.hovered {
            debug!("hovering {name}");
        }

        tick
    }

    /// Run until a stop is requested. The flag is checked once per tick,
    /// so shutdown completes within one interval.
    pub fn run(mut self) {
        info!("overlay polling loop started");
        while !self.shared.stop_requested() {
            self.tick(Instant::now());
            thread::sleep(self.interval);
        }
        info!("overlay polling loop stopped");
    }

    /// Run on a dedicated thread.
    pub fn spawn(self) -> std::io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("overlay-poll".to_string())
            .spawn(move || self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{RecordingSink, SinkCommand};

    fn poller(
        shared: SharedState,
        sink: Arc<Mutex<RecordingSink>>,
    ) -> OverlayPoller<ScreenKeyboard, RecordingSink> {
        let keyboard = ScreenKeyboard::bottom_of_screen(1100.0, 1080.0, 300.0);
        OverlayPoller::new(
            keyboard,
            Duration::from_secs(1),
            Duration::from_millis(50),
            shared,
            sink,
        )
    }

    #[test]
    fn test_hidden_overlay_never_selects() {
        let shared = SharedState::new();
        let sink = Arc::new(Mutex::new(RecordingSink::new()));
        let mut poller = poller(shared.clone(), Arc::clone(&sink));

        shared.publish((50.0, 820.0), false);
        let t0 = Instant::now();
        for ms in [0u64, 600, 1200, 1800] {
            let tick = poller.tick(t0 + Duration::from_millis(ms));
            assert_eq!(tick, DwellTick::default());
        }
        assert!(sink.lock().unwrap().commands.is_empty());
    }

    #[test]
    fn test_dwell_presses_key() {
        let shared = SharedState::new();
        let sink = Arc::new(Mutex::new(RecordingSink::new()));
        let mut poller = poller(shared.clone(), Arc::clone(&sink));

        // Cursor over the "1" key: keyboard origin (0, 780), first key
        // rectangle spans 100x75 locally.
        shared.publish((40.0, 810.0), true);

        let t0 = Instant::now();
        poller.tick(t0);
        let tick = poller.tick(t0 + Duration::from_millis(1100));
        assert_eq!(tick.selected.as_deref(), Some("1"));

        let guard = sink.lock().unwrap();
        assert_eq!(
            guard.commands.as_slice(),
            &[SinkCommand::PressKey(KeyPress::Character('1'))]
        );
    }

    #[test]
    fn test_hiding_breaks_hover_episode() {
        let shared = SharedState::new();
        let sink = Arc::new(Mutex::new(RecordingSink::new()));
        let mut poller = poller(shared.clone(), Arc::clone(&sink));

        shared.publish((40.0, 810.0), true);
        let t0 = Instant::now();
        poller.tick(t0);

        shared.publish((40.0, 810.0), false);
        poller.tick(t0 + Duration::from_millis(500));

        // Visible again: the dwell clock must restart, so a tick at 1.1 s
        // from the original hover start selects nothing.
        shared.publish((40.0, 810.0), true);
        let tick = poller.tick(t0 + Duration::from_millis(1100));
        assert_eq!(tick.selected, None);
    }
}
