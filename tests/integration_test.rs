//! End-to-end tests for the gesture translation pipeline

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use face_gesture_control::app::{ControlSignal, GestureApp, LandmarkSource};
use face_gesture_control::config::Config;
use face_gesture_control::constants::{LEFT_EYE_INDICES, NOSE_TIP_INDEX, RIGHT_EYE_INDICES};
use face_gesture_control::landmarks::LandmarkFrame;
use face_gesture_control::overlay::{OverlayPoller, ScreenKeyboard};
use face_gesture_control::shared_state::SharedState;
use face_gesture_control::sink::{MouseButton, RecordingSink};

/// Synthesize a full landmark frame with the requested per-eye apertures
/// and nose position.
fn synth_frame(ear_left: f64, ear_right: f64, nose: (i32, i32)) -> LandmarkFrame {
    let mut points = vec![(0, 0); 468];
    points[NOSE_TIP_INDEX] = nose;

    for (indices, ear) in [(&LEFT_EYE_INDICES, ear_left), (&RIGHT_EYE_INDICES, ear_right)] {
        let half_gap = (ear * 20.0).round() as i32;
        points[indices[0]] = (0, 0);
        points[indices[3]] = (20, 0);
        points[indices[1]] = (5, -half_gap);
        points[indices[5]] = (5, 0);
        points[indices[2]] = (15, -half_gap);
        points[indices[4]] = (15, 0);
    }

    LandmarkFrame::from(points)
}

fn open_frame(nose: (i32, i32)) -> LandmarkFrame {
    synth_frame(0.3, 0.3, nose)
}

fn app() -> GestureApp<RecordingSink> {
    GestureApp::new(Config::default(), RecordingSink::new(), (1920.0, 1080.0))
}

fn at(start: Instant, ms: u64) -> Instant {
    start + Duration::from_millis(ms)
}

#[test]
fn test_left_wink_clicks_left_button() {
    let mut app = app();
    let now = Instant::now();
    let nose = (320, 240);

    app.process_frame(Some(&open_frame(nose)), now);
    for _ in 0..3 {
        app.process_frame(Some(&synth_frame(0.1, 0.3, nose)), now);
    }
    let events = app.process_frame(Some(&open_frame(nose)), now);

    assert_eq!(events.clicks, vec![MouseButton::Left]);
    assert_eq!(app.sink().lock().unwrap().clicks(), vec![MouseButton::Left]);
}

#[test]
fn test_both_blink_scenario_produces_no_click() {
    // Apertures 0.30 for 5 frames, 0.10 on both for 4 frames, reopen:
    // one both-eyes period of length 4, zero clicks.
    let mut app = app();
    let now = Instant::now();
    let nose = (320, 240);

    for _ in 0..5 {
        let events = app.process_frame(Some(&open_frame(nose)), now);
        assert!(events.clicks.is_empty() && !events.mode_toggled);
    }
    for _ in 0..4 {
        app.process_frame(Some(&synth_frame(0.1, 0.1, nose)), now);
    }
    let events = app.process_frame(Some(&open_frame(nose)), now);

    assert!(events.clicks.is_empty());
    assert!(app.sink().lock().unwrap().clicks().is_empty());
}

/// Drive one complete both-eyes blink whose closing period ends at `end`.
fn both_blink(app: &mut GestureApp<RecordingSink>, nose: (i32, i32), end: Instant) {
    for _ in 0..3 {
        app.process_frame(Some(&synth_frame(0.1, 0.1, nose)), end - Duration::from_millis(1));
    }
    app.process_frame(Some(&open_frame(nose)), end);
}

#[test]
fn test_double_blink_switches_mode_and_shows_overlay() {
    let mut app = app();
    let start = Instant::now();
    let nose = (320, 240);

    app.process_frame(Some(&open_frame(nose)), start);
    assert!(!app.shared_state().snapshot().visible);

    both_blink(&mut app, nose, at(start, 100));
    assert!(app.mode().is_pointer());

    both_blink(&mut app, nose, at(start, 900));
    assert!(app.mode().is_text_entry());
    assert!(app.shared_state().snapshot().visible);

    // A third blink outside any window does not toggle back alone.
    both_blink(&mut app, nose, at(start, 1950));
    assert!(app.mode().is_text_entry());
}

#[test]
fn test_winks_do_not_click_in_text_entry_mode() {
    let mut app = app();
    let start = Instant::now();
    let nose = (320, 240);

    both_blink(&mut app, nose, at(start, 100));
    both_blink(&mut app, nose, at(start, 400));
    assert!(app.mode().is_text_entry());

    for _ in 0..3 {
        app.process_frame(Some(&synth_frame(0.1, 0.3, nose)), at(start, 500));
    }
    let events = app.process_frame(Some(&open_frame(nose)), at(start, 600));

    assert!(events.clicks.is_empty());
    assert!(app.sink().lock().unwrap().clicks().is_empty());
}

#[test]
fn test_scroll_session_emits_ticks_and_suppresses_clicks() {
    let mut app = app();
    let now = Instant::now();

    app.process_frame(Some(&open_frame((320, 240))), now);

    // Both eyes closed, head drifting down: anchor, then one tick.
    app.process_frame(Some(&synth_frame(0.1, 0.1, (320, 240))), now);
    let events = app.process_frame(Some(&synth_frame(0.1, 0.1, (320, 248))), now);
    assert_eq!(events.scroll, Some(50), "head down scrolls up");

    // Holding still: no further ticks.
    let events = app.process_frame(Some(&synth_frame(0.1, 0.1, (320, 248))), now);
    assert_eq!(events.scroll, None);

    // Head up past the threshold: inverse tick.
    let events = app.process_frame(Some(&synth_frame(0.1, 0.1, (320, 240))), now);
    assert_eq!(events.scroll, Some(-50));

    // Reopening ends the session with no trailing ticks and no clicks.
    let events = app.process_frame(Some(&open_frame((320, 300))), now);
    assert_eq!(events.scroll, None);
    assert!(events.clicks.is_empty());

    let sink = app.sink();
    let sink = sink.lock().unwrap();
    assert_eq!(sink.scrolls(), vec![50, -50]);
    assert!(sink.clicks().is_empty());
}

#[test]
fn test_no_scrolling_in_text_entry_mode() {
    let mut app = app();
    let start = Instant::now();
    let nose = (320, 240);

    both_blink(&mut app, nose, at(start, 100));
    both_blink(&mut app, nose, at(start, 400));
    assert!(app.mode().is_text_entry());

    app.process_frame(Some(&synth_frame(0.1, 0.1, (320, 240))), at(start, 500));
    let events = app.process_frame(Some(&synth_frame(0.1, 0.1, (320, 260))), at(start, 500));
    assert_eq!(events.scroll, None);
    assert!(app.sink().lock().unwrap().scrolls().is_empty());
}

#[test]
fn test_recalibration_rezeros_cursor() {
    let mut app = app();
    let now = Instant::now();

    // Establish a center at (320, 240), then drift to (360, 240).
    app.process_frame(Some(&open_frame((320, 240))), now);
    for _ in 0..5 {
        app.process_frame(Some(&open_frame((360, 240))), now);
    }

    app.handle_signal(ControlSignal::Recalibrate);
    let mut position = (0.0, 0.0);
    for _ in 0..5 {
        let events = app.process_frame(Some(&open_frame((360, 240))), now);
        position = events.cursor.unwrap();
    }
    assert!(
        (position.0 - 960.0).abs() < 1e-9,
        "recalibrated head position maps back to screen center"
    );
}

#[test]
fn test_faceless_frames_are_idle_indefinitely() {
    let mut app = app();
    let now = Instant::now();

    for _ in 0..100 {
        let events = app.process_frame(None, now);
        assert_eq!(events.cursor, None);
        assert!(events.clicks.is_empty());
    }
    assert!(app.sink().lock().unwrap().commands.is_empty());
}

#[test]
fn test_degenerate_eye_geometry_skips_frame() {
    let mut app = app();
    let now = Instant::now();

    // All landmark points coincide: horizontal eye distance is zero.
    let degenerate = LandmarkFrame::from(vec![(5, 5); 468]);
    let events = app.process_frame(Some(&degenerate), now);
    assert_eq!(events, Default::default());
    assert!(app.sink().lock().unwrap().commands.is_empty());

    // The engine keeps working on the next good frame.
    let events = app.process_frame(Some(&open_frame((320, 240))), now);
    assert!(events.cursor.is_some());
}

#[test]
fn test_overlay_loop_stops_within_one_tick() {
    let shared = SharedState::new();
    let sink = Arc::new(Mutex::new(RecordingSink::new()));
    let keyboard = ScreenKeyboard::bottom_of_screen(1920.0, 1080.0, 300.0);
    let interval = Duration::from_millis(20);

    let poller = OverlayPoller::new(
        keyboard,
        Duration::from_secs(1),
        interval,
        shared.clone(),
        sink,
    );
    let handle = poller.spawn().unwrap();

    std::thread::sleep(Duration::from_millis(60));
    shared.request_stop();

    let deadline = Instant::now();
    handle.join().unwrap();
    assert!(
        deadline.elapsed() < interval * 10,
        "overlay loop took too long to observe the stop flag"
    );
}

/// A scripted landmark source for exercising the full run loop.
struct ScriptedSource {
    frames: Vec<Option<LandmarkFrame>>,
}

impl LandmarkSource for ScriptedSource {
    fn next_frame(&mut self) -> Option<Option<LandmarkFrame>> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.remove(0))
        }
    }
}

#[test]
fn test_run_loop_processes_stream_and_shuts_down() {
    let mut config = Config::default();
    config.dwell.poll_interval_ms = 10;
    let mut app = GestureApp::new(config, RecordingSink::new(), (1920.0, 1080.0));
    let sink = app.sink();

    let mut frames = vec![Some(open_frame((320, 240)))];
    frames.push(None);
    for _ in 0..3 {
        frames.push(Some(synth_frame(0.1, 0.3, (320, 240))));
    }
    frames.push(Some(open_frame((320, 240))));

    let mut source = ScriptedSource { frames };
    let (_tx, rx) = mpsc::channel();
    let keyboard = ScreenKeyboard::bottom_of_screen(1920.0, 1080.0, 300.0);

    app.run(&mut source, &rx, keyboard).unwrap();

    let sink = sink.lock().unwrap();
    assert_eq!(sink.clicks(), vec![MouseButton::Left]);
}

#[test]
fn test_quit_signal_ends_run_loop() {
    let mut app = app();
    let (tx, rx) = mpsc::channel();
    tx.send(ControlSignal::Quit).unwrap();

    // An endless source of faceless frames: only the signal can stop it.
    struct Endless;
    impl LandmarkSource for Endless {
        fn next_frame(&mut self) -> Option<Option<LandmarkFrame>> {
            Some(None)
        }
    }

    let keyboard = ScreenKeyboard::bottom_of_screen(1920.0, 1080.0, 300.0);
    app.run(&mut Endless, &rx, keyboard).unwrap();
}
