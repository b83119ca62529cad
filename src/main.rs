//! Face gesture control application: hands-free pointer and on-screen
//! keyboard driven by facial landmarks.

use std::io;
use std::sync::mpsc;

use anyhow::Result;
use clap::Parser;
use face_gesture_control::app::{ControlSignal, GestureApp, LandmarkSource};
use face_gesture_control::config::Config;
use face_gesture_control::landmarks::LandmarkFrame;
use face_gesture_control::overlay::ScreenKeyboard;
use face_gesture_control::sink::{InputSink, NullSink};
use face_gesture_control::x11_sink::X11Sink;
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Input sink backend (x11, none)
    #[arg(short, long, default_value = "x11")]
    sink: String,

    /// Cursor sensitivity gain override
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Cursor smoothing window override
    #[arg(long)]
    smoothing: Option<usize>,

    /// Eye aperture closed threshold override
    #[arg(long)]
    ear_threshold: Option<f64>,

    /// Dwell selection threshold override (seconds)
    #[arg(long)]
    dwell: Option<f64>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Landmark frames read line-by-line from stdin, as emitted by the
/// external face-mesh detector.
///
/// Each line is a JSON array of `[x, y]` pairs; an empty line or `null`
/// means no face was detected. The in-band words `recalibrate` and `quit`
/// carry the manual control signals.
struct StdinSource {
    lines: io::Lines<io::StdinLock<'static>>,
    signals: mpsc::Sender<ControlSignal>,
}

impl StdinSource {
    fn new(signals: mpsc::Sender<ControlSignal>) -> Self {
        Self {
            lines: io::stdin().lines(),
            signals,
        }
    }
}

impl LandmarkSource for StdinSource {
    fn next_frame(&mut self) -> Option<Option<LandmarkFrame>> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    warn!("stdin read failed: {e}");
                    return None;
                }
            };

            match line.trim() {
                "" | "none" | "null" => return Some(None),
                "quit" => {
                    let _ = self.signals.send(ControlSignal::Quit);
                    return Some(None);
                }
                "recalibrate" => {
                    let _ = self.signals.send(ControlSignal::Recalibrate);
                    continue;
                }
                payload => match serde_json::from_str::<Vec<(i32, i32)>>(payload) {
                    Ok(points) => return Some(Some(LandmarkFrame::from(points))),
                    Err(e) => {
                        warn!("unparseable landmark line, treating as no face: {e}");
                        return Some(None);
                    }
                },
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Face Gesture Control");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(sensitivity) = args.sensitivity {
        config.cursor.sensitivity = sensitivity;
    }
    if let Some(smoothing) = args.smoothing {
        config.cursor.smoothing_window = smoothing;
    }
    if let Some(threshold) = args.ear_threshold {
        config.gesture.ear_threshold = threshold;
    }
    if let Some(dwell) = args.dwell {
        config.dwell.dwell_secs = dwell;
    }
    config.validate()?;

    // The display server's reported size wins over the config fallback.
    let (sink, screen): (Box<dyn InputSink>, (f64, f64)) = match args.sink.as_str() {
        "none" => (Box::new(NullSink), (config.screen.width, config.screen.height)),
        _ => match X11Sink::new() {
            Ok(sink) => {
                let (w, h) = sink.screen_size();
                (Box::new(sink), (f64::from(w), f64::from(h)))
            }
            Err(e) => {
                warn!("Failed to initialize X11 sink: {}. Running without injection.", e);
                (Box::new(NullSink), (config.screen.width, config.screen.height))
            }
        },
    };

    let keyboard =
        ScreenKeyboard::bottom_of_screen(screen.0, screen.1, config.screen.keyboard_height);

    let (signal_tx, signal_rx) = mpsc::channel();
    let mut source = StdinSource::new(signal_tx);

    let mut app = GestureApp::new(config, sink, screen);
    app.run(&mut source, &signal_rx, keyboard)?;

    Ok(())
}
