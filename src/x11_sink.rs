//! X11 input sink for the gesture engine.
//!
//! Pointer motion uses a plain pointer warp; clicks, scrolling and key
//! presses are injected through the XTEST extension. This is the one real
//! implementation of the [`InputSink`] boundary the crate ships; headless
//! environments use [`crate::sink::NullSink`] instead.

use crate::error::{AppError, Result};
use crate::keyboard::KeyPress;
use crate::sink::{InputSink, MouseButton};
use log::{debug, info};
use x11rb::{
    connection::Connection,
    protocol::xproto::{
        ConnectionExt as _, Screen, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT, KEY_PRESS_EVENT,
        KEY_RELEASE_EVENT,
    },
    protocol::xtest::ConnectionExt as _,
    rust_connection::RustConnection,
};

const KEYSYM_SPACE: u32 = 0x0020;
const KEYSYM_RETURN: u32 = 0xff0d;
const KEYSYM_BACKSPACE: u32 = 0xff08;
const KEYSYM_SHIFT_L: u32 = 0xffe1;

/// X11 scroll wheel button numbers
const BUTTON_SCROLL_UP: u8 = 4;
const BUTTON_SCROLL_DOWN: u8 = 5;

/// Input injection for X11-based systems
pub struct X11Sink {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
}

impl X11Sink {
    /// Connect to the display and capture screen geometry
    pub fn new() -> Result<Self> {
        info!("Initializing X11 input sink");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| AppError::X11(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| AppError::X11("Failed to get screen".to_string()))?
            .clone();

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!(
            "Connected to X11 display, screen: {}x{}",
            screen_width, screen_height
        );

        Ok(Self {
            connection,
            screen,
            screen_width,
            screen_height,
        })
    }

    /// Get screen dimensions
    #[must_use]
    pub const fn screen_size(&self) -> (u16, u16) {
        (self.screen_width, self.screen_height)
    }

    fn press_button(&self, button: u8) -> Result<()> {
        for event_type in [BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT] {
            self.connection
                .xtest_fake_input(
                    event_type,
                    button,
                    x11rb::CURRENT_TIME,
                    self.screen.root,
                    0,
                    0,
                    0,
                )
                .map_err(|e| AppError::Sink(format!("Failed to inject button event: {e}")))?;
        }
        Ok(())
    }

    fn press_keycode(&self, keycode: u8) -> Result<()> {
        for event_type in [KEY_PRESS_EVENT, KEY_RELEASE_EVENT] {
            self.connection
                .xtest_fake_input(
                    event_type,
                    keycode,
                    x11rb::CURRENT_TIME,
                    self.screen.root,
                    0,
                    0,
                    0,
                )
                .map_err(|e| AppError::Sink(format!("Failed to inject key event: {e}")))?;
        }
        Ok(())
    }

    /// Find the keycode (and whether it needs Shift) producing a keysym.
    fn lookup_keycode(&self, keysym: u32) -> Result<(u8, bool)> {
        let setup = self.connection.setup();
        let min_keycode = setup.min_keycode;
        let max_keycode = setup.max_keycode;
        let count = max_keycode - min_keycode + 1;

        let mapping = self
            .connection
            .get_keyboard_mapping(min_keycode, count)
            .map_err(|e| AppError::Sink(format!("Failed to request keyboard mapping: {e}")))?
            .reply()
            .map_err(|e| AppError::Sink(format!("Failed to read keyboard mapping: {e}")))?;

        let per_keycode = usize::from(mapping.keysyms_per_keycode);
        if per_keycode == 0 {
            return Err(AppError::Sink("Empty keyboard mapping".to_string()));
        }
        for (offset, keysyms) in mapping.keysyms.chunks(per_keycode).enumerate() {
            for (column, &candidate) in keysyms.iter().enumerate() {
                if candidate == keysym {
                    let keycode = min_keycode + offset as u8;
                    return Ok((keycode, column == 1));
                }
            }
        }

        Err(AppError::Sink(format!("No keycode produces keysym {keysym:#x}")))
    }

    fn keysym_for(key: &KeyPress) -> Result<u32> {
        match key {
            KeyPress::Symbolic("space") => Ok(KEYSYM_SPACE),
            KeyPress::Symbolic("enter") => Ok(KEYSYM_RETURN),
            KeyPress::Symbolic("backspace") => Ok(KEYSYM_BACKSPACE),
            KeyPress::Symbolic(name) => {
                Err(AppError::Sink(format!("Unknown symbolic key: {name}")))
            }
            KeyPress::Character(c) => {
                // Latin-1 keysyms coincide with the character code.
                if c.is_ascii_graphic() || *c == ' ' {
                    Ok(*c as u32)
                } else {
                    Err(AppError::Sink(format!("No keysym for character {c:?}")))
                }
            }
        }
    }
}

impl InputSink for X11Sink {
    fn move_cursor(&mut self, x: f64, y: f64) -> Result<()> {
        let max_x = i16::try_from(self.screen_width.saturating_sub(1)).unwrap_or(i16::MAX);
        let max_y = i16::try_from(self.screen_height.saturating_sub(1)).unwrap_or(i16::MAX);
        let x = (x.round() as i32).clamp(0, i32::from(max_x)) as i16;
        let y = (y.round() as i32).clamp(0, i32::from(max_y)) as i16;

        debug!("Setting cursor position to ({}, {})", x, y);

        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| AppError::Sink(format!("Failed to warp pointer: {e}")))?;

        self.connection
            .flush()
            .map_err(|e| AppError::Sink(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        let detail = match button {
            MouseButton::Left => 1,
            MouseButton::Right => 3,
        };
        debug!("Clicking {} button", button.as_str());

        self.press_button(detail)?;
        self.connection
            .flush()
            .map_err(|e| AppError::Sink(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }

    fn scroll(&mut self, amount: i32) -> Result<()> {
        let button = if amount > 0 {
            BUTTON_SCROLL_UP
        } else {
            BUTTON_SCROLL_DOWN
        };
        debug!("Scrolling {} units", amount);

        for _ in 0..amount.unsigned_abs() {
            self.press_button(button)?;
        }
        self.connection
            .flush()
            .map_err(|e| AppError::Sink(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }

    fn press_key(&mut self, key: &KeyPress) -> Result<()> {
        let keysym = Self::keysym_for(key)?;
        let (keycode, shifted) = self.lookup_keycode(keysym)?;

        debug!("Pressing key {:?} (keycode {})", key, keycode);

        if shifted {
            let (shift_keycode, _) = self.lookup_keycode(KEYSYM_SHIFT_L)?;
            self.connection
                .xtest_fake_input(
                    KEY_PRESS_EVENT,
                    shift_keycode,
                    x11rb::CURRENT_TIME,
                    self.screen.root,
                    0,
                    0,
                    0,
                )
                .map_err(|e| AppError::Sink(format!("Failed to inject key event: {e}")))?;
            self.press_keycode(keycode)?;
            self.connection
                .xtest_fake_input(
                    KEY_RELEASE_EVENT,
                    shift_keycode,
                    x11rb::CURRENT_TIME,
                    self.screen.root,
                    0,
                    0,
                    0,
                )
                .map_err(|e| AppError::Sink(format!("Failed to inject key event: {e}")))?;
        } else {
            self.press_keycode(keycode)?;
        }

        self.connection
            .flush()
            .map_err(|e| AppError::Sink(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }
}
