//! Input sink boundary: OS-level cursor, button, scroll and key injection.
//!
//! The gesture engine only ever talks to [`InputSink`]; commands are
//! fire-and-forget, and a failing sink must never disturb the gesture
//! state machines: callers log and discard errors at the call site.

use crate::keyboard::KeyPress;
use crate::Result;

/// Pointer button identifiers the engine can click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

impl MouseButton {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Downstream OS input-injection service.
pub trait InputSink: Send {
    /// Move the pointer to an absolute screen position.
    fn move_cursor(&mut self, x: f64, y: f64) -> Result<()>;

    /// Click a pointer button.
    fn click(&mut self, button: MouseButton) -> Result<()>;

    /// Scroll by a signed amount; positive scrolls up.
    fn scroll(&mut self, amount: i32) -> Result<()>;

    /// Press a key.
    fn press_key(&mut self, key: &KeyPress) -> Result<()>;
}

impl InputSink for Box<dyn InputSink> {
    fn move_cursor(&mut self, x: f64, y: f64) -> Result<()> {
        (**self).move_cursor(x, y)
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        (**self).click(button)
    }

    fn scroll(&mut self, amount: i32) -> Result<()> {
        (**self).scroll(amount)
    }

    fn press_key(&mut self, key: &KeyPress) -> Result<()> {
        (**self).press_key(key)
    }
}

/// Sink that silently drops every command, for headless runs.
#[derive(Debug, Default)]
pub struct NullSink;

impl InputSink for NullSink {
    fn move_cursor(&mut self, _x: f64, _y: f64) -> Result<()> {
        Ok(())
    }

    fn click(&mut self, _button: MouseButton) -> Result<()> {
        Ok(())
    }

    fn scroll(&mut self, _amount: i32) -> Result<()> {
        Ok(())
    }

    fn press_key(&mut self, _key: &KeyPress) -> Result<()> {
        Ok(())
    }
}

/// One recorded sink command.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCommand {
    MoveCursor(f64, f64),
    Click(MouseButton),
    Scroll(i32),
    PressKey(KeyPress),
}

/// Sink that records every command, for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub commands: Vec<SinkCommand>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded clicks, in order.
    #[must_use]
    pub fn clicks(&self) -> Vec<MouseButton> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                SinkCommand::Click(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    /// Recorded scroll amounts, in order.
    #[must_use]
    pub fn scrolls(&self) -> Vec<i32> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                SinkCommand::Scroll(amount) => Some(*amount),
                _ => None,
            })
            .collect()
    }

    /// Recorded key presses, in order.
    #[must_use]
    pub fn key_presses(&self) -> Vec<KeyPress> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                SinkCommand::PressKey(k) => Some(*k),
                _ => None,
            })
            .collect()
    }
}

impl InputSink for RecordingSink {
    fn move_cursor(&mut self, x: f64, y: f64) -> Result<()> {
        self.commands.push(SinkCommand::MoveCursor(x, y));
        Ok(())
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        self.commands.push(SinkCommand::Click(button));
        Ok(())
    }

    fn scroll(&mut self, amount: i32) -> Result<()> {
        self.commands.push(SinkCommand::Scroll(amount));
        Ok(())
    }

    fn press_key(&mut self, key: &KeyPress) -> Result<()> {
        self.commands.push(SinkCommand::PressKey(*key));
        Ok(())
    }
}
