//! Virtual keyboard layout model.
//!
//! The overlay toolkit renders the widget; this module owns the logical
//! layout (which keys exist and where their rectangles sit in the
//! widget's local coordinate space) and the mapping from a selected key
//! to the sink command it produces.

use crate::dwell::KeyRect;

/// Key names row by row, as rendered by the overlay.
pub const KEY_ROWS: [&[&str]; 4] = [
    &["1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "Back"],
    &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", "Enter"],
    &["A", "S", "D", "F", "G", "H", "J", "K", "L", ";", "\""],
    &["Z", "X", "C", "V", "B", "N", "M", ",", ".", "/", "Space"],
];

/// Uniform-grid placement of [`KEY_ROWS`] inside a widget of the given
/// size.
#[derive(Debug, Clone)]
pub struct KeyboardLayout {
    width: f64,
    height: f64,
}

impl KeyboardLayout {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Adopt a new widget size, e.g. after the overlay was resized.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    #[must_use]
    pub const fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Local rectangle for every key, derived from the current size.
    #[must_use]
    pub fn key_rects(&self) -> Vec<(String, KeyRect)> {
        let row_height = self.height / KEY_ROWS.len() as f64;
        let mut rects = Vec::with_capacity(KEY_ROWS.iter().map(|r| r.len()).sum());

        for (row_index, row) in KEY_ROWS.iter().enumerate() {
            let key_width = self.width / row.len() as f64;
            for (col_index, key) in row.iter().enumerate() {
                rects.push((
                    (*key).to_string(),
                    KeyRect::new(
                        col_index as f64 * key_width,
                        row_index as f64 * row_height,
                        key_width,
                        row_height,
                    ),
                ));
            }
        }

        rects
    }
}

/// Sink command produced by a selected key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// A named non-printing key ("space", "enter", "backspace").
    Symbolic(&'static str),
    /// A literal character, typed lower-cased.
    Character(char),
}

impl KeyPress {
    /// Map a layout key name to its sink command.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Space" => Some(Self::Symbolic("space")),
            "Enter" => Some(Self::Symbolic("enter")),
            "Back" => Some(Self::Symbolic("backspace")),
            _ => name
                .chars()
                .next()
                .map(|c| Self::Character(c.to_ascii_lowercase())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_a_rect() {
        let layout = KeyboardLayout::new(1100.0, 300.0);
        let rects = layout.key_rects();
        assert_eq!(rects.len(), 44);
        assert!(rects.iter().any(|(name, _)| name == "Space"));
        assert!(rects.iter().any(|(name, _)| name == "\""));
    }

    #[test]
    fn test_grid_placement() {
        let layout = KeyboardLayout::new(1100.0, 400.0);
        let rects = layout.key_rects();

        let (_, q) = rects.iter().find(|(name, _)| name == "Q").unwrap();
        assert_eq!(*q, KeyRect::new(0.0, 100.0, 100.0, 100.0));

        let (_, back) = rects.iter().find(|(name, _)| name == "Back").unwrap();
        assert_eq!(*back, KeyRect::new(1000.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_rects_follow_resize() {
        let mut layout = KeyboardLayout::new(1100.0, 400.0);
        layout.set_size(550.0, 200.0);
        let (_, q) = layout
            .key_rects()
            .into_iter()
            .find(|(name, _)| name == "Q")
            .unwrap();
        assert_eq!(q, KeyRect::new(0.0, 50.0, 50.0, 50.0));
    }

    #[test]
    fn test_key_press_mapping() {
        assert_eq!(
            KeyPress::from_key_name("Space"),
            Some(KeyPress::Symbolic("space"))
        );
        assert_eq!(
            KeyPress::from_key_name("Enter"),
            Some(KeyPress::Symbolic("enter"))
        );
        assert_eq!(
            KeyPress::from_key_name("Back"),
            Some(KeyPress::Symbolic("backspace"))
        );
        assert_eq!(KeyPress::from_key_name("Q"), Some(KeyPress::Character('q')));
        assert_eq!(KeyPress::from_key_name(";"), Some(KeyPress::Character(';')));
        assert_eq!(KeyPress::from_key_name(""), None);
    }
}
