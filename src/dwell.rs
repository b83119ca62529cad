//! Dwell-based key selection.
//!
//! A key is selected by sustained hover: once the cursor has stayed over
//! the same named rectangle for longer than the dwell threshold, a
//! selection fires exactly once. The hover must leave the rectangle and
//! return before another selection can fire.

use std::time::{Duration, Instant};

/// Axis-aligned key rectangle in widget-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl KeyRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Point-in-rectangle test, edges inclusive.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Outcome of one dwell polling tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DwellTick {
    /// Key currently under the cursor, for highlight rendering.
    pub hovered: Option<String>,
    /// Key whose dwell completed this tick.
    pub selected: Option<String>,
}

#[derive(Debug)]
struct Hover {
    key: String,
    started: Instant,
    fired: bool,
}

/// Hover-duration state machine over named hit rectangles.
#[derive(Debug)]
pub struct DwellSelector {
    dwell: Duration,
    hover: Option<Hover>,
}

impl DwellSelector {
    #[must_use]
    pub const fn new(dwell: Duration) -> Self {
        Self { dwell, hover: None }
    }

    /// Advance one polling tick.
    ///
    /// `local` is the cursor position in widget-local coordinates, or None
    /// when no widget geometry is available. `targets` is the current set
    /// of named rectangles; the first containing rectangle wins. A change
    /// of hovered target (including to none) restarts the dwell clock.
    pub fn update(
        &mut self,
        local: Option<(f64, f64)>,
        targets: &[(String, KeyRect)],
        now: Instant,
    ) -> DwellTick {
        let found = local.and_then(|(x, y)| {
            targets
                .iter()
                .find(|(_, rect)| rect.contains(x, y))
                .map(|(name, _)| name.clone())
        });

        let Some(key) = found else {
            self.hover = None;
            return DwellTick::default();
        };

        match &mut self.hover {
            Some(hover) if hover.key == key => {
                if !hover.fired && now.duration_since(hover.started) > self.dwell {
                    hover.fired = true;
                    return DwellTick {
                        hovered: Some(key.clone()),
                        selected: Some(key),
                    };
                }
            }
            _ => {
                self.hover = Some(Hover {
                    key: key.clone(),
                    started: now,
                    fired: false,
                });
            }
        }

        DwellTick {
            hovered: Some(key),
            selected: None,
        }
    }

    /// Key currently being hovered, if any.
    #[must_use]
    pub fn hovered_key(&self) -> Option<&str> {
        self.hover.as_ref().map(|h| h.key.as_str())
    }

    /// Clear hover state, e.g. when the overlay is hidden.
    pub fn reset(&mut self) {
        self.hover = None;
    }
}
