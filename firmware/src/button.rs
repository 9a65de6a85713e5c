//! Front-panel button debouncing.
//!
//! A raw level change only registers after it has held steady for the
//! debounce window, so contact bounce on either edge is filtered out before
//! it can reach the page state machine.

use embassy_time::{Duration, Instant};

/// How long a level must hold before it is taken as a real press/release.
const SETTLE: Duration = Duration::from_millis(50);

/// Debounced press detector for one active-low button.
pub struct ButtonState {
    /// Level confirmed after settling. True = pressed.
    confirmed: bool,
    /// Most recent raw sample and when it first appeared.
    candidate: bool,
    candidate_since: Instant,
}

impl ButtonState {
    pub const fn new() -> Self {
        Self {
            confirmed: false,
            candidate: false,
            candidate_since: Instant::from_ticks(0),
        }
    }

    /// Feed one raw sample (`true` while the pin reads low). Returns true
    /// exactly once per settled press.
    pub fn just_pressed(
        &mut self,
        pressed: bool,
    ) -> bool {
        if pressed != self.candidate {
            self.candidate = pressed;
            self.candidate_since = Instant::now();
            return false;
        }

        if pressed != self.confirmed && self.candidate_since.elapsed() >= SETTLE {
            self.confirmed = pressed;
            return pressed;
        }

        false
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::new()
    }
}
