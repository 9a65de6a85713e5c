//! Page navigation for the multi-screen meter UI.
//!
//! The home screen shows live readings; the settings tree hangs off it one
//! level deep. Timed counting has its own setup and running pages. `Back`
//! from any settings child returns to the settings list, and from there to
//! home, which is when the caller persists settings and resets the counting
//! pipeline.

/// Available pages.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Page {
    /// Live rate, dose, cumulative dose, alert banner.
    #[default]
    Home,

    /// Settings list (entries for the child pages below).
    Settings,

    /// Sievert / Rem toggle.
    Units,

    /// High-alert threshold adjustment.
    AlertThreshold,

    /// Tube calibration factor adjustment.
    Calibration,

    /// Logging toggle, log status, clear log.
    Network,

    /// Handheld / monitoring-station switch.
    DeviceMode,

    /// Per-count click buzzer toggle.
    Sound,

    /// Timed-count duration selection.
    TimedSetup,

    /// Timed count in progress (and its completed display).
    TimedRunning,
}

impl Page {
    /// Page the back button returns to.
    pub const fn parent(self) -> Self {
        match self {
            Self::Home | Self::Settings | Self::TimedSetup => Self::Home,
            Self::TimedRunning => Self::TimedSetup,
            Self::Units
            | Self::AlertThreshold
            | Self::Calibration
            | Self::Network
            | Self::DeviceMode
            | Self::Sound => Self::Settings,
        }
    }

    /// True for pages where leaving must persist settings.
    pub const fn edits_settings(self) -> bool {
        matches!(
            self,
            Self::Units
                | Self::AlertThreshold
                | Self::Calibration
                | Self::Network
                | Self::DeviceMode
                | Self::Sound
        )
    }

    /// Header caption.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "GC-20",
            Self::Settings => "SETTINGS",
            Self::Units => "UNITS",
            Self::AlertThreshold => "ALERT THRESHOLD",
            Self::Calibration => "CALIBRATION",
            Self::Network => "DATA LOGGING",
            Self::DeviceMode => "DEVICE MODE",
            Self::Sound => "SOUND",
            Self::TimedSetup => "TIMED COUNT",
            Self::TimedRunning => "TIMED COUNT",
        }
    }
}

/// Entries of the settings list, in display order.
pub const SETTINGS_ENTRIES: [Page; 6] = [
    Page::Units,
    Page::AlertThreshold,
    Page::Calibration,
    Page::Network,
    Page::DeviceMode,
    Page::Sound,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_is_home() {
        assert_eq!(Page::default(), Page::Home);
    }

    #[test]
    fn test_back_walks_up_to_home() {
        // Every page reaches Home in at most three back presses.
        for page in [
            Page::Home,
            Page::Settings,
            Page::Units,
            Page::AlertThreshold,
            Page::Calibration,
            Page::Network,
            Page::DeviceMode,
            Page::Sound,
            Page::TimedSetup,
            Page::TimedRunning,
        ] {
            let up = page.parent().parent().parent();
            assert_eq!(up, Page::Home, "{page:?} did not reach Home");
        }
    }

    #[test]
    fn test_settings_children_return_to_settings() {
        for page in SETTINGS_ENTRIES {
            assert_eq!(page.parent(), Page::Settings);
            assert!(page.edits_settings());
        }
        assert!(!Page::Home.edits_settings());
        assert!(!Page::TimedRunning.edits_settings());
    }
}
