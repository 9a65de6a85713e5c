//! RGB565 color constants for the GC-20 display.
//!
//! Rgb565 is native to the ST7789 panel: 5 bits red, 6 bits green, 5 bits
//! blue, no conversion on the way to the display buffer. Standard colors
//! come from the `RgbColor` trait constants; the rest are tuned by eye on
//! the actual panel.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use gc20_core::AlertLevel;

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Background for every page.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Primary text on dark backgrounds.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// High-alert banner and destructive menu entries.
pub const RED: Rgb565 = Rgb565::RED;

/// Normal-background banner and the logging-active indicator.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Timed-count progress bar fill.
pub const BLUE: Rgb565 = Rgb565::BLUE;

/// Selected menu row highlight.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Elevated-activity banner. RGB565 (31, 32, 0), darker than yellow.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Dividers and de-emphasized labels. Roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Header bar fill. Dark blue so the white title carries the contrast.
pub const HEADER_BLUE: Rgb565 = Rgb565::new(0, 8, 12);

/// Banner color for an alert level.
pub const fn alert_color(level: AlertLevel) -> Rgb565 {
    match level {
        AlertLevel::Normal => GREEN,
        AlertLevel::Elevated => ORANGE,
        AlertLevel::High => RED,
    }
}
