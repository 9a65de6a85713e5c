//! Screen layout constants.
//!
//! The GC-20 panel is a 320x240 ST7789 in landscape. Fixed positions are
//! pre-computed here so draw functions reference const `Point`s instead of
//! recomputing coordinates per frame.

/// Display dimensions in pixels.
pub const SCREEN_WIDTH: u32 = 320;
pub const SCREEN_HEIGHT: u32 = 240;

/// Horizontal screen center, for centered text.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Header bar height (title + status indicators).
pub const HEADER_HEIGHT: u32 = 26;

/// Alert banner strip along the bottom edge.
pub const BANNER_HEIGHT: u32 = 32;
pub const BANNER_TOP: i32 = (SCREEN_HEIGHT - BANNER_HEIGHT) as i32;

/// Vertical extent of the page body between header and banner.
pub const BODY_TOP: i32 = HEADER_HEIGHT as i32;
pub const BODY_HEIGHT: u32 = SCREEN_HEIGHT - HEADER_HEIGHT - BANNER_HEIGHT;

/// Menu row geometry on the settings pages.
pub const MENU_ROW_HEIGHT: u32 = 30;
pub const MENU_LEFT_MARGIN: i32 = 12;

const _: () = assert!(HEADER_HEIGHT + BANNER_HEIGHT < SCREEN_HEIGHT);
