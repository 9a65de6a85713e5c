//! Pre-computed static text styles.
//!
//! `MonoTextStyle` and `TextStyle` are const-constructible in
//! embedded-graphics 0.8, so every fixed style lives in the binary's
//! read-only data instead of being rebuilt each frame. Styles that need a
//! dynamic color (the alert banner) build from the exposed font references.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::Rgb565,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{BLACK, GRAY, WHITE, YELLOW};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text. Readout values, banner captions, popup text.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Right-aligned text. Header status indicators.
pub const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Right).build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Banner caption font, for `MonoTextStyle::new(BANNER_FONT, dynamic_color)`.
pub const BANNER_FONT: &MonoFont = &FONT_10X20;

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Small white text for labels on dark backgrounds.
pub const LABEL_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Small gray text for de-emphasized labels (unit suffixes, hints).
pub const LABEL_STYLE_GRAY: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GRAY);

/// Header title (10x20 pixels).
pub const TITLE_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);

/// Menu row text (10x20 pixels).
pub const MENU_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);

/// Menu row text on the yellow selection highlight.
pub const MENU_STYLE_BLACK: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, BLACK);

/// Large white text for the CPM readout (`ProFont` 24pt).
pub const VALUE_STYLE_WHITE: MonoTextStyle<'static, Rgb565> =
    MonoTextStyle::new(&PROFONT_24_POINT, WHITE);

/// Large yellow text for the value being adjusted on a settings page.
pub const VALUE_STYLE_YELLOW: MonoTextStyle<'static, Rgb565> =
    MonoTextStyle::new(&PROFONT_24_POINT, YELLOW);

/// Mid-size white text for the dose readouts.
pub const VALUE_STYLE_MEDIUM_WHITE: MonoTextStyle<'static, Rgb565> =
    MonoTextStyle::new(&PROFONT_18_POINT, WHITE);
