//! Header bar and page body clearing.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};
use heapless::String;

use gc20_core::IntegrationMode;

use crate::colors::{BLACK, GREEN, HEADER_BLUE, RED};
use crate::config::{BODY_HEIGHT, BODY_TOP, HEADER_HEIGHT, SCREEN_WIDTH};
use crate::pages::Page;
use crate::styles::{CENTERED, LABEL_STYLE_WHITE, RIGHT_ALIGNED, TITLE_STYLE_WHITE};

const HEADER_RECT_POS: Point = Point::new(0, 0);
const HEADER_RECT_SIZE: Size = Size::new(SCREEN_WIDTH, HEADER_HEIGHT);
const HEADER_TITLE_POS: Point = Point::new((SCREEN_WIDTH / 2) as i32, 19);
const HEADER_STATUS_POS: Point = Point::new((SCREEN_WIDTH - 5) as i32, 17);
const HEADER_LOG_POS: Point = Point::new(5, 17);

const HEADER_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(HEADER_BLUE);
const BODY_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);
const LOG_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GREEN);
const LOG_FULL_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, RED);

/// Data-log state shown in the header's left corner.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LogIndicator {
    /// Logging off, room left: nothing shown.
    Off,
    /// Logging armed and recording: green "LOG".
    Recording,
    /// Record region exhausted: red "LOG FULL" until the log is cleared,
    /// whether or not logging is still armed.
    Full,
}

impl LogIndicator {
    pub const fn new(
        logging_enabled: bool,
        log_full: bool,
    ) -> Self {
        if log_full {
            Self::Full
        } else if logging_enabled {
            Self::Recording
        } else {
            Self::Off
        }
    }
}

/// Draw the header bar: page title centered, averaging-window label on the
/// right, and the data-log indicator on the left.
pub fn draw_header<D>(
    display: &mut D,
    page: Page,
    mode: IntegrationMode,
    log: LogIndicator,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(HEADER_RECT_POS, HEADER_RECT_SIZE)
        .into_styled(HEADER_FILL)
        .draw(display)
        .ok();

    Text::with_text_style(page.title(), HEADER_TITLE_POS, TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();

    // The window label only matters while live readings are on screen.
    if page == Page::Home {
        let mut status: String<16> = String::new();
        let _ = write!(status, "AVG {}", mode.label());
        Text::with_text_style(&status, HEADER_STATUS_POS, LABEL_STYLE_WHITE, RIGHT_ALIGNED)
            .draw(display)
            .ok();
    }

    match log {
        LogIndicator::Off => {}
        LogIndicator::Recording => {
            Text::new("LOG", HEADER_LOG_POS, LOG_STYLE).draw(display).ok();
        }
        LogIndicator::Full => {
            Text::new("LOG FULL", HEADER_LOG_POS, LOG_FULL_STYLE)
                .draw(display)
                .ok();
        }
    }
}

/// Blank the page body between header and banner before a page redraw.
pub fn clear_body<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(Point::new(0, BODY_TOP), Size::new(SCREEN_WIDTH, BODY_HEIGHT))
        .into_styled(BODY_FILL)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_store_shows_full_regardless_of_logging_switch() {
        assert_eq!(LogIndicator::new(true, true), LogIndicator::Full);
        assert_eq!(LogIndicator::new(false, true), LogIndicator::Full);
    }

    #[test]
    fn test_indicator_tracks_the_logging_switch_while_room_remains() {
        assert_eq!(LogIndicator::new(true, false), LogIndicator::Recording);
        assert_eq!(LogIndicator::new(false, false), LogIndicator::Off);
    }
}
