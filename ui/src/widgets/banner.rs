//! Bottom-edge alert banner.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};

use gc20_core::AlertLevel;

use crate::colors::{BLACK, alert_color};
use crate::config::{BANNER_HEIGHT, BANNER_TOP, CENTER_X, SCREEN_WIDTH};
use crate::styles::{BANNER_FONT, CENTERED};

const BANNER_POS: Point = Point::new(0, BANNER_TOP);
const BANNER_SIZE: Size = Size::new(SCREEN_WIDTH, BANNER_HEIGHT);
const BANNER_TEXT_POS: Point = Point::new(CENTER_X, BANNER_TOP + 21);

/// Draw the alert banner for a level.
///
/// Full-width colored strip with the level caption in black. Callers track
/// the previously drawn level and invoke this only on change, so a level
/// flapping on a threshold boundary does not redraw (or re-sound) every
/// tick it stays put.
pub fn draw_alert_banner<D>(
    display: &mut D,
    level: AlertLevel,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(BANNER_POS, BANNER_SIZE)
        .into_styled(PrimitiveStyle::with_fill(alert_color(level)))
        .draw(display)
        .ok();

    let caption_style = MonoTextStyle::new(BANNER_FONT, BLACK);
    Text::with_text_style(level.caption(), BANNER_TEXT_POS, caption_style, CENTERED)
        .draw(display)
        .ok();
}
