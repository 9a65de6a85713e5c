//! Settings list and value-adjustment pages.

use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};
use heapless::String;

use crate::colors::YELLOW;
use crate::config::{BODY_TOP, CENTER_X, MENU_LEFT_MARGIN, MENU_ROW_HEIGHT, SCREEN_WIDTH};
use crate::styles::{
    CENTERED,
    LABEL_STYLE_GRAY,
    MENU_STYLE_BLACK,
    MENU_STYLE_WHITE,
    VALUE_STYLE_YELLOW,
};

const SELECT_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(YELLOW);

/// Draw a vertical menu with the selected row highlighted.
pub fn draw_menu<D>(
    display: &mut D,
    entries: &[&str],
    selected: usize,
) where
    D: DrawTarget<Color = Rgb565>,
{
    for (i, entry) in entries.iter().enumerate() {
        let row_top = BODY_TOP + 8 + i as i32 * MENU_ROW_HEIGHT as i32;
        let text_pos = Point::new(MENU_LEFT_MARGIN, row_top + 20);

        if i == selected {
            Rectangle::new(
                Point::new(0, row_top),
                Size::new(SCREEN_WIDTH, MENU_ROW_HEIGHT),
            )
            .into_styled(SELECT_FILL)
            .draw(display)
            .ok();
            Text::new(entry, text_pos, MENU_STYLE_BLACK).draw(display).ok();
        } else {
            Text::new(entry, text_pos, MENU_STYLE_WHITE).draw(display).ok();
        }
    }
}

/// Draw a numeric adjustment page: the value large and yellow, its unit
/// below, and the button hint at the bottom of the body.
pub fn draw_value_adjust<D>(
    display: &mut D,
    value: u16,
    unit: &str,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let mut text: String<8> = String::new();
    let _ = write!(text, "{value}");
    Text::with_text_style(&text, Point::new(CENTER_X, 110), VALUE_STYLE_YELLOW, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style(unit, Point::new(CENTER_X, 132), LABEL_STYLE_GRAY, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style(
        "A: -  B: +  X: BACK",
        Point::new(CENTER_X, 190),
        LABEL_STYLE_GRAY,
        CENTERED,
    )
    .draw(display)
    .ok();
}

/// Draw a two-option toggle page (units, device mode, logging on/off).
pub fn draw_toggle_page<D>(
    display: &mut D,
    options: [&str; 2],
    active: usize,
) where
    D: DrawTarget<Color = Rgb565>,
{
    for (i, option) in options.iter().enumerate() {
        let row_top = BODY_TOP + 30 + i as i32 * (MENU_ROW_HEIGHT as i32 + 10);
        let text_pos = Point::new(CENTER_X, row_top + 20);

        if i == active {
            Rectangle::new(
                Point::new(40, row_top),
                Size::new(SCREEN_WIDTH - 80, MENU_ROW_HEIGHT),
            )
            .into_styled(SELECT_FILL)
            .draw(display)
            .ok();
            Text::with_text_style(option, text_pos, MENU_STYLE_BLACK, CENTERED)
                .draw(display)
                .ok();
        } else {
            Text::with_text_style(option, text_pos, MENU_STYLE_WHITE, CENTERED)
                .draw(display)
                .ok();
        }
    }
}
