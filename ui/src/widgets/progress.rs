//! Timed-count setup and progress pages.

use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::Text,
};
use heapless::String;

use gc20_core::timed::TimedProgress;

use crate::colors::{BLACK, BLUE, GRAY, GREEN};
use crate::config::{CENTER_X, SCREEN_WIDTH};
use crate::styles::{
    CENTERED,
    LABEL_STYLE_GRAY,
    VALUE_STYLE_MEDIUM_WHITE,
    VALUE_STYLE_WHITE,
    VALUE_STYLE_YELLOW,
};

const BAR_LEFT: i32 = 30;
const BAR_TOP: i32 = 150;
const BAR_WIDTH: u32 = SCREEN_WIDTH - 60;
const BAR_HEIGHT: u32 = 16;

const BAR_OUTLINE: PrimitiveStyle<Rgb565> = PrimitiveStyleBuilder::new()
    .stroke_color(GRAY)
    .stroke_width(1)
    .fill_color(BLACK)
    .build();

/// Draw the duration-selection page.
pub fn draw_timed_setup<D>(
    display: &mut D,
    duration_min: u16,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let mut text: String<8> = String::new();
    let _ = write!(text, "{duration_min}");
    Text::with_text_style(&text, Point::new(CENTER_X, 110), VALUE_STYLE_YELLOW, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style("MINUTES", Point::new(CENTER_X, 132), LABEL_STYLE_GRAY, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style(
        "A: -  B: +  Y: START  X: BACK",
        Point::new(CENTER_X, 190),
        LABEL_STYLE_GRAY,
        CENTERED,
    )
    .draw(display)
    .ok();
}

/// Draw the running/completed timed-count page: accumulated counts, mean
/// CPM over the session, and the elapsed-fraction bar.
pub fn draw_timed_progress<D>(
    display: &mut D,
    progress: &TimedProgress,
    completed: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let mut counts: String<16> = String::new();
    let _ = write!(counts, "{}", progress.counts);
    Text::with_text_style(&counts, Point::new(CENTER_X, 70), VALUE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style("COUNTS", Point::new(CENTER_X, 88), LABEL_STYLE_GRAY, CENTERED)
        .draw(display)
        .ok();

    let mut cpm: String<16> = String::new();
    let _ = write!(cpm, "{:.1} CPM", progress.cpm);
    Text::with_text_style(&cpm, Point::new(CENTER_X, 122), VALUE_STYLE_MEDIUM_WHITE, CENTERED)
        .draw(display)
        .ok();

    Rectangle::new(Point::new(BAR_LEFT, BAR_TOP), Size::new(BAR_WIDTH, BAR_HEIGHT))
        .into_styled(BAR_OUTLINE)
        .draw(display)
        .ok();
    let fill_width = (progress.fraction.clamp(0.0, 1.0) * (BAR_WIDTH - 2) as f32) as u32;
    if fill_width > 0 {
        let fill_color = if completed { GREEN } else { BLUE };
        Rectangle::new(
            Point::new(BAR_LEFT + 1, BAR_TOP + 1),
            Size::new(fill_width, BAR_HEIGHT - 2),
        )
        .into_styled(PrimitiveStyle::with_fill(fill_color))
        .draw(display)
        .ok();
    }

    let hint = if completed {
        "DONE  X: BACK"
    } else {
        "X: CANCEL"
    };
    Text::with_text_style(hint, Point::new(CENTER_X, 190), LABEL_STYLE_GRAY, CENTERED)
        .draw(display)
        .ok();
}
