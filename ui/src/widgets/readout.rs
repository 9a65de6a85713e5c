//! Home-screen readouts: count rate, dose rate, cumulative dose.

use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};
use heapless::String;

use gc20_core::DoseUnits;
use gc20_core::dose::format_dose;

use crate::colors::BLACK;
use crate::config::{CENTER_X, SCREEN_WIDTH};
use crate::styles::{
    CENTERED,
    LABEL_STYLE_GRAY,
    VALUE_STYLE_MEDIUM_WHITE,
    VALUE_STYLE_WHITE,
};

const RATE_VALUE_POS: Point = Point::new(CENTER_X, 70);
const RATE_LABEL_POS: Point = Point::new(CENTER_X, 88);
const DOSE_VALUE_POS: Point = Point::new(CENTER_X, 130);
const DOSE_LABEL_POS: Point = Point::new(CENTER_X, 146);
const TOTAL_VALUE_POS: Point = Point::new(CENTER_X, 180);
const TOTAL_LABEL_POS: Point = Point::new(CENTER_X, 196);

const CLEAR_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);

fn clear_band<D>(
    display: &mut D,
    top: i32,
    height: u32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(Point::new(0, top), Size::new(SCREEN_WIDTH, height))
        .into_styled(CLEAR_FILL)
        .draw(display)
        .ok();
}

/// Draw the corrected count rate, the large central figure.
pub fn draw_rate<D>(
    display: &mut D,
    cpm_corrected: f32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    clear_band(display, 40, 52);

    let mut text: String<16> = String::new();
    let _ = write!(text, "{:.0}", cpm_corrected.max(0.0));
    Text::with_text_style(&text, RATE_VALUE_POS, VALUE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style("CPM", RATE_LABEL_POS, LABEL_STYLE_GRAY, CENTERED)
        .draw(display)
        .ok();
}

/// Draw the instantaneous dose rate in the selected units.
pub fn draw_dose<D>(
    display: &mut D,
    dose_rate: f32,
    units: DoseUnits,
) where
    D: DrawTarget<Color = Rgb565>,
{
    clear_band(display, 106, 42);

    let text = format_dose(dose_rate);
    Text::with_text_style(&text, DOSE_VALUE_POS, VALUE_STYLE_MEDIUM_WHITE, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style(units.rate_label(), DOSE_LABEL_POS, LABEL_STYLE_GRAY, CENTERED)
        .draw(display)
        .ok();
}

/// Draw the cumulative dose since the last reset.
pub fn draw_total_dose<D>(
    display: &mut D,
    total_dose: f32,
    units: DoseUnits,
) where
    D: DrawTarget<Color = Rgb565>,
{
    clear_band(display, 156, 42);

    let text = format_dose(total_dose);
    Text::with_text_style(&text, TOTAL_VALUE_POS, VALUE_STYLE_MEDIUM_WHITE, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style(units.total_label(), TOTAL_LABEL_POS, LABEL_STYLE_GRAY, CENTERED)
        .draw(display)
        .ok();
}
