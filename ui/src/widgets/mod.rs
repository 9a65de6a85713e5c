//! Widget components for the GC-20 display.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>` so the same
//! code draws to the ST7789 panel and the simulator window.

mod banner;
mod header;
mod menu;
mod progress;
mod readout;

pub use banner::draw_alert_banner;
pub use header::{LogIndicator, clear_body, draw_header};
pub use menu::{draw_menu, draw_toggle_page, draw_value_adjust};
pub use progress::{draw_timed_progress, draw_timed_setup};
pub use readout::{draw_dose, draw_rate, draw_total_dose};
