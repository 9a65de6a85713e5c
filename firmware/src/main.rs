//! GC-20 Geiger counter firmware for Raspberry Pi Pico 2 (RP2350).
//!
//! # Architecture
//!
//! The tube sense pin is serviced by a dedicated task that only touches the
//! atomic [`PulseCounter`], so counting never stops while the main loop is
//! busy drawing or talking to collaborators. The main loop is strictly
//! sequential: poll buttons, advance the estimation pipeline once per
//! second, redraw what changed, and run the periodic log/upload work behind
//! elapsed-time guards.
//!
//! # Button Controls
//!
//! - **A**: minus / cursor down / cycle averaging window (Home)
//! - **B**: plus / cursor up / open timed count (Home)
//! - **X**: back (persists settings when leaving a settings page)
//! - **Y**: select / open settings (Home) / start timed count / clear log

#![no_std]
#![no_main]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

mod button;
mod display;

use core::sync::atomic::{AtomicBool, Ordering};

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::Spi;
use embassy_time::{Duration, Instant, Timer};
use embedded_graphics::prelude::*;
use heapless::String;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use gc20_core::config::{
    LOG_INTERVAL_S,
    TICK_MS,
    TIMED_DURATION_MAX,
    TIMED_DURATION_MIN,
    TIMED_DURATION_STEP,
    UPLOAD_INTERVAL_S,
};
use gc20_core::settings::EepromImage;
use gc20_core::timed::TimedProgress;
use gc20_core::{
    AlertLevel,
    PulseCounter,
    RateEstimator,
    Settings,
    TimedAcquisition,
    alert,
    datalog,
    dose,
    upload,
};
use gc20_ui::colors::BLACK;
use gc20_ui::pages::SETTINGS_ENTRIES;
use gc20_ui::widgets::{
    LogIndicator,
    clear_body,
    draw_alert_banner,
    draw_dose,
    draw_header,
    draw_menu,
    draw_rate,
    draw_timed_progress,
    draw_timed_setup,
    draw_toggle_page,
    draw_total_dose,
    draw_value_adjust,
};
use gc20_ui::Page;

use crate::button::ButtonState;
use crate::display::{display_spi_config, init_display};

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"gc20"),
    embassy_rp::binary_info::rp_program_description!(c"GC-20 Geiger counter"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Shared tube tally. The pulse task writes from its edge loop; the main
/// loop snapshots once per tick.
static PULSE: PulseCounter = PulseCounter::new();

/// Buzzer mute switch, mirrored from the persisted setting so the pulse
/// task never touches the settings struct.
static BUZZER_ENABLED: AtomicBool = AtomicBool::new(true);

/// RAM image of the settings/log sector.
static STORE: StaticCell<EepromImage> = StaticCell::new();

/// Upload payload buffer. Static because a full record region renders to
/// ~18 KiB at worst-case figures.
static UPLOAD_JSON: StaticCell<String<20480>> = StaticCell::new();

/// Write API key for the monitoring-station upload collaborator.
/// Overridable at build time for a real deployment.
const UPLOAD_API_KEY: &str = match option_env!("GC20_UPLOAD_KEY") {
    Some(key) => key,
    None => "DEMO-KEY",
};

/// Tube sense task: count falling edges through the debounce filter and
/// blink the click indicator on each accepted count.
///
/// The blink is shorter than the 200 us dead-time floor, so the awaits here
/// can never hide an edge that would have been accepted.
#[embassy_executor::task]
async fn pulse_task(
    mut tube: Input<'static>,
    mut click_led: Output<'static>,
    mut buzzer: Output<'static>,
) {
    info!("Pulse task started");

    loop {
        tube.wait_for_falling_edge().await;
        let before = PULSE.cumulative();
        PULSE.on_pulse_edge(Instant::now().as_micros() as u32);

        if PULSE.cumulative() != before {
            let audible = BUZZER_ENABLED.load(Ordering::Relaxed);
            click_led.set_high();
            if audible {
                buzzer.set_high();
            }
            Timer::after_micros(150).await;
            click_led.set_low();
            if audible {
                buzzer.set_low();
            }
        }
    }
}

/// Per-page UI state the main loop tracks between frames.
struct UiState {
    page: Page,
    menu_cursor: usize,
    timed_duration_min: u16,
    drawn_level: Option<AlertLevel>,
    page_dirty: bool,
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("GC-20 starting...");

    let p = embassy_rp::init(Default::default());

    // Front-panel display: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let mut _backlight = Output::new(p.PIN_20, Level::High);
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());
    let mut display = init_display(spi, cs, dc);
    display.clear(BLACK).ok();
    info!("Display initialized");

    // Tube sense input (active-low comparator output) and click indicators
    let tube = Input::new(p.PIN_22, Pull::Up);
    let click_led = Output::new(p.PIN_25, Level::Low);
    let buzzer = Output::new(p.PIN_21, Level::Low);
    spawner.spawn(pulse_task(tube, click_led, buzzer)).unwrap();

    // Front-panel buttons (active-low)
    let btn_a = Input::new(p.PIN_12, Pull::Up);
    let btn_b = Input::new(p.PIN_13, Pull::Up);
    let btn_x = Input::new(p.PIN_14, Pull::Up);
    let btn_y = Input::new(p.PIN_15, Pull::Up);
    let mut state_a = ButtonState::new();
    let mut state_b = ButtonState::new();
    let mut state_x = ButtonState::new();
    let mut state_y = ButtonState::new();

    // High-alert lamp (active-low RGB, red channel)
    let mut alarm_led = Output::new(p.PIN_26, Level::High);

    let store = STORE.init(EepromImage::new());
    let upload_json = UPLOAD_JSON.init(String::new());
    let mut settings = Settings::load(store);
    BUZZER_ENABLED.store(settings.buzzer_enabled, Ordering::Relaxed);
    info!(
        "Settings loaded: cal={} alarm=x{} logging={}",
        settings.calibration, settings.alarm_threshold, settings.logging_enabled
    );

    let mut estimator = RateEstimator::new();
    let mut timed = TimedAcquisition::new();
    let mut progress = TimedProgress::default();
    let mut log_full_reported = false;

    let mut ui = UiState {
        page: Page::Home,
        menu_cursor: 0,
        timed_duration_min: 10,
        drawn_level: None,
        page_dirty: true,
    };

    let mut last_tick = Instant::now();
    let mut last_log = Instant::now();
    let mut last_upload = Instant::now();

    info!("Starting main loop...");

    loop {
        // ---------------------------------------------------------------
        // Buttons
        // ---------------------------------------------------------------
        let a = state_a.just_pressed(btn_a.is_low());
        let b = state_b.just_pressed(btn_b.is_low());
        let x = state_x.just_pressed(btn_x.is_low());
        let y = state_y.just_pressed(btn_y.is_low());

        if a || b || x || y {
            handle_buttons(&mut ui, &mut settings, &mut estimator, &mut timed, store, a, b, x, y);
        }

        // ---------------------------------------------------------------
        // 1 Hz estimation tick
        // ---------------------------------------------------------------
        if last_tick.elapsed() >= Duration::from_millis(TICK_MS) {
            last_tick = Instant::now();

            // One snapshot per tick; every derived figure uses it.
            let snap = PULSE.snapshot();
            let sample = estimator.advance(snap.current);

            let level = alert::classify(
                sample.cpm_corrected,
                settings.calibration,
                settings.alarm_threshold,
            );
            if level == AlertLevel::High {
                alarm_led.set_low();
            } else {
                alarm_led.set_high();
            }

            if ui.page == Page::Home {
                draw_rate(&mut display, sample.cpm_corrected);
                draw_dose(
                    &mut display,
                    dose::dose_rate(sample.cpm_corrected, settings.units, settings.calibration),
                    settings.units,
                );
                draw_total_dose(
                    &mut display,
                    dose::total_dose(snap.cumulative, settings.units, settings.calibration),
                    settings.units,
                );
                // Change-only banner redraw
                if ui.drawn_level != Some(level) {
                    draw_alert_banner(&mut display, level);
                    ui.drawn_level = Some(level);
                    if level == AlertLevel::High {
                        warn!("High radiation level: {} CPM", sample.cpm_corrected as u32);
                    }
                }
            }

            if ui.page == Page::TimedRunning
                && let Some(report) = timed.poll(Instant::now().as_millis(), snap.cumulative)
            {
                progress = report;
                draw_timed_progress(&mut display, &progress, timed.is_completed());
                if progress.just_completed {
                    info!(
                        "Timed count done: {} counts, {} CPM",
                        progress.counts, progress.cpm as u32
                    );
                }
            }

            // Periodic log append
            if settings.logging_enabled && last_log.elapsed() >= Duration::from_secs(LOG_INTERVAL_S as u64) {
                last_log = Instant::now();
                match datalog::append(store, sample.cpm_corrected as u32) {
                    Ok(()) => log_full_reported = false,
                    Err(datalog::LogError::Full) => {
                        if !log_full_reported {
                            warn!("Log memory full; logging suspended until clear");
                            log_full_reported = true;
                            // Repaint so the header picks up the full state
                            ui.page_dirty = true;
                        }
                    }
                }
            }

            // Periodic upload-batch handoff (monitoring station only)
            if settings.monitoring_mode
                && last_upload.elapsed() >= Duration::from_secs(UPLOAD_INTERVAL_S as u64)
            {
                last_upload = Instant::now();
                let batch = upload::batch(store);
                upload_json.clear();
                match upload::write_bulk_json(UPLOAD_API_KEY, &batch, upload_json) {
                    Ok(()) => info!(
                        "Upload payload ready: {} records, {} bytes",
                        batch.len(),
                        upload_json.len()
                    ),
                    Err(_) => warn!("Upload payload overflow: {} records dropped", batch.len()),
                }
            }
        }

        // ---------------------------------------------------------------
        // Page redraw
        // ---------------------------------------------------------------
        if ui.page_dirty {
            ui.page_dirty = false;
            ui.drawn_level = None;
            clear_body(&mut display);
            let log = LogIndicator::new(settings.logging_enabled, datalog::is_full(store));
            draw_header(&mut display, ui.page, estimator.mode(), log);

            match ui.page {
                // Live readouts repaint on the next tick
                Page::Home => {}
                Page::Settings => {
                    let entries = [
                        "UNITS",
                        "ALERT THRESHOLD",
                        "CALIBRATION",
                        "DATA LOGGING",
                        "DEVICE MODE",
                        "SOUND",
                    ];
                    draw_menu(&mut display, &entries, ui.menu_cursor);
                }
                Page::Units => {
                    let active = settings.units as usize;
                    draw_toggle_page(&mut display, ["SIEVERT (uSv)", "REM (mR)"], active);
                }
                Page::AlertThreshold => {
                    draw_value_adjust(&mut display, settings.alarm_threshold as u16, "x CALIBRATION");
                }
                Page::Calibration => {
                    draw_value_adjust(&mut display, settings.calibration, "CPM PER uSv/h");
                }
                Page::Network => {
                    let active = usize::from(!settings.logging_enabled);
                    draw_toggle_page(&mut display, ["LOGGING ON", "LOGGING OFF"], active);
                }
                Page::DeviceMode => {
                    let active = usize::from(settings.monitoring_mode);
                    draw_toggle_page(&mut display, ["HANDHELD", "MONITORING STATION"], active);
                }
                Page::Sound => {
                    let active = usize::from(!settings.buzzer_enabled);
                    draw_toggle_page(&mut display, ["BUZZER ON", "BUZZER OFF"], active);
                }
                Page::TimedSetup => {
                    draw_timed_setup(&mut display, ui.timed_duration_min);
                }
                Page::TimedRunning => {
                    draw_timed_progress(&mut display, &progress, timed.is_completed());
                }
            }
        }

        Timer::after_millis(10).await;
    }
}

/// Apply one frame's button presses to the UI state machine.
///
/// Leaving a settings page persists changed bytes; returning to the home
/// page restarts estimation so readings never blend pre- and post-change
/// counts.
#[allow(clippy::too_many_arguments)]
fn handle_buttons(
    ui: &mut UiState,
    settings: &mut Settings,
    estimator: &mut RateEstimator,
    timed: &mut TimedAcquisition,
    store: &mut EepromImage,
    a: bool,
    b: bool,
    x: bool,
    y: bool,
) {
    ui.page_dirty = true;

    match ui.page {
        Page::Home => {
            if a {
                estimator.set_mode(estimator.mode().next());
                PULSE.reset_current();
                info!("Averaging window: {}", estimator.mode().label());
            }
            if b {
                ui.page = Page::TimedSetup;
            }
            if y {
                ui.page = Page::Settings;
                ui.menu_cursor = 0;
            }
        }
        Page::Settings => {
            if a {
                ui.menu_cursor = (ui.menu_cursor + 1) % SETTINGS_ENTRIES.len();
            }
            if b {
                ui.menu_cursor = ui.menu_cursor.checked_sub(1).unwrap_or(SETTINGS_ENTRIES.len() - 1);
            }
            if y {
                ui.page = SETTINGS_ENTRIES[ui.menu_cursor];
            }
        }
        Page::Units => {
            if a || b {
                settings.units = settings.units.toggle();
            }
        }
        Page::AlertThreshold => {
            if a {
                settings.adjust_alarm(false);
            }
            if b {
                settings.adjust_alarm(true);
            }
        }
        Page::Calibration => {
            if a {
                settings.adjust_calibration(false);
            }
            if b {
                settings.adjust_calibration(true);
            }
        }
        Page::Network => {
            if a || b {
                settings.logging_enabled = !settings.logging_enabled;
            }
            if y {
                datalog::clear(store);
                settings.logging_enabled = false;
                info!("Data log cleared");
            }
        }
        Page::DeviceMode => {
            if a || b {
                settings.monitoring_mode = !settings.monitoring_mode;
            }
        }
        Page::Sound => {
            if a || b {
                settings.buzzer_enabled = !settings.buzzer_enabled;
                BUZZER_ENABLED.store(settings.buzzer_enabled, Ordering::Relaxed);
            }
        }
        Page::TimedSetup => {
            if a {
                ui.timed_duration_min =
                    (ui.timed_duration_min.saturating_sub(TIMED_DURATION_STEP)).max(TIMED_DURATION_MIN);
            }
            if b {
                ui.timed_duration_min =
                    (ui.timed_duration_min + TIMED_DURATION_STEP).min(TIMED_DURATION_MAX);
            }
            if y {
                timed.start(
                    ui.timed_duration_min,
                    Instant::now().as_millis(),
                    PULSE.cumulative(),
                );
                PULSE.reset_current();
                estimator.reset();
                ui.page = Page::TimedRunning;
                info!("Timed count started: {} min", ui.timed_duration_min);
            }
        }
        Page::TimedRunning => {}
    }

    if x {
        go_back(ui, settings, estimator, timed, store);
    }
}

/// Back button: persist when leaving a settings editor, cancel a running
/// timed count, restart estimation when landing back on home. On the home
/// page itself back is the full counter reset.
fn go_back(
    ui: &mut UiState,
    settings: &Settings,
    estimator: &mut RateEstimator,
    timed: &mut TimedAcquisition,
    store: &mut EepromImage,
) {
    if ui.page == Page::Home {
        // Full reset: cumulative dose restarts from zero
        PULSE.reset_all();
        estimator.reset();
        info!("Counters reset");
        return;
    }

    if ui.page.edits_settings() && settings.save_if_changed(store) {
        info!("Settings saved");
    }
    if ui.page == Page::TimedRunning && timed.is_running() {
        timed.cancel();
        info!("Timed count cancelled");
    }

    ui.page = ui.page.parent();
    if ui.page == Page::Home {
        PULSE.reset_current();
        estimator.reset();
    }
}
