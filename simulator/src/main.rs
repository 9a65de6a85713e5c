//! GC-20 Geiger counter simulator for desktop.
//!
//! Runs the firmware's counting pipeline against a synthetic tube inside an
//! `embedded-graphics-simulator` window. Keyboard stands in for the front
//! panel:
//!
//! - **A**: minus / cursor down / cycle averaging window (Home)
//! - **B**: plus / cursor up / open timed count (Home)
//! - **X**: back (persists settings when leaving a settings page)
//! - **Y**: select / open settings (Home) / start timed count / clear log
//!
//! Upload payloads that the device would hand to its WiFi collaborator are
//! printed to stdout instead.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]

mod tube;

use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use heapless::String;

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
use gc20_ui::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
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

use crate::tube::SyntheticTube;

const FRAME_TIME: Duration = Duration::from_millis(50);

const UPLOAD_API_KEY: &str = "DEMO-KEY";

/// Frame-to-frame UI state.
struct UiState {
    page: Page,
    menu_cursor: usize,
    timed_duration_min: u16,
    drawn_level: Option<AlertLevel>,
    page_dirty: bool,
    /// Program start, the zero point of the session clock.
    start: Instant,
}

fn main() {
    let mut display: SimulatorDisplay<Rgb565> =
        SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("GC-20 Sim", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    let pulse = PulseCounter::new();
    let mut tube = SyntheticTube::new();
    let mut store = EepromImage::new();
    let mut settings = Settings::load(&store);
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
        start: Instant::now(),
    };

    let mut last_tick = Instant::now();
    let mut last_log = Instant::now();
    let mut last_upload = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ---------------------------------------------------------------
        // Keyboard events
        // ---------------------------------------------------------------
        let mut a = false;
        let mut b = false;
        let mut x = false;
        let mut y = false;
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::A => a = true,
                        Keycode::B => b = true,
                        Keycode::X => x = true,
                        Keycode::Y => y = true,
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if a || b || x || y {
            handle_buttons(
                &mut ui,
                &mut settings,
                &mut estimator,
                &mut timed,
                &pulse,
                &mut store,
                a,
                b,
                x,
                y,
            );
        }

        // ---------------------------------------------------------------
        // Synthetic tube
        // ---------------------------------------------------------------
        tube.advance(FRAME_TIME.as_secs_f32(), &pulse);

        // ---------------------------------------------------------------
        // 1 Hz estimation tick
        // ---------------------------------------------------------------
        if last_tick.elapsed() >= Duration::from_millis(TICK_MS) {
            last_tick = Instant::now();

            let snap = pulse.snapshot();
            let sample = estimator.advance(snap.current);

            let level = alert::classify(
                sample.cpm_corrected,
                settings.calibration,
                settings.alarm_threshold,
            );

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
                }
            }

            if ui.page == Page::TimedRunning
                && let Some(report) = timed.poll(ui.start.elapsed().as_millis() as u64, snap.cumulative)
            {
                progress = report;
                draw_timed_progress(&mut display, &progress, timed.is_completed());
                if progress.just_completed {
                    println!(
                        "timed count done: {} counts, {:.1} CPM",
                        progress.counts, progress.cpm
                    );
                }
            }

            // Periodic log append
            if settings.logging_enabled
                && last_log.elapsed() >= Duration::from_secs(LOG_INTERVAL_S as u64)
            {
                last_log = Instant::now();
                match datalog::append(&mut store, sample.cpm_corrected as u32) {
                    Ok(()) => log_full_reported = false,
                    Err(datalog::LogError::Full) => {
                        if !log_full_reported {
                            eprintln!("log memory full; logging suspended until clear");
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
                let batch = upload::batch(&store);
                let mut json: String<20480> = String::new();
                match upload::write_bulk_json(UPLOAD_API_KEY, &batch, &mut json) {
                    Ok(()) => println!("{json}"),
                    Err(_) => eprintln!("upload payload overflow: {} records", batch.len()),
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
            let log = LogIndicator::new(settings.logging_enabled, datalog::is_full(&store));
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

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }
}

/// Apply one frame's key presses to the UI state machine. Mirrors the
/// firmware's front-panel handling.
#[allow(clippy::too_many_arguments)]
fn handle_buttons(
    ui: &mut UiState,
    settings: &mut Settings,
    estimator: &mut RateEstimator,
    timed: &mut TimedAcquisition,
    pulse: &PulseCounter,
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
                pulse.reset_current();
                println!("averaging window: {}", estimator.mode().label());
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
                println!("data log cleared");
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
                let now_ms = ui.start.elapsed().as_millis() as u64;
                timed.start(ui.timed_duration_min, now_ms, pulse.cumulative());
                pulse.reset_current();
                estimator.reset();
                ui.page = Page::TimedRunning;
                println!("timed count started: {} min", ui.timed_duration_min);
            }
        }
        Page::TimedRunning => {}
    }

    if x {
        go_back(ui, settings, estimator, timed, pulse, store);
    }
}

/// Back key: persist when leaving a settings editor, cancel a running timed
/// count, restart estimation when landing back on home. On the home page
/// itself back is the full counter reset.
fn go_back(
    ui: &mut UiState,
    settings: &Settings,
    estimator: &mut RateEstimator,
    timed: &mut TimedAcquisition,
    pulse: &PulseCounter,
    store: &mut EepromImage,
) {
    if ui.page == Page::Home {
        pulse.reset_all();
        estimator.reset();
        println!("counters reset");
        return;
    }

    if ui.page.edits_settings() && settings.save_if_changed(store) {
        println!("settings saved");
    }
    if ui.page == Page::TimedRunning && timed.is_running() {
        timed.cancel();
        println!("timed count cancelled");
    }

    ui.page = ui.page.parent();
    if ui.page == Page::Home {
        pulse.reset_current();
        estimator.reset();
    }
}
