//! GC-20 count-rate estimation engine.
//!
//! This library contains the counting and estimation pipeline of the GC-20
//! Geiger counter, kept free of any display, touch, or network code so it
//! can be tested on the host machine:
//!
//! - [`pulse`]: interrupt-safe debounced pulse tally
//! - [`ring`]: fixed-capacity sliding-window snapshot buffer
//! - [`estimator`]: multi-window CPM estimation with dead-time correction
//! - [`dose`]: dose-rate / total-dose conversion and display formatting
//! - [`alert`]: three-level alert classification
//! - [`timed`]: one-shot timed counting session
//! - [`settings`]: persistent device settings over a byte store
//! - [`datalog`]: fixed-width periodic record log
//! - [`upload`]: upload batch production from logged records
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p gc20-core
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the
//! standard test framework while the firmware consumes this crate as
//! `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub mod alert;
pub mod config;
pub mod datalog;
pub mod dose;
pub mod estimator;
pub mod pulse;
pub mod ring;
pub mod settings;
pub mod timed;
pub mod upload;

// Re-export the types the binaries touch every frame
pub use alert::AlertLevel;
pub use dose::DoseUnits;
pub use estimator::{IntegrationMode, RateEstimator, RateSample};
pub use pulse::{DebouncePolicy, PulseCounter, TallySnapshot};
pub use settings::Settings;
pub use timed::TimedAcquisition;
