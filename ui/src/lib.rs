//! Shared display code for the GC-20 Geiger counter.
//!
//! Platform-agnostic rendering used by both the hardware firmware and the
//! desktop simulator:
//!
//! - [`colors`]: RGB565 color constants for the display
//! - [`config`]: Screen layout constants
//! - [`pages`]: Page navigation enum
//! - [`styles`]: Pre-computed text styles
//! - [`widgets`]: Readout, banner, menu, and progress drawing
//!
//! All widgets draw into a generic `DrawTarget<Color = Rgb565>`, so the same
//! code drives the ST7789 panel and the simulator window.

#![no_std]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod colors;
pub mod config;
pub mod pages;
pub mod styles;
pub mod widgets;

// Re-export commonly used items
pub use colors::*;
pub use config::*;
pub use pages::Page;
