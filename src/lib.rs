//! Driver for AEG BE10 (29×24) and BE11 (39×24) COG segment LCD panels.
//!
//! The panels are driven through cascaded 40-bit shift registers. This
//! crate maps pixel coordinates onto the fragmented register layout,
//! keeps an in-memory image of the whole daisy chain and shifts it out over
//! SPI, latching it in one edge so partial frames are never visible.
//!
//! # Quick Start
//!
//! ```ignore
//! use aeg_be_display_rs::{BeLcd, LcdConfig, PanelVariant, PwmClock, SPI_FREQUENCY_HZ};
//!
//! // SPI bus configured for SPI_FREQUENCY_HZ, SPI_MODE; PWM at AUX_CLOCK_HZ.
//! let config = LcdConfig::new(PanelVariant::Be10, 2);
//! let mut lcd = BeLcd::new(spi, latch, enable, PwmClock::new(pwm), config)?;
//! lcd.init()?;
//! lcd.set_auxiliary_clock(true)?;
//!
//! // Draw with embedded-graphics, then present the frame.
//! Text::new("12:34", Point::new(0, 16), style).draw(&mut lcd)?;
//! lcd.flush()?;
//! ```
//!
//! # Wiring
//!
//! | Panel pin | Signal      | Driver side                  |
//! |-----------|-------------|------------------------------|
//! | 1         | DATA in     | SPI MOSI                     |
//! | 5         | ENABLE      | `enable` pin (active low)    |
//! | 6         | LCD CLOCK   | [`AuxiliaryClock`]           |
//! | 7         | LATCH       | `latch` pin                  |
//! | 8         | DATA CLOCK  | SPI SCK                      |
//! | 9         | DATA out    | DATA in of the next panel    |
//!
//! Pins 2–4 are 5 V, 10 V and GND.
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`] and `defmt::Format`
//!   implementations on public types.

#![cfg_attr(not(test), no_std)]

pub mod addressing;
pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod link;

#[cfg(test)]
mod testing;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use addressing::{BitAddress, Rotation};
pub use clock::{AuxiliaryClock, NoClock, PwmClock, AUX_CLOCK_HZ};
pub use config::LcdConfig;
pub use driver::BeLcd;
pub use error::{GeometryError, LcdError};
pub use framebuffer::PixelState;
pub use geometry::{PanelGeometry, PanelVariant};
pub use link::{SPI_FREQUENCY_HZ, SPI_MODE};
