//! Minute/second counter on two BE10 panels
//!
//! Standalone hardware demonstration that exercises [`BeLcd`] directly.
//! Counts up once per second and renders `MM:SS` across a 58 × 24 px chain
//! of two daisy-chained BE10 panels.
//!
//! # Wiring
//!
//! | Signal        | Pico 2 Pin | Panel pin | Notes                     |
//! |---------------|------------|-----------|---------------------------|
//! | SPI0 SCK      | GP18       | 8         | 100 kHz, mode 0           |
//! | SPI0 MOSI     | GP19       | 1         |                           |
//! | LATCH         | GP20       | 7         |                           |
//! | ENABLE        | GP21       | 5         | active low                |
//! | LCD CLOCK     | GP3        | 6         | PWM slice 1 B, ~61 Hz     |
//! | 5 V / 10 V    | —          | 2 / 3     | external supply           |
//! | GND           | GND        | 4         |                           |
//!
//! Panel pin 9 (DATA out) of the first panel feeds pin 1 of the second.

#![no_std]
#![no_main]

use core::fmt::Write;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Text};
use heapless::String;

use aeg_be_display_rs::{
    BeLcd, LcdConfig, PanelVariant, PwmClock, AUX_CLOCK_HZ, SPI_FREQUENCY_HZ,
};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

/// RP2350 system clock feeding the PWM slices.
const SYS_CLOCK_HZ: u32 = 150_000_000;

/// Integer PWM divider for the LCD clock (maximum supported).
const PWM_DIVIDER: u8 = 255;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("BE10 clock demo starting");

    // --- SPI0, TX only (GP18 = SCK, GP19 = MOSI) ---
    let mut spi_config = spi::Config::default();
    spi_config.frequency = SPI_FREQUENCY_HZ;
    spi_config.phase = spi::Phase::CaptureOnFirstTransition;
    spi_config.polarity = spi::Polarity::IdleLow;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);

    let latch = Output::new(p.PIN_20, Level::Low);
    let enable = Output::new(p.PIN_21, Level::High);

    // --- LCD clock: PWM slice 1 channel B on GP3 ---
    let mut pwm_config = pwm::Config::default();
    pwm_config.divider = PWM_DIVIDER.into();
    pwm_config.top = (SYS_CLOCK_HZ / (PWM_DIVIDER as u32 * AUX_CLOCK_HZ) - 1) as u16;
    let pwm = Pwm::new_output_b(p.PWM_SLICE1, p.PIN_3, pwm_config);
    let (_, lcd_clock) = pwm.split();
    let lcd_clock = unwrap!(lcd_clock);

    let config = LcdConfig {
        aux_clock_on_init: true,
        ..LcdConfig::new(PanelVariant::Be10, 2)
    };
    let mut lcd = unwrap!(BeLcd::new(spi, latch, enable, PwmClock::new(lcd_clock), config)
        .map_err(|_| "invalid panel chain"));

    if lcd.init().is_err() {
        error!("LCD init failed");
        return;
    }
    info!("LCD initialised: {}x{} px", lcd.width(), lcd.height());

    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let centre = Point::new(lcd.width() as i32 / 2, 15);
    let mut seconds: u32 = 0;

    loop {
        let mut text: String<8> = String::new();
        let _ = write!(text, "{:02}:{:02}", (seconds / 60) % 100, seconds % 60);

        lcd.clear_buffer();
        Text::with_alignment(text.as_str(), centre, style, Alignment::Center)
            .draw(&mut lcd)
            .ok();

        if lcd.flush().is_err() {
            warn!("LCD flush failed");
        }

        seconds = seconds.wrapping_add(1);
        Timer::after(Duration::from_secs(1)).await;
    }
}
