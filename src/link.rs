//! Serial link to the shift register chain.
//!
//! The chain is a plain SPI-style shift register: data is clocked in on
//! the data/clock lines and becomes visible only on the rising edge of the
//! latch line. A frame is therefore always sent as:
//!
//! 1. latch low (staging);
//! 2. every framebuffer byte, last byte first;
//! 3. bus flush;
//! 4. latch high (present).
//!
//! If any step fails the latch stays low and the panel keeps showing the
//! previously latched frame.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Mode, SpiBus, MODE_0};

use crate::error::LcdError;

/// SPI clock the bus must be configured with.
///
/// The registers are timing sensitive; faster clocks corrupt frames.
pub const SPI_FREQUENCY_HZ: u32 = 100_000;

/// SPI mode the bus must be configured with (MSB first).
pub const SPI_MODE: Mode = MODE_0;

/// Bytes reversed into the stack buffer per bus write.
const CHUNK_SIZE: usize = 32;

/// Owns the SPI bus and the latch line.
pub struct ShiftRegisterLink<SPI, LATCH> {
    spi: SPI,
    latch: LATCH,
}

impl<SPI, LATCH> ShiftRegisterLink<SPI, LATCH> {
    /// Wrap a bus and latch pin. No bus or pin traffic.
    pub fn new(spi: SPI, latch: LATCH) -> Self {
        Self { spi, latch }
    }

    /// Give back the bus and latch pin.
    pub fn release(self) -> (SPI, LATCH) {
        (self.spi, self.latch)
    }
}

impl<SPI, LATCH> ShiftRegisterLink<SPI, LATCH>
where
    SPI: SpiBus<u8>,
    LATCH: OutputPin,
{
    /// Drive the latch low so the chain accepts new data.
    pub fn stage(&mut self) -> Result<(), LcdError<SPI::Error, LATCH::Error>> {
        self.latch.set_low().map_err(LcdError::Latch)
    }

    /// Shift `frame` into the chain and latch it.
    ///
    /// Bytes go out from `frame[len - 1]` down to `frame[0]`, since the
    /// chain fills from the far end.
    pub fn transmit(&mut self, frame: &[u8]) -> Result<(), LcdError<SPI::Error, LATCH::Error>> {
        self.stage()?;

        let mut buffer = [0u8; CHUNK_SIZE];
        for chunk in frame.rchunks(CHUNK_SIZE) {
            let out = &mut buffer[..chunk.len()];
            for (dst, src) in out.iter_mut().zip(chunk.iter().rev()) {
                *dst = *src;
            }
            self.spi.write(out).map_err(LcdError::Spi)?;
        }
        self.spi.flush().map_err(LcdError::Spi)?;

        self.latch.set_high().map_err(LcdError::Latch)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
