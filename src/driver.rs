//! Driver for a daisy chain of AEG BE panels.
//!
//! [`BeLcd`] ties together the addressing engine, the framebuffer, the
//! serial link and the auxiliary clock, and implements the
//! `embedded-graphics` [`DrawTarget`] so shapes and text can be drawn
//! without knowledge of the register layout.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, Pixel};
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::addressing::{bit_address, logical_size, Rotation};
use crate::clock::AuxiliaryClock;
use crate::config::LcdConfig;
use crate::error::{GeometryError, LcdError};
use crate::framebuffer::{Framebuffer, PixelState};
use crate::geometry::PanelGeometry;
use crate::link::ShiftRegisterLink;

/// Driver for one chain of BE10/BE11 panels.
///
/// # Lifecycle
///
/// 1. [`BeLcd::new()`]: validates the geometry and allocates the
///    framebuffer; no bus or pin traffic.
/// 2. [`BeLcd::init()`]: stages the latch and applies the configured
///    output-enable and auxiliary clock states.
/// 3. Draw into the framebuffer with [`BeLcd::set_pixel()`],
///    [`BeLcd::fill()`] or any `embedded-graphics` drawable.
/// 4. [`BeLcd::flush()`]: shifts the whole framebuffer out and latches it.
///
/// # Pins
///
/// * `latch`: rising edge copies the shift registers to the outputs.
/// * `enable`: register output enable, active low.
///
/// # Example
///
/// ```no_run
/// use aeg_be_display_rs::{BeLcd, LcdConfig, NoClock, PanelVariant};
/// use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::*};
///
/// # fn example<SPI, P>(spi: SPI, latch: P, enable: P)
/// # where SPI: embedded_hal::spi::SpiBus, P: embedded_hal::digital::OutputPin {
/// let config = LcdConfig::new(PanelVariant::Be11, 2);
/// let mut lcd = BeLcd::new(spi, latch, enable, NoClock, config).unwrap();
/// lcd.init().ok();
///
/// Rectangle::new(Point::new(2, 2), Size::new(20, 10))
///     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
///     .draw(&mut lcd)
///     .ok();
/// lcd.flush().ok();
/// # }
/// ```
pub struct BeLcd<SPI, LATCH, EN, CLK> {
    link: ShiftRegisterLink<SPI, LATCH>,
    enable: EN,
    clock: CLK,
    config: LcdConfig,
    geometry: PanelGeometry,
    framebuffer: Framebuffer,
    rotation: Rotation,
    /// Set after a successful `init()`; guards `flush()`.
    initialized: bool,
}

impl<SPI, LATCH, EN, CLK> BeLcd<SPI, LATCH, EN, CLK> {
    /// Construct an uninitialised driver.
    ///
    /// # Errors
    ///
    /// Any [`GeometryError`] from the configured chain. The driver never
    /// exists without a correctly sized framebuffer.
    pub fn new(
        spi: SPI,
        latch: LATCH,
        enable: EN,
        clock: CLK,
        config: LcdConfig,
    ) -> Result<Self, GeometryError> {
        let geometry = config.geometry()?;
        let framebuffer = Framebuffer::new(&geometry)?;

        Ok(Self {
            link: ShiftRegisterLink::new(spi, latch),
            enable,
            clock,
            config,
            geometry,
            framebuffer,
            rotation: config.rotation,
            initialized: false,
        })
    }

    // -----------------------------------------------------------------------
    // Framebuffer operations (no bus traffic)
    // -----------------------------------------------------------------------

    /// Set a single pixel. Coordinates outside the rotated display area
    /// are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, state: PixelState) {
        if let Some(address) = bit_address(x, y, self.rotation, &self.geometry) {
            self.framebuffer.set_bit(address, state);
        }
    }

    /// Current state of a pixel, `None` if out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<PixelState> {
        bit_address(x, y, self.rotation, &self.geometry).map(|a| self.framebuffer.bit(a))
    }

    /// Fill the whole framebuffer. Guard bits stay clear.
    pub fn fill(&mut self, state: PixelState) {
        self.framebuffer.fill(state);
    }

    /// Clear the framebuffer. The panel is unchanged until
    /// [`flush()`](Self::flush).
    pub fn clear_buffer(&mut self) {
        self.fill(PixelState::Clear);
    }

    /// Change the orientation used for subsequent pixel operations.
    ///
    /// Pixels already in the framebuffer are not moved.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Rotation set to {}", rotation);
        self.rotation = rotation;
    }

    /// Current orientation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Logical width in pixels for the current rotation.
    pub fn width(&self) -> usize {
        logical_size(self.rotation, &self.geometry).0
    }

    /// Logical height in pixels for the current rotation.
    pub fn height(&self) -> usize {
        logical_size(self.rotation, &self.geometry).1
    }

    /// Geometry of the panel chain.
    pub fn geometry(&self) -> &PanelGeometry {
        &self.geometry
    }

    /// Raw framebuffer in chain order.
    pub fn framebuffer(&self) -> &[u8] {
        self.framebuffer.as_bytes()
    }

    /// Whether [`init()`](Self::init) has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Consume the driver and give back its peripherals as
    /// `(spi, latch, enable, clock)`.
    pub fn release(self) -> (SPI, LATCH, EN, CLK) {
        let (spi, latch) = self.link.release();
        (spi, latch, self.enable, self.clock)
    }
}

impl<SPI, LATCH, EN, CLK> BeLcd<SPI, LATCH, EN, CLK>
where
    SPI: SpiBus<u8>,
    LATCH: OutputPin,
    EN: OutputPin<Error = LATCH::Error>,
    CLK: AuxiliaryClock,
{
    /// Bring the control lines into their idle state.
    ///
    /// Drives the latch low, sets the register outputs and the auxiliary
    /// clock as configured in [`LcdConfig`].
    ///
    /// # Errors
    ///
    /// [`LcdError::Latch`] / [`LcdError::Enable`] if a control line cannot
    /// be driven, [`LcdError::Clock`] if the clock output rejects the
    /// requested state.
    pub fn init(&mut self) -> Result<(), LcdError<SPI::Error, LATCH::Error>> {
        self.link.stage()?;

        if self.config.output_enabled_on_init {
            self.enable_output()?;
        } else {
            self.disable_output()?;
        }

        self.clock
            .set_enabled(self.config.aux_clock_on_init)
            .map_err(|_| LcdError::Clock)?;

        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "BE LCD initialised: {}x{} px, {} bytes",
            self.geometry.width(),
            self.geometry.height(),
            self.geometry.buffer_len()
        );

        Ok(())
    }

    /// Shift the whole framebuffer into the chain and latch it.
    ///
    /// On failure the panel keeps showing the previously latched frame.
    ///
    /// # Errors
    ///
    /// [`LcdError::NotInitialized`] before [`init()`](Self::init);
    /// otherwise the first bus or latch error encountered.
    pub fn flush(&mut self) -> Result<(), LcdError<SPI::Error, LATCH::Error>> {
        if !self.initialized {
            return Err(LcdError::NotInitialized);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("Flushing {} bytes", self.framebuffer.len());

        self.link.transmit(self.framebuffer.as_bytes())
    }

    /// Enable the register outputs (drives the enable line low).
    pub fn enable_output(&mut self) -> Result<(), LcdError<SPI::Error, LATCH::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Register outputs enabled");
        self.enable.set_low().map_err(LcdError::Enable)
    }

    /// Disable the register outputs (drives the enable line high).
    pub fn disable_output(&mut self) -> Result<(), LcdError<SPI::Error, LATCH::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Register outputs disabled");
        self.enable.set_high().map_err(LcdError::Enable)
    }
}

impl<SPI, LATCH, EN, CLK> BeLcd<SPI, LATCH, EN, CLK>
where
    CLK: AuxiliaryClock,
{
    /// Start or stop the auxiliary LCD clock. Independent of pixel data
    /// and of [`flush()`](Self::flush).
    pub fn set_auxiliary_clock(&mut self, enabled: bool) -> Result<(), CLK::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Auxiliary clock {}", if enabled { "on" } else { "off" });
        self.clock.set_enabled(enabled)
    }
}

// ── embedded-graphics ────────────────────────────────────────────────────

impl<SPI, LATCH, EN, CLK> OriginDimensions for BeLcd<SPI, LATCH, EN, CLK> {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}

impl<SPI, LATCH, EN, CLK> DrawTarget for BeLcd<SPI, LATCH, EN, CLK> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.into());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into());
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
