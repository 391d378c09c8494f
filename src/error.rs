//! Error types for the BE LCD driver.

use core::fmt;

/// Invalid chain description, reported at construction.
///
/// A driver is never created with a missing or undersized framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryError {
    /// Panel count is zero.
    NoPanels,
    /// Panel count exceeds [`MAX_PANELS`](crate::geometry::MAX_PANELS).
    TooManyPanels,
    /// The registers of one half cannot carry the panel's pixel columns.
    WidthExceedsRegisters,
    /// The framebuffer would exceed
    /// [`MAX_FRAMEBUFFER_LEN`](crate::geometry::MAX_FRAMEBUFFER_LEN).
    BufferTooLarge,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeometryError::NoPanels => write!(f, "Panel count must be at least 1"),
            GeometryError::TooManyPanels => write!(f, "Too many daisy-chained panels"),
            GeometryError::WidthExceedsRegisters => {
                write!(f, "Panel width exceeds register capacity (3 columns per register)")
            }
            GeometryError::BufferTooLarge => write!(f, "Framebuffer exceeds capacity"),
        }
    }
}

/// Errors that can occur while driving the panel chain.
///
/// Generic over the SPI bus error `S` and the GPIO pin error `P`.
#[derive(Debug)]
pub enum LcdError<S, P> {
    /// Underlying SPI bus error.
    Spi(S),
    /// Latch line could not be driven.
    Latch(P),
    /// Output-enable line could not be driven.
    Enable(P),
    /// The auxiliary clock output rejected the requested state.
    Clock,
    /// A hardware operation was attempted before
    /// [`BeLcd::init()`](crate::BeLcd::init).
    NotInitialized,
}

impl<S: fmt::Debug, P: fmt::Debug> fmt::Display for LcdError<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LcdError::Spi(e) => write!(f, "SPI error: {:?}", e),
            LcdError::Latch(e) => write!(f, "Latch pin error: {:?}", e),
            LcdError::Enable(e) => write!(f, "Enable pin error: {:?}", e),
            LcdError::Clock => write!(f, "Auxiliary clock error"),
            LcdError::NotInitialized => write!(f, "Driver not initialized"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<S: defmt::Format, P: defmt::Format> defmt::Format for LcdError<S, P> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            LcdError::Spi(e) => defmt::write!(f, "SPI error: {}", e),
            LcdError::Latch(e) => defmt::write!(f, "Latch pin error: {}", e),
            LcdError::Enable(e) => defmt::write!(f, "Enable pin error: {}", e),
            LcdError::Clock => defmt::write!(f, "Auxiliary clock error"),
            LcdError::NotInitialized => defmt::write!(f, "Not initialized"),
        }
    }
}
