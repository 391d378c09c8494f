//! Owned bit buffer mirroring the shift register chain.
//!
//! The buffer length is fixed at construction from the [`PanelGeometry`].
//! Bits are addressed LSB-first as produced by [`crate::addressing`].

use embedded_graphics::pixelcolor::BinaryColor;
use heapless::Vec;

use crate::addressing::BitAddress;
use crate::error::GeometryError;
use crate::geometry::{PanelGeometry, MAX_FRAMEBUFFER_LEN};

/// One register's worth of bytes (40 bits) with every pixel bit set and the
/// two guard bits at each end clear.
pub const OPAQUE_PATTERN: [u8; 5] = [0xFC, 0xFF, 0xFF, 0xFF, 0x3F];

/// State of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelState {
    /// Segment off.
    #[default]
    Clear,
    /// Segment on.
    Opaque,
}

impl From<bool> for PixelState {
    fn from(on: bool) -> Self {
        if on {
            PixelState::Opaque
        } else {
            PixelState::Clear
        }
    }
}

impl From<BinaryColor> for PixelState {
    fn from(color: BinaryColor) -> Self {
        color.is_on().into()
    }
}

impl From<PixelState> for BinaryColor {
    fn from(state: PixelState) -> Self {
        match state {
            PixelState::Clear => BinaryColor::Off,
            PixelState::Opaque => BinaryColor::On,
        }
    }
}

/// Fixed-length byte buffer for the whole daisy chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    bytes: Vec<u8, MAX_FRAMEBUFFER_LEN>,
}

impl Framebuffer {
    /// Allocate a zeroed buffer sized for `geometry`.
    ///
    /// # Errors
    ///
    /// [`GeometryError::BufferTooLarge`] if the chain needs more than
    /// [`MAX_FRAMEBUFFER_LEN`] bytes.
    pub fn new(geometry: &PanelGeometry) -> Result<Self, GeometryError> {
        let mut bytes = Vec::new();
        bytes
            .resize(geometry.buffer_len(), 0)
            .map_err(|_| GeometryError::BufferTooLarge)?;
        Ok(Self { bytes })
    }

    /// Fill the whole buffer without going through the addressing engine.
    ///
    /// `Opaque` sets every pixel bit and leaves every guard bit clear.
    pub fn fill(&mut self, state: PixelState) {
        match state {
            PixelState::Clear => self.bytes.fill(0),
            PixelState::Opaque => {
                for (byte, pattern) in self.bytes.iter_mut().zip(OPAQUE_PATTERN.iter().cycle()) {
                    *byte = *pattern;
                }
            }
        }
    }

    /// Set or clear exactly one bit.
    ///
    /// `address` is expected to come from the addressing engine for the
    /// same geometry; only the slice index is checked.
    pub fn set_bit(&mut self, address: BitAddress, state: PixelState) {
        let byte = &mut self.bytes[address.byte];
        match state {
            PixelState::Opaque => *byte |= address.mask(),
            PixelState::Clear => *byte &= !address.mask(),
        }
    }

    /// Read back a single bit.
    pub fn bit(&self, address: BitAddress) -> PixelState {
        (self.bytes[address.byte] & address.mask() != 0).into()
    }

    /// Raw buffer contents in chain order (byte 0 is shifted out last).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Buffer length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the buffer has no bytes (never the case for a valid
    /// geometry).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
