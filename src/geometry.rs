//! Panel geometry: the shape of a chain of BE panels.
//!
//! A BE panel is 24 rows tall and is split into a top and a bottom half of
//! 12 rows each. Every half is driven by a row of cascaded 40-bit shift
//! registers; each register carries three pixel columns (3 × 12 bits) framed
//! by two guard bits on either side. Panels whose pixel width is not a
//! multiple of three leave blank columns at the end of the register row.

use crate::error::GeometryError;

// ---------------------------------------------------------------------------
// Fixed panel constants
// ---------------------------------------------------------------------------

/// Panel height in pixels (both halves).
pub const PANEL_HEIGHT: usize = 24;

/// Rows per half (top: 0–11, bottom: 12–23).
pub const HALF_ROWS: usize = 12;

/// Bits in one shift register.
pub const BITS_PER_REGISTER: usize = 40;

/// Pixel columns carried by one shift register.
pub const COLUMNS_PER_REGISTER: usize = 3;

/// Framebuffer bytes per register position: one 40-bit register in each half.
pub const BYTES_PER_REGISTER_PAIR: usize = 10;

/// Longest supported daisy chain.
pub const MAX_PANELS: u8 = 16;

/// Framebuffer capacity: a full chain of the widest supported panel.
pub const MAX_FRAMEBUFFER_LEN: usize =
    MAX_PANELS as usize * BE11_REGISTERS as usize * BYTES_PER_REGISTER_PAIR;

/// BE10 pixel width.
pub const BE10_PANEL_WIDTH: u8 = 29;
/// BE10 registers per half.
pub const BE10_REGISTERS: u8 = 10;
/// BE11 pixel width.
pub const BE11_PANEL_WIDTH: u8 = 39;
/// BE11 registers per half.
pub const BE11_REGISTERS: u8 = 13;

// ---------------------------------------------------------------------------
// PanelVariant
// ---------------------------------------------------------------------------

/// Supported panel types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelVariant {
    /// BE10, 29 × 24 px.
    #[default]
    Be10,
    /// BE11, 39 × 24 px.
    Be11,
}

impl PanelVariant {
    /// Pixel width of a single panel.
    pub const fn panel_width_px(self) -> u8 {
        match self {
            PanelVariant::Be10 => BE10_PANEL_WIDTH,
            PanelVariant::Be11 => BE11_PANEL_WIDTH,
        }
    }

    /// Number of 40-bit registers in one half of one panel.
    pub const fn registers_per_half(self) -> u8 {
        match self {
            PanelVariant::Be10 => BE10_REGISTERS,
            PanelVariant::Be11 => BE11_REGISTERS,
        }
    }
}

// ---------------------------------------------------------------------------
// PanelGeometry
// ---------------------------------------------------------------------------

/// Immutable description of a daisy chain of identical panels.
///
/// All derived sizes are computed in `usize`, so chains whose buffer is
/// longer than 255 bytes are addressed correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGeometry {
    panel_count: u8,
    panel_width_px: u8,
    registers_per_half: u8,
}

impl PanelGeometry {
    /// Geometry for `panel_count` panels of a supported variant.
    ///
    /// # Errors
    ///
    /// [`GeometryError::NoPanels`] or [`GeometryError::TooManyPanels`] if
    /// `panel_count` is outside `1..=MAX_PANELS`.
    pub fn new(variant: PanelVariant, panel_count: u8) -> Result<Self, GeometryError> {
        Self::custom(
            variant.panel_width_px(),
            variant.registers_per_half(),
            panel_count,
        )
    }

    /// Geometry for a register-compatible panel that is not one of the
    /// predefined variants.
    ///
    /// # Errors
    ///
    /// * [`GeometryError::NoPanels`] / [`GeometryError::TooManyPanels`] for
    ///   a chain length outside `1..=MAX_PANELS`.
    /// * [`GeometryError::WidthExceedsRegisters`] if the registers cannot
    ///   carry `panel_width_px` columns.
    /// * [`GeometryError::BufferTooLarge`] if the chain does not fit into
    ///   [`MAX_FRAMEBUFFER_LEN`].
    pub fn custom(
        panel_width_px: u8,
        registers_per_half: u8,
        panel_count: u8,
    ) -> Result<Self, GeometryError> {
        if panel_count == 0 {
            return Err(GeometryError::NoPanels);
        }
        if panel_count > MAX_PANELS {
            return Err(GeometryError::TooManyPanels);
        }
        if panel_width_px == 0
            || panel_width_px as usize > registers_per_half as usize * COLUMNS_PER_REGISTER
        {
            return Err(GeometryError::WidthExceedsRegisters);
        }

        let geometry = Self {
            panel_count,
            panel_width_px,
            registers_per_half,
        };
        if geometry.buffer_len() > MAX_FRAMEBUFFER_LEN {
            return Err(GeometryError::BufferTooLarge);
        }
        Ok(geometry)
    }

    /// Number of daisy-chained panels.
    pub fn panel_count(&self) -> usize {
        self.panel_count as usize
    }

    /// Pixel width of one panel.
    pub fn panel_width_px(&self) -> usize {
        self.panel_width_px as usize
    }

    /// Registers in one half of one panel.
    pub fn registers_per_half(&self) -> usize {
        self.registers_per_half as usize
    }

    /// Register columns that carry no pixel at the end of each panel.
    pub fn blank_columns(&self) -> usize {
        self.registers_per_half() * COLUMNS_PER_REGISTER - self.panel_width_px()
    }

    /// Physical (unrotated) width of the whole chain in pixels.
    pub fn width(&self) -> usize {
        self.panel_width_px() * self.panel_count()
    }

    /// Physical height in pixels.
    pub fn height(&self) -> usize {
        PANEL_HEIGHT
    }

    /// Bits occupied by one half of one panel.
    pub fn bits_per_panel_half(&self) -> usize {
        self.registers_per_half() * BITS_PER_REGISTER
    }

    /// Framebuffer length in bytes.
    pub fn buffer_len(&self) -> usize {
        self.panel_count() * self.registers_per_half() * BYTES_PER_REGISTER_PAIR
    }

    /// Bit offset where the bottom half starts.
    pub fn half_bits(&self) -> usize {
        self.buffer_len() * 4
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
