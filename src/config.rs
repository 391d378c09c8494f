//! Construction-time configuration.

use crate::addressing::Rotation;
use crate::error::GeometryError;
use crate::geometry::{PanelGeometry, PanelVariant};

/// Configuration for a [`BeLcd`](crate::BeLcd).
///
/// Geometry is fixed for the lifetime of the driver; rotation can be
/// changed later with [`BeLcd::set_rotation`](crate::BeLcd::set_rotation).
///
/// [`LcdConfig::default()`] describes a single BE10 panel with the
/// auxiliary clock off and outputs enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdConfig {
    /// Panel type. Default: BE10.
    pub variant: PanelVariant,
    /// Number of daisy-chained panels. Default: 1.
    pub panel_count: u8,
    /// Initial rotation. Default: none.
    pub rotation: Rotation,
    /// Start the auxiliary LCD clock in `init()`. Default: `false`.
    pub aux_clock_on_init: bool,
    /// Enable the register outputs in `init()`. Default: `true`.
    pub output_enabled_on_init: bool,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            variant: PanelVariant::Be10,
            panel_count: 1,
            rotation: Rotation::Deg0,
            aux_clock_on_init: false,
            output_enabled_on_init: true,
        }
    }
}

impl LcdConfig {
    /// Configuration for `panel_count` panels of `variant`, other fields
    /// at their defaults.
    pub fn new(variant: PanelVariant, panel_count: u8) -> Self {
        Self {
            variant,
            panel_count,
            ..Self::default()
        }
    }

    /// Validated geometry for this configuration.
    pub fn geometry(&self) -> Result<PanelGeometry, GeometryError> {
        PanelGeometry::new(self.variant, self.panel_count)
    }
}
