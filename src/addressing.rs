//! Pixel coordinate → framebuffer bit mapping.
//!
//! The register chain is not a linear bitmap. Translating a pixel address
//! into a bit position has to account for:
//!
//! - the display rotation (applied first, as a pure coordinate transform);
//! - the top/bottom split: the bottom half occupies the second half of the
//!   buffer and is wired from the far end of the chain, so it is addressed
//!   as a mirror image of the top half;
//! - the panel that owns the column within the daisy chain;
//! - guard bits: each 40-bit register carries three 12-bit columns framed
//!   by two guard bits on either side;
//! - the controller's row scan order, which runs 11..6 then 0..5 within a
//!   column rather than monotonically.
//!
//! ```text
//!  register r (40 bits, LSB first)
//!  ┌──┬────────────┬────────────┬────────────┬──┐
//!  │gg│  column 0  │  column 1  │  column 2  │gg│
//!  └──┴────────────┴────────────┴────────────┴──┘
//!   0 1 2        13 14        25 26        37 38 39
//!  column bits: rows 11,10,9,8,7,6,0,1,2,3,4,5
//! ```

use crate::geometry::{PanelGeometry, BITS_PER_REGISTER, COLUMNS_PER_REGISTER, HALF_ROWS};

/// Leading guard bits before the first column of a register.
const LEADING_GUARD_BITS: usize = 2;

/// Bits used by one column (one per row of a half).
const BITS_PER_COLUMN: usize = HALF_ROWS;

/// Guard bits between the last column of a register and the first column
/// of the next one.
const INTER_REGISTER_GUARD_BITS: usize =
    BITS_PER_REGISTER - COLUMNS_PER_REGISTER * BITS_PER_COLUMN;

/// Display orientation.
///
/// Only four quarter turns exist; other angles are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// 90° clockwise.
    Deg90,
    /// 180°.
    Deg180,
    /// 270° clockwise.
    Deg270,
}

impl Rotation {
    /// Rotation from a number of clockwise quarter turns, taken mod 4.
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    /// `true` for 90° and 270°, where logical width and height swap.
    pub const fn is_transposed(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Position of a single bit in the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitAddress {
    /// Byte index into the framebuffer.
    pub byte: usize,
    /// Bit within the byte, 0 = least significant.
    pub bit: u8,
}

impl BitAddress {
    /// Split a linear bit index into byte and bit.
    pub const fn from_bit_index(index: usize) -> Self {
        Self {
            byte: index >> 3,
            bit: (index & 7) as u8,
        }
    }

    /// Linear bit index.
    pub const fn bit_index(&self) -> usize {
        (self.byte << 3) | self.bit as usize
    }

    /// Single-bit mask within the owning byte.
    pub const fn mask(&self) -> u8 {
        1 << self.bit
    }
}

/// Logical `(width, height)` of the chain as seen through `rotation`.
pub fn logical_size(rotation: Rotation, geometry: &PanelGeometry) -> (usize, usize) {
    if rotation.is_transposed() {
        (geometry.height(), geometry.width())
    } else {
        (geometry.width(), geometry.height())
    }
}

/// Map logical coordinates to physical (unrotated) coordinates.
///
/// The inputs must already be within the logical bounds for `rotation`.
pub fn rotate(x: usize, y: usize, rotation: Rotation, geometry: &PanelGeometry) -> (usize, usize) {
    let width = geometry.width();
    let height = geometry.height();
    match rotation {
        Rotation::Deg0 => (x, y),
        Rotation::Deg90 => (width - y - 1, x),
        Rotation::Deg180 => (width - x - 1, height - y - 1),
        Rotation::Deg270 => (y, height - x - 1),
    }
}

/// Linear framebuffer bit index of logical pixel `(x, y)`.
///
/// Returns `None` when the pixel lies outside the logical display area.
pub fn bit_index(x: i32, y: i32, rotation: Rotation, geometry: &PanelGeometry) -> Option<usize> {
    let (logical_width, logical_height) = logical_size(rotation, geometry);
    let x = usize::try_from(x).ok().filter(|&x| x < logical_width)?;
    let y = usize::try_from(y).ok().filter(|&y| y < logical_height)?;

    let (mut x, mut y) = rotate(x, y, rotation, geometry);
    let mut offset = 0;

    // Bottom half: mirrored, second half of the buffer.
    if y >= HALF_ROWS {
        y = geometry.height() - 1 - y;
        x = geometry.width() - 1 - x;
        offset += geometry.half_bits();
    }

    let panel = x / geometry.panel_width_px();
    offset += panel * geometry.bits_per_panel_half() + LEADING_GUARD_BITS;

    let column = x % geometry.panel_width_px();
    offset += (column / COLUMNS_PER_REGISTER) * INTER_REGISTER_GUARD_BITS + column * BITS_PER_COLUMN;

    offset += if y < HALF_ROWS / 2 {
        HALF_ROWS / 2 + y
    } else {
        HALF_ROWS - 1 - y
    };

    Some(offset)
}

/// [`bit_index`] split into byte and bit.
pub fn bit_address(x: i32, y: i32, rotation: Rotation, geometry: &PanelGeometry) -> Option<BitAddress> {
    bit_index(x, y, rotation, geometry).map(BitAddress::from_bit_index)
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::geometry::{PanelVariant, MAX_PANELS};

    const ROTATIONS: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    fn be10(panels: u8) -> PanelGeometry {
        PanelGeometry::new(PanelVariant::Be10, panels).unwrap()
    }

    fn be11(panels: u8) -> PanelGeometry {
        PanelGeometry::new(PanelVariant::Be11, panels).unwrap()
    }

    fn is_guard_bit(index: usize) -> bool {
        matches!(index % BITS_PER_REGISTER, 0 | 1 | 38 | 39)
    }

    /// Every in-bounds pixel for every rotation: unique, in range, never a
    /// guard bit.
    fn assert_mapping_is_injective(geometry: &PanelGeometry) {
        let total_bits = geometry.buffer_len() * 8;
        for rotation in ROTATIONS {
            let (w, h) = logical_size(rotation, geometry);
            let mut seen = HashSet::new();
            for y in 0..h as i32 {
                for x in 0..w as i32 {
                    let index = bit_index(x, y, rotation, geometry)
                        .unwrap_or_else(|| panic!("({}, {}) rejected at {:?}", x, y, rotation));
                    assert!(index < total_bits, "({}, {}) → {} out of range", x, y, index);
                    assert!(!is_guard_bit(index), "({}, {}) → guard bit {}", x, y, index);
                    assert!(seen.insert(index), "({}, {}) aliases bit {}", x, y, index);
                }
            }
            assert_eq!(seen.len(), w * h);
        }
    }

    // ── Known positions ──────────────────────────────────────────────

    #[test]
    fn origin_maps_to_byte_1_bit_0() {
        let g = be10(1);
        assert_eq!(bit_index(0, 0, Rotation::Deg0, &g), Some(8));
        assert_eq!(
            bit_address(0, 0, Rotation::Deg0, &g),
            Some(BitAddress { byte: 1, bit: 0 })
        );
    }

    #[test]
    fn row_scan_order_is_mirrored() {
        let g = be10(1);
        // Rows 6..11 count down from the first column bit, rows 0..5 up.
        assert_eq!(bit_index(0, 11, Rotation::Deg0, &g), Some(2));
        assert_eq!(bit_index(0, 6, Rotation::Deg0, &g), Some(7));
        assert_eq!(bit_index(0, 5, Rotation::Deg0, &g), Some(13));
    }

    #[test]
    fn register_boundary_skips_guard_bits() {
        let g = be10(1);
        // Column 2 ends at bit 37, column 3 starts after the next
        // register's leading guard bits.
        assert_eq!(bit_index(2, 5, Rotation::Deg0, &g), Some(37));
        assert_eq!(bit_index(3, 11, Rotation::Deg0, &g), Some(42));
    }

    #[test]
    fn bottom_half_is_mirrored_into_second_half() {
        let g = be10(1);
        // (28, 23) mirrors (0, 0) into the bottom half.
        assert_eq!(bit_index(28, 23, Rotation::Deg0, &g), Some(400 + 8));
        assert_eq!(bit_index(28, 12, Rotation::Deg0, &g), Some(400 + 2));
    }

    #[test]
    fn second_panel_starts_after_first_panel_half() {
        let g = be10(2);
        assert_eq!(bit_index(29, 0, Rotation::Deg0, &g), Some(400 + 8));
        // The bottom half starts after both panels' top halves.
        assert_eq!(g.half_bits(), 800);
        assert_eq!(bit_index(57, 23, Rotation::Deg0, &g), Some(800 + 8));
    }

    // ── Bounds ───────────────────────────────────────────────────────

    #[test]
    fn out_of_bounds_is_none() {
        let g = be10(1);
        assert_eq!(bit_index(-1, 0, Rotation::Deg0, &g), None);
        assert_eq!(bit_index(0, -1, Rotation::Deg0, &g), None);
        assert_eq!(bit_index(29, 0, Rotation::Deg0, &g), None);
        assert_eq!(bit_index(0, 24, Rotation::Deg0, &g), None);
    }

    #[test]
    fn bounds_follow_rotation() {
        let g = be10(1);
        // 24 × 29 when transposed.
        assert!(bit_index(23, 28, Rotation::Deg90, &g).is_some());
        assert_eq!(bit_index(24, 0, Rotation::Deg90, &g), None);
        assert_eq!(bit_index(0, 29, Rotation::Deg270, &g), None);
        assert!(bit_index(28, 23, Rotation::Deg180, &g).is_some());
    }

    // ── Rotation ─────────────────────────────────────────────────────

    #[test]
    fn rotation_transforms() {
        let g = be10(1);
        assert_eq!(rotate(0, 0, Rotation::Deg90, &g), (28, 0));
        assert_eq!(rotate(0, 0, Rotation::Deg180, &g), (28, 23));
        assert_eq!(rotate(0, 0, Rotation::Deg270, &g), (0, 23));
        assert_eq!(rotate(5, 7, Rotation::Deg0, &g), (5, 7));
    }

    #[test]
    fn rotate_180_twice_is_identity() {
        let g = be11(2);
        for y in 0..g.height() {
            for x in 0..g.width() {
                let (rx, ry) = rotate(x, y, Rotation::Deg180, &g);
                assert_eq!(rotate(rx, ry, Rotation::Deg180, &g), (x, y));
            }
        }
    }

    #[test]
    fn rotated_corners_address_physical_corners() {
        let g = be10(1);
        let top_left = bit_index(0, 0, Rotation::Deg0, &g);
        // The logical pixel that lands on the physical origin per rotation.
        assert_eq!(bit_index(0, 28, Rotation::Deg90, &g), top_left);
        assert_eq!(bit_index(28, 23, Rotation::Deg180, &g), top_left);
        assert_eq!(bit_index(23, 0, Rotation::Deg270, &g), top_left);
    }

    #[test]
    fn quarter_turns_wrap() {
        assert_eq!(Rotation::from_quarter_turns(0), Rotation::Deg0);
        assert_eq!(Rotation::from_quarter_turns(3), Rotation::Deg270);
        assert_eq!(Rotation::from_quarter_turns(6), Rotation::Deg180);
    }

    // ── Injectivity ──────────────────────────────────────────────────

    #[test]
    fn be10_single_panel_is_injective() {
        assert_mapping_is_injective(&be10(1));
    }

    #[test]
    fn be11_chain_is_injective() {
        assert_mapping_is_injective(&be11(3));
    }

    #[test]
    fn longest_be10_chain_is_injective() {
        assert_mapping_is_injective(&be10(MAX_PANELS));
    }

    #[test]
    fn bit_address_round_trip() {
        let address = BitAddress::from_bit_index(413);
        assert_eq!(address, BitAddress { byte: 51, bit: 5 });
        assert_eq!(address.bit_index(), 413);
        assert_eq!(address.mask(), 0b0010_0000);
    }
}
