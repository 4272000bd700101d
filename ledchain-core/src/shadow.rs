//! Shadow bitmap
//!
//! The chips have no read path, so the last byte written to every digit/row
//! register lives here. Partial updates (a single LED) read-modify-write
//! through this buffer and then send the whole byte.

use ledchain_protocol::{MAX_DEVICES, ROWS_PER_DEVICE};

/// Total shadow size for a full chain
pub const SHADOW_SIZE: usize = MAX_DEVICES * ROWS_PER_DEVICE;

/// In-memory mirror of every digit/row register in the chain
///
/// Indexed by `device * 8 + row`. Every accessor validates the device
/// against the chain length and the row/column against 0-7, returning
/// `None` instead of touching anything when either is out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowBitmap {
    rows: [u8; SHADOW_SIZE],
    device_count: u8,
}

impl ShadowBitmap {
    /// Create a zeroed bitmap for `device_count` devices (clamped to 1..=8)
    pub fn new(device_count: u8) -> Self {
        Self {
            rows: [0; SHADOW_SIZE],
            device_count: device_count.clamp(1, MAX_DEVICES as u8),
        }
    }

    /// Number of devices covered
    pub fn device_count(&self) -> u8 {
        self.device_count
    }

    /// Shadow offset for `(device, row)`
    pub fn offset(&self, device: u8, row: u8) -> Option<usize> {
        if device >= self.device_count || row as usize >= ROWS_PER_DEVICE {
            return None;
        }
        Some(device as usize * ROWS_PER_DEVICE + row as usize)
    }

    /// Last byte written to `(device, row)`
    pub fn row(&self, device: u8, row: u8) -> Option<u8> {
        self.offset(device, row).map(|offset| self.rows[offset])
    }

    /// Overwrite `(device, row)`, returning the stored byte
    pub fn set_row(&mut self, device: u8, row: u8, value: u8) -> Option<u8> {
        let offset = self.offset(device, row)?;
        self.rows[offset] = value;
        Some(value)
    }

    /// Set or clear one LED, returning the updated row byte
    ///
    /// Column 0 is the most significant bit of the row byte.
    pub fn set_bit(&mut self, device: u8, row: u8, column: u8, on: bool) -> Option<u8> {
        let value = self.with_bit(device, row, column, on)?;
        self.set_row(device, row, value)
    }

    /// Row byte `(device, row)` would hold with one LED changed, without storing it
    pub fn with_bit(&self, device: u8, row: u8, column: u8, on: bool) -> Option<u8> {
        if column as usize >= ROWS_PER_DEVICE {
            return None;
        }
        let byte = self.row(device, row)?;

        let mask = 0x80 >> column;
        Some(if on { byte | mask } else { byte & !mask })
    }

    /// State of one LED
    pub fn bit(&self, device: u8, row: u8, column: u8) -> Option<bool> {
        if column as usize >= ROWS_PER_DEVICE {
            return None;
        }
        self.row(device, row).map(|byte| byte & (0x80 >> column) != 0)
    }

    /// Zero all rows of `device`
    pub fn clear_device(&mut self, device: u8) -> Option<()> {
        let start = self.offset(device, 0)?;
        self.rows[start..start + ROWS_PER_DEVICE].fill(0);
        Some(())
    }

    /// The 8 rows of `device`
    pub fn device_rows(&self, device: u8) -> Option<&[u8]> {
        let start = self.offset(device, 0)?;
        Some(&self.rows[start..start + ROWS_PER_DEVICE])
    }

    /// Shadow bytes for the devices in the chain, device 0 row 0 first
    pub fn as_slice(&self) -> &[u8] {
        &self.rows[..self.device_count as usize * ROWS_PER_DEVICE]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_is_zeroed() {
        let shadow = ShadowBitmap::new(2);
        assert_eq!(shadow.device_count(), 2);
        assert_eq!(shadow.as_slice(), &[0u8; 16]);
    }

    #[test]
    fn test_device_count_clamped() {
        assert_eq!(ShadowBitmap::new(0).device_count(), 1);
        assert_eq!(ShadowBitmap::new(9).device_count(), 8);
        assert_eq!(ShadowBitmap::new(255).as_slice().len(), SHADOW_SIZE);
    }

    #[test]
    fn test_offset() {
        let shadow = ShadowBitmap::new(3);
        assert_eq!(shadow.offset(0, 0), Some(0));
        assert_eq!(shadow.offset(1, 3), Some(11));
        assert_eq!(shadow.offset(2, 7), Some(23));
        assert_eq!(shadow.offset(3, 0), None);
        assert_eq!(shadow.offset(0, 8), None);
    }

    #[test]
    fn test_column_zero_is_msb() {
        let mut shadow = ShadowBitmap::new(1);
        assert_eq!(shadow.set_bit(0, 2, 0, true), Some(0b1000_0000));
        assert_eq!(shadow.set_bit(0, 2, 7, true), Some(0b1000_0001));
        assert_eq!(shadow.set_bit(0, 2, 0, false), Some(0b0000_0001));
        assert_eq!(shadow.bit(0, 2, 7), Some(true));
        assert_eq!(shadow.bit(0, 2, 0), Some(false));
    }

    #[test]
    fn test_with_bit_does_not_store() {
        let mut shadow = ShadowBitmap::new(1);
        shadow.set_row(0, 3, 0b0000_0011);

        assert_eq!(shadow.with_bit(0, 3, 0, true), Some(0b1000_0011));
        assert_eq!(shadow.with_bit(0, 3, 7, false), Some(0b0000_0010));
        assert_eq!(shadow.with_bit(0, 3, 8, true), None);
        assert_eq!(shadow.with_bit(1, 3, 0, true), None);
        assert_eq!(shadow.row(0, 3), Some(0b0000_0011));
    }

    #[test]
    fn test_out_of_range_leaves_shadow_untouched() {
        let mut shadow = ShadowBitmap::new(2);
        shadow.set_row(1, 1, 0x3C);
        let before = shadow.clone();

        assert_eq!(shadow.set_bit(2, 0, 0, true), None);
        assert_eq!(shadow.set_bit(0, 8, 0, true), None);
        assert_eq!(shadow.set_bit(0, 0, 8, true), None);
        assert_eq!(shadow.set_row(5, 0, 0xFF), None);
        assert_eq!(shadow.clear_device(2), None);

        assert_eq!(shadow, before);
    }

    #[test]
    fn test_clear_device_only_touches_that_device() {
        let mut shadow = ShadowBitmap::new(2);
        for row in 0..8 {
            shadow.set_row(0, row, 0xFF);
            shadow.set_row(1, row, 0xAA);
        }

        shadow.clear_device(0).unwrap();
        assert_eq!(shadow.device_rows(0), Some(&[0u8; 8][..]));
        assert_eq!(shadow.device_rows(1), Some(&[0xAAu8; 8][..]));
    }

    proptest! {
        #[test]
        fn prop_set_bit_preserves_other_bits(
            device in 0u8..8,
            row in 0u8..8,
            first in 0u8..8,
            second in 0u8..8,
            initial in any::<u8>(),
        ) {
            prop_assume!(first != second);
            let mut shadow = ShadowBitmap::new(8);
            shadow.set_row(device, row, initial);

            shadow.set_bit(device, row, first, true);
            shadow.set_bit(device, row, second, true);
            prop_assert_eq!(shadow.bit(device, row, first), Some(true));

            shadow.set_bit(device, row, second, false);
            prop_assert_eq!(shadow.bit(device, row, first), Some(true));

            let untouched = !((0x80u8 >> first) | (0x80u8 >> second));
            let byte = shadow.row(device, row).unwrap();
            prop_assert_eq!(byte & untouched, initial & untouched);
        }
    }
}
