//! Bit-field descriptors for 8-bit chip registers
//!
//! Every S2LP register touched by a read-modify-write sequence publishes its
//! layout as a set of [`Field`] constants plus a `RESERVED` mask. Setters only
//! ever touch the bits of their own field, so anything outside the field
//! (reserved bits included) survives the write unchanged.

/// A contiguous group of bits inside an 8-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Mask of the field, already shifted into position
    pub mask: u8,
    /// Position of the least significant bit of the field
    pub shift: u8,
}

impl Field {
    /// Creates a field from its width in bits and the position of its LSB.
    pub const fn new(shift: u8, width: u8) -> Self {
        let unshifted = if width >= 8 {
            0xFF
        } else {
            (1u8 << width) - 1
        };
        Self {
            mask: unshifted << shift,
            shift,
        }
    }

    /// Extracts the field value from a raw register byte.
    pub const fn get(self, reg: u8) -> u8 {
        (reg & self.mask) >> self.shift
    }

    /// Returns `reg` with the field replaced by `value`.
    ///
    /// Bits of `value` that do not fit in the field are discarded.
    pub const fn set(self, reg: u8, value: u8) -> u8 {
        (reg & !self.mask) | ((value << self.shift) & self.mask)
    }

    /// Largest value the field can hold.
    pub const fn max(self) -> u8 {
        self.mask >> self.shift
    }
}

/// Returns `true` when the fields do not overlap each other nor the reserved
/// mask, and together with it cover every bit of the register.
pub const fn covers_register(fields: &[Field], reserved: u8) -> bool {
    let mut seen = reserved;
    let mut i = 0;
    while i < fields.len() {
        if seen & fields[i].mask != 0 {
            return false;
        }
        seen |= fields[i].mask;
        i += 1;
    }
    seen == 0xFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_only_touches_the_field() {
        let f = Field::new(4, 3);
        assert_eq!(f.mask, 0b0111_0000);
        assert_eq!(f.set(0xFF, 0), 0b1000_1111);
        assert_eq!(f.set(0x00, 0b101), 0b0101_0000);
        // Oversized values are truncated to the field width.
        assert_eq!(f.set(0x00, 0xFF), 0b0111_0000);
    }

    #[test]
    fn get_reads_back_set() {
        let f = Field::new(2, 6);
        assert_eq!(f.get(f.set(0x03, 32)), 32);
        assert_eq!(f.max(), 63);
    }

    #[test]
    fn full_width_field() {
        let f = Field::new(0, 8);
        assert_eq!(f.mask, 0xFF);
        assert_eq!(f.set(0x12, 0xAB), 0xAB);
    }

    #[test]
    fn coverage_detects_overlap_and_holes() {
        let lo = Field::new(0, 4);
        let hi = Field::new(4, 4);
        assert!(covers_register(&[lo, hi], 0));
        assert!(!covers_register(&[lo], 0));
        assert!(!covers_register(&[lo, hi], 0x01));
        assert!(covers_register(&[lo], 0xF0));
    }
}
