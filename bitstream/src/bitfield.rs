//! Named bit-fields inside a 32-bit word.

use crate::error::{BitError, BitResult};

/// Number of bits in the packed word.
pub const WORD_BITS: u8 = 32;

/// A contiguous run of `width` bits starting at bit `shift` of a `u32`.
///
/// Fields are described by explicit shift/width pairs rather than by struct
/// layout, so the packed representation is identical on every target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitField {
    shift: u8,
    width: u8,
}

impl BitField {
    /// Describes a field of `width` bits starting at bit `shift`.
    #[must_use]
    pub const fn new(shift: u8, width: u8) -> Self {
        Self { shift, width }
    }

    /// Returns the position of the lowest bit.
    #[must_use]
    pub const fn shift(self) -> u8 {
        self.shift
    }

    /// Returns the number of bits.
    #[must_use]
    pub const fn width(self) -> u8 {
        self.width
    }

    /// Returns `true` if the field lies entirely inside a 32-bit word.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.width > 0 && self.shift as u16 + self.width as u16 <= WORD_BITS as u16
    }

    /// Returns the unshifted mask (`width` low bits set).
    #[must_use]
    pub const fn mask(self) -> u32 {
        if self.width >= WORD_BITS {
            u32::MAX
        } else {
            (1u32 << self.width) - 1
        }
    }

    /// Returns the largest value the field can hold.
    #[must_use]
    pub const fn max_value(self) -> u32 {
        self.mask()
    }

    /// Returns `true` if `value` fits in the field without truncation.
    #[must_use]
    pub const fn fits(self, value: u32) -> bool {
        value & !self.mask() == 0
    }

    /// Places `value` into the field of `word`, truncating to the field width.
    ///
    /// Bits of `word` outside the field are preserved. The field must be
    /// [valid](Self::is_valid).
    #[must_use]
    pub const fn insert(self, word: u32, value: u32) -> u32 {
        let mask = self.mask();
        let shift = self.shift as u32;
        (word & !mask.wrapping_shl(shift)) | (value & mask).wrapping_shl(shift)
    }

    /// Places `value` into the field of `word`, rejecting values that would be
    /// truncated.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::FieldOverflow`] if `value` is wider than the field
    /// or the field does not lie inside a 32-bit word.
    pub fn checked_insert(self, word: u32, value: u32) -> BitResult<u32> {
        if self.is_valid() && self.fits(value) {
            Ok(self.insert(word, value))
        } else {
            Err(BitError::FieldOverflow { field: self, value })
        }
    }

    /// Reads the field out of `word`.
    #[must_use]
    pub const fn extract(self, word: u32) -> u32 {
        word.wrapping_shr(self.shift as u32) & self.mask()
    }
}
