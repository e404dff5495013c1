//! Failures raised by the byte reader, byte writer, and bit-fields.

use std::fmt;

use crate::bitfield::BitField;

pub type BitResult<T> = Result<T, BitError>;

/// A primitive read or write that could not be completed.
///
/// Every failing operation leaves its reader, writer, or word untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitError {
    /// A read wanted `requested` bytes with only `available` left.
    EndOfBuffer { requested: usize, available: usize },

    /// A write would grow the buffer to `attempted` bytes, past `capacity`.
    BufferOverflow { attempted: usize, capacity: usize },

    /// `value` does not fit in `field`, or `field` overruns the 32-bit word.
    FieldOverflow { field: BitField, value: u32 },
}

impl BitError {
    /// Returns `true` for failures caused by a buffer bound rather than by
    /// the value being packed.
    #[must_use]
    pub const fn is_buffer_bound(&self) -> bool {
        matches!(self, Self::EndOfBuffer { .. } | Self::BufferOverflow { .. })
    }
}

impl fmt::Display for BitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfBuffer {
                requested,
                available,
            } => write!(f, "short read: wanted {requested} bytes, {available} left"),
            Self::BufferOverflow {
                attempted,
                capacity,
            } => write!(f, "short buffer: {attempted} bytes needed, capacity {capacity}"),
            Self::FieldOverflow { field, value } => write!(
                f,
                "0x{value:X} overflows the {}-bit field at bit {}",
                field.width(),
                field.shift()
            ),
        }
    }
}

impl std::error::Error for BitError {}
