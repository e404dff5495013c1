//! Access layer opcodes.

use std::fmt;

use bitstream::{BitResult, ByteReader, ByteWriter};

use crate::error::{DecodeError, WireResult};

/// First opcode octet reserved for future use.
pub const RESERVED_OPCODE: u8 = 0x7F;

/// An access message opcode in one of its three encoded forms.
///
/// The raw value follows the access layer convention:
/// - 1 octet: `0x00..=0x7E`
/// - 2 octets: `0b10xx_xxxx` followed by one octet, stored as `0xXXYY`
/// - 3 octets (vendor): `0b11xx_xxxx` followed by a little-endian company
///   identifier, stored as `0xXXCCCC`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Opcode(u32);

impl Opcode {
    /// Creates a 1-octet opcode.
    ///
    /// `b0` must be below [`RESERVED_OPCODE`]; larger values would be read
    /// back as a longer form.
    #[must_use]
    pub const fn one(b0: u8) -> Self {
        debug_assert!(b0 < RESERVED_OPCODE, "1-octet opcodes are 0x00..=0x7E");
        Self(b0 as u32)
    }

    /// Creates a 2-octet opcode.
    ///
    /// The top two bits of `b0` are forced to `0b10`.
    #[must_use]
    pub const fn two(b0: u8, b1: u8) -> Self {
        let b0 = (b0 & 0x3F) | 0x80;
        Self(((b0 as u32) << 8) | b1 as u32)
    }

    /// Creates a 3-octet vendor opcode.
    ///
    /// Only the low six bits of `b0` are kept; the top two are forced to
    /// `0b11`.
    #[must_use]
    pub const fn vendor(b0: u8, company: u16) -> Self {
        let b0 = (b0 & 0x3F) | 0xC0;
        Self(((b0 as u32) << 16) | company as u32)
    }

    /// Returns the raw opcode value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the number of octets the opcode occupies on the wire.
    #[must_use]
    pub const fn encoded_len(self) -> usize {
        if self.0 < 0x100 {
            1
        } else if self.0 < 0x1_0000 {
            2
        } else {
            3
        }
    }

    /// Returns the company identifier of a vendor opcode.
    #[must_use]
    pub const fn company(self) -> Option<u16> {
        if self.encoded_len() == 3 {
            Some((self.0 & 0xFFFF) as u16)
        } else {
            None
        }
    }

    /// Writes the opcode in its wire form.
    pub fn encode(self, writer: &mut ByteWriter) -> BitResult<()> {
        match self.encoded_len() {
            1 => writer.write_u8(self.0 as u8),
            2 => writer.write_be16(self.0 as u16),
            _ => {
                writer.write_u8((self.0 >> 16) as u8)?;
                writer.write_le16((self.0 & 0xFFFF) as u16)
            }
        }
    }

    /// Reads an opcode from the front of `reader`.
    ///
    /// The form is chosen by the two high bits of the first octet.
    pub fn decode(reader: &mut ByteReader<'_>) -> WireResult<Self> {
        let Some(&first) = reader.rest().first() else {
            return Err(DecodeError::EmptyMessage);
        };
        let needed = match first >> 6 {
            0b00 | 0b01 => {
                if first == RESERVED_OPCODE {
                    return Err(DecodeError::ReservedOpcode { octet: first });
                }
                1
            }
            0b10 => 2,
            _ => 3,
        };
        let available = reader.remaining();
        if available < needed {
            return Err(DecodeError::TruncatedOpcode { needed, available });
        }

        let opcode = match needed {
            1 => reader.read_u8().map(Self::one),
            2 => reader.read_be16().map(|raw| Self(u32::from(raw))),
            _ => reader.read_bytes(3).map(|octets| {
                let company = u16::from_le_bytes([octets[1], octets[2]]);
                Self((u32::from(octets[0]) << 16) | u32::from(company))
            }),
        };
        opcode.map_err(|_| DecodeError::TruncatedOpcode { needed, available })
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.encoded_len() {
            1 => write!(f, "0x{:02X}", self.0),
            2 => write!(f, "0x{:04X}", self.0),
            _ => write!(f, "0x{:06X}", self.0),
        }
    }
}
