//! Descriptor Status entry encoding and parsing.
//!
//! Each entry is the 2-byte property ID followed by a 6-byte packed record:
//!
//! ```text
//! byte   0..2    3    4      5        6       7
//!      +------+--------------------+--------+----------+
//!      |  id  |   tolerance word   | period | interval |
//!      +------+--------------------+--------+----------+
//!
//! tolerance word (u32, little-endian):
//!   bits  0..12  tolerance_pos
//!   bits 12..24  tolerance_neg
//!   bits 24..32  sampling_func
//! ```
//!
//! A property that is not in the registry is reported with its ID alone.

use bitstream::{BitField, BitResult, ByteReader, ByteWriter};
use registry::{Descriptor, PropertyId, Sensor};
use wire::{decode_message, Limits};

use crate::error::{CodecError, CodecResult};
use crate::op;

pub const TOLERANCE_POS: BitField = BitField::new(0, 12);
pub const TOLERANCE_NEG: BitField = BitField::new(12, 12);
pub const SAMPLING_FUNC: BitField = BitField::new(24, 8);

/// Size of the packed record following the ID.
pub const PACKED_RECORD_SIZE: usize = 6;

/// Size of a populated entry.
pub const DESCRIPTOR_ENTRY_SIZE: usize = 2 + PACKED_RECORD_SIZE;

/// Size of an unknown-property entry.
pub const MISSING_ENTRY_SIZE: usize = 2;

/// Packs the tolerance and sampling function fields into one word.
///
/// A tolerance wider than 12 bits is refused rather than truncated; only a
/// registry that skipped validation can hold one.
pub fn pack_tolerance_word(descriptor: &Descriptor) -> BitResult<u32> {
    let word = TOLERANCE_POS.checked_insert(0, u32::from(descriptor.tolerance_pos))?;
    let word = TOLERANCE_NEG.checked_insert(word, u32::from(descriptor.tolerance_neg))?;
    SAMPLING_FUNC.checked_insert(word, u32::from(descriptor.sampling_func))
}

/// Splits a tolerance word into `(tolerance_pos, tolerance_neg, sampling_func)`.
#[must_use]
pub const fn unpack_tolerance_word(word: u32) -> (u16, u16, u8) {
    (
        TOLERANCE_POS.extract(word) as u16,
        TOLERANCE_NEG.extract(word) as u16,
        SAMPLING_FUNC.extract(word) as u8,
    )
}

/// Appends the 8-byte entry for `sensor`.
///
/// Nothing is written if the descriptor cannot be packed.
pub fn encode_descriptor_entry(sensor: &Sensor, writer: &mut ByteWriter) -> BitResult<()> {
    let word = pack_tolerance_word(&sensor.descriptor)?;
    writer.write_le16(sensor.id)?;
    writer.write_le32(word)?;
    writer.write_u8(sensor.descriptor.period)?;
    writer.write_u8(sensor.descriptor.interval)
}

/// Appends the 2-byte entry for a property that is not present.
pub fn encode_missing_entry(id: PropertyId, writer: &mut ByteWriter) -> BitResult<()> {
    writer.write_le16(id)
}

/// One parsed Descriptor Status entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorEntry {
    Known { id: PropertyId, descriptor: Descriptor },
    Unknown { id: PropertyId },
}

impl DescriptorEntry {
    #[must_use]
    pub const fn id(&self) -> PropertyId {
        match self {
            Self::Known { id, .. } | Self::Unknown { id } => *id,
        }
    }

    #[must_use]
    pub const fn descriptor(&self) -> Option<&Descriptor> {
        match self {
            Self::Known { descriptor, .. } => Some(descriptor),
            Self::Unknown { .. } => None,
        }
    }

    /// Returns the entry's size on the wire.
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        match self {
            Self::Known { .. } => DESCRIPTOR_ENTRY_SIZE,
            Self::Unknown { .. } => MISSING_ENTRY_SIZE,
        }
    }
}

/// Parses a Descriptor Status payload.
///
/// Entries are consumed 8 bytes at a time. A final remainder of exactly two
/// bytes is an unknown-property entry; any other remainder is rejected.
pub fn decode_descriptor_status(payload: &[u8]) -> CodecResult<Vec<DescriptorEntry>> {
    let mut reader = ByteReader::new(payload);
    let mut entries = Vec::with_capacity(payload.len() / DESCRIPTOR_ENTRY_SIZE + 1);

    loop {
        let remaining = reader.remaining();
        let truncated = CodecError::Truncated {
            offset: reader.position(),
            remaining,
        };
        match remaining {
            0 => break,
            MISSING_ENTRY_SIZE => {
                let id = reader.read_le16().map_err(|_| truncated)?;
                entries.push(DescriptorEntry::Unknown { id });
            }
            n if n >= DESCRIPTOR_ENTRY_SIZE => {
                let entry = read_known_entry(&mut reader).map_err(|_| truncated)?;
                entries.push(entry);
            }
            _ => return Err(truncated),
        }
    }

    Ok(entries)
}

fn read_known_entry(reader: &mut ByteReader<'_>) -> BitResult<DescriptorEntry> {
    let id = reader.read_le16()?;
    let (tolerance_pos, tolerance_neg, sampling_func) = unpack_tolerance_word(reader.read_le32()?);
    let period = reader.read_u8()?;
    let interval = reader.read_u8()?;
    Ok(DescriptorEntry::Known {
        id,
        descriptor: Descriptor::new(tolerance_pos, tolerance_neg, sampling_func, period, interval),
    })
}

/// Parses a complete Descriptor Status message, opcode included.
pub fn decode_descriptor_status_message(
    buf: &[u8],
    limits: &Limits,
) -> CodecResult<Vec<DescriptorEntry>> {
    let msg = decode_message(buf, limits)?;
    if msg.opcode != op::DESCRIPTOR_STATUS {
        return Err(CodecError::UnexpectedOpcode {
            expected: op::DESCRIPTOR_STATUS,
            found: msg.opcode,
        });
    }
    decode_descriptor_status(msg.payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitstream::BitError;

    fn entry_bytes(sensor: &Sensor) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(DESCRIPTOR_ENTRY_SIZE);
        encode_descriptor_entry(sensor, &mut writer).unwrap();
        writer.finish()
    }

    #[test]
    fn fields_tile_the_word() {
        assert!(TOLERANCE_POS.is_valid());
        assert!(TOLERANCE_NEG.is_valid());
        assert!(SAMPLING_FUNC.is_valid());
        assert_eq!(
            TOLERANCE_POS.mask() | TOLERANCE_NEG.mask() << 12 | SAMPLING_FUNC.mask() << 24,
            u32::MAX
        );
    }

    #[test]
    fn packs_reference_entry() {
        let sensor = Sensor::new(0x0056, Descriptor::new(10, 10, 1, 5, 2));
        assert_eq!(
            entry_bytes(&sensor),
            vec![0x56, 0x00, 0x0A, 0xA0, 0x00, 0x01, 0x05, 0x02]
        );
    }

    #[test]
    fn pack_boundaries() {
        let max = Descriptor::new(0x0FFF, 0x0FFF, 0xFF, 0, 0);
        assert_eq!(pack_tolerance_word(&max), Ok(u32::MAX));
        assert_eq!(unpack_tolerance_word(u32::MAX), (0x0FFF, 0x0FFF, 0xFF));

        let zero = Descriptor::default();
        assert_eq!(pack_tolerance_word(&zero), Ok(0));
        assert_eq!(unpack_tolerance_word(0), (0, 0, 0));
    }

    #[test]
    fn pack_fields_do_not_bleed() {
        let pos_only = Descriptor::new(0x0FFF, 0, 0, 0, 0);
        assert_eq!(pack_tolerance_word(&pos_only), Ok(0x0000_0FFF));
        let neg_only = Descriptor::new(0, 0x0FFF, 0, 0, 0);
        assert_eq!(pack_tolerance_word(&neg_only), Ok(0x00FF_F000));
        let func_only = Descriptor::new(0, 0, 0xFF, 0, 0);
        assert_eq!(pack_tolerance_word(&func_only), Ok(0xFF00_0000));
    }

    #[test]
    fn wide_tolerance_is_refused() {
        let desc = Descriptor::new(0, 0x1001, 0, 0, 0);
        assert_eq!(
            pack_tolerance_word(&desc),
            Err(BitError::FieldOverflow {
                field: TOLERANCE_NEG,
                value: 0x1001
            })
        );

        let sensor = Sensor::new(0x0056, desc);
        let mut writer = ByteWriter::with_capacity(DESCRIPTOR_ENTRY_SIZE);
        assert!(encode_descriptor_entry(&sensor, &mut writer).is_err());
        assert!(writer.is_empty());
    }

    #[test]
    fn missing_entry_is_id_only() {
        let mut writer = ByteWriter::with_capacity(MISSING_ENTRY_SIZE);
        encode_missing_entry(0x0099, &mut writer).unwrap();
        assert_eq!(writer.finish(), vec![0x99, 0x00]);
    }

    #[test]
    fn entry_overflow_is_reported() {
        let sensor = Sensor::new(1, Descriptor::default());
        let mut writer = ByteWriter::with_capacity(4);
        assert!(encode_descriptor_entry(&sensor, &mut writer).is_err());
    }

    #[test]
    fn decode_known_and_unknown() {
        let mut payload = vec![0x56, 0x00, 0x0A, 0xA0, 0x00, 0x01, 0x05, 0x02];
        payload.extend_from_slice(&[0x99, 0x00]);

        let entries = decode_descriptor_status(&payload).unwrap();
        assert_eq!(
            entries,
            vec![
                DescriptorEntry::Known {
                    id: 0x0056,
                    descriptor: Descriptor::new(10, 10, 1, 5, 2),
                },
                DescriptorEntry::Unknown { id: 0x0099 },
            ]
        );
        assert_eq!(entries[1].descriptor(), None);
        assert_eq!(entries.iter().map(DescriptorEntry::encoded_len).sum::<usize>(), 10);
    }

    #[test]
    fn decode_empty_payload() {
        assert!(decode_descriptor_status(&[]).unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_partial_entry() {
        let err = decode_descriptor_status(&[0x56, 0x00, 0x0A, 0xA0, 0x00]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Truncated {
                offset: 0,
                remaining: 5
            }
        );

        let mut payload = vec![0; DESCRIPTOR_ENTRY_SIZE];
        payload.push(0x01);
        let err = decode_descriptor_status(&payload).unwrap_err();
        assert_eq!(
            err,
            CodecError::Truncated {
                offset: 8,
                remaining: 1
            }
        );
    }

    #[test]
    fn decode_message_checks_opcode() {
        let limits = Limits::default();
        let entries =
            decode_descriptor_status_message(&[0x51, 0x99, 0x00], &limits).unwrap();
        assert_eq!(entries, vec![DescriptorEntry::Unknown { id: 0x0099 }]);

        let err = decode_descriptor_status_message(&[0x52, 0x99, 0x00], &limits).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedOpcode { .. }));

        let err = decode_descriptor_status_message(&[], &limits).unwrap_err();
        assert!(matches!(err, CodecError::Wire(_)));
    }
}
