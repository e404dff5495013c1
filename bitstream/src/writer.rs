//! Bounded little-endian byte writer.

use crate::error::{BitError, BitResult};

/// A byte writer with a fixed capacity chosen at allocation time.
///
/// The capacity mirrors a statically sized message buffer: every write is
/// checked against it and a write that does not fit fails without modifying
/// the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteWriter {
    bytes: Vec<u8>,
    capacity: usize,
}

impl ByteWriter {
    /// Creates a writer that accepts at most `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the capacity fixed at construction.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of bytes that can still be written.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity - self.bytes.len()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) -> BitResult<()> {
        self.write_bytes(&[value])
    }

    /// Writes a `u16` in little-endian order.
    pub fn write_le16(&mut self, value: u16) -> BitResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a `u32` in little-endian order.
    pub fn write_le32(&mut self, value: u32) -> BitResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a `u16` in big-endian order.
    pub fn write_be16(&mut self, value: u16) -> BitResult<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Appends raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::BufferOverflow`] if the bytes do not fit in the
    /// remaining capacity.
    pub fn write_bytes(&mut self, data: &[u8]) -> BitResult<()> {
        if data.len() > self.remaining() {
            return Err(BitError::BufferOverflow {
                attempted: self.bytes.len() + data.len(),
                capacity: self.capacity,
            });
        }
        self.bytes.extend_from_slice(data);
        Ok(())
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = ByteWriter::with_capacity(4);
        assert!(writer.is_empty());
        assert_eq!(writer.remaining(), 4);
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn write_le16_is_little_endian() {
        let mut writer = ByteWriter::with_capacity(2);
        writer.write_le16(0x0056).unwrap();
        assert_eq!(writer.finish(), vec![0x56, 0x00]);
    }

    #[test]
    fn write_le32_is_little_endian() {
        let mut writer = ByteWriter::with_capacity(4);
        writer.write_le32(0x0100_A00A).unwrap();
        assert_eq!(writer.finish(), vec![0x0A, 0xA0, 0x00, 0x01]);
    }

    #[test]
    fn write_be16_is_big_endian() {
        let mut writer = ByteWriter::with_capacity(2);
        writer.write_be16(0x8230).unwrap();
        assert_eq!(writer.finish(), vec![0x82, 0x30]);
    }

    #[test]
    fn write_tracks_remaining() {
        let mut writer = ByteWriter::with_capacity(8);
        writer.write_u8(1).unwrap();
        writer.write_le16(2).unwrap();
        assert_eq!(writer.len(), 3);
        assert_eq!(writer.remaining(), 5);
        assert_eq!(writer.capacity(), 8);
    }

    #[test]
    fn overflow_rejected_without_partial_write() {
        let mut writer = ByteWriter::with_capacity(3);
        writer.write_le16(0xBEEF).unwrap();
        let err = writer.write_le16(0xCAFE).unwrap_err();
        assert_eq!(
            err,
            BitError::BufferOverflow {
                attempted: 4,
                capacity: 3
            }
        );
        assert_eq!(writer.as_slice(), &[0xEF, 0xBE]);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut writer = ByteWriter::with_capacity(0);
        assert!(writer.write_u8(0).is_err());
        assert!(writer.write_bytes(&[]).is_ok());
    }
}
