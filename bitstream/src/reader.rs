//! Little-endian byte reader with bounded operations.

use crate::error::{BitError, BitResult};

/// A byte reader for decoding untrusted message payloads.
///
/// All read operations are bounds-checked and return errors on failure.
/// A failed read does not advance the reader.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unread tail without consuming it.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> BitResult<u8> {
        let [value] = self.read_array::<1>()?;
        Ok(value)
    }

    /// Reads a little-endian `u16`.
    pub fn read_le16(&mut self) -> BitResult<u16> {
        self.read_array::<2>().map(u16::from_le_bytes)
    }

    /// Reads a little-endian `u32`.
    pub fn read_le32(&mut self) -> BitResult<u32> {
        self.read_array::<4>().map(u32::from_le_bytes)
    }

    /// Reads a big-endian `u16`.
    pub fn read_be16(&mut self) -> BitResult<u16> {
        self.read_array::<2>().map(u16::from_be_bytes)
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> BitResult<&'a [u8]> {
        self.ensure_bytes(len)?;
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    fn ensure_bytes(&self, len: usize) -> BitResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(BitError::EndOfBuffer {
                requested: len,
                available,
            });
        }
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> BitResult<[u8; N]> {
        self.ensure_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }
}
