//! Message decoding and outbound message assembly.

use bitstream::{ByteReader, ByteWriter};

use crate::error::{DecodeError, EncodeError, LimitKind, WireResult};
use crate::limits::Limits;
use crate::opcode::Opcode;

/// Size of the transport MIC appended below the access layer.
pub const TRANS_MIC_SIZE: usize = 4;

/// Returns the buffer size needed for `opcode` plus `payload_len` bytes of
/// payload, with room left for the TransMIC.
#[must_use]
pub const fn message_capacity(opcode: Opcode, payload_len: usize) -> usize {
    opcode.encoded_len() + payload_len + TRANS_MIC_SIZE
}

/// A decoded inbound access message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireMessage<'a> {
    pub opcode: Opcode,
    pub payload: &'a [u8],
}

/// Splits an access message into opcode and payload.
pub fn decode_message<'a>(buf: &'a [u8], limits: &Limits) -> WireResult<WireMessage<'a>> {
    if buf.len() > limits.max_message_bytes {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::MessageBytes,
            limit: limits.max_message_bytes,
            actual: buf.len(),
        });
    }

    let mut reader = ByteReader::new(buf);
    let opcode = Opcode::decode(&mut reader)?;
    Ok(WireMessage {
        opcode,
        payload: reader.rest(),
    })
}

/// Incrementally builds one outbound access message.
///
/// The buffer is sized once from the expected payload length and always keeps
/// [`TRANS_MIC_SIZE`] bytes of tailroom in its capacity for the lower
/// transport. Payload writes that eat into that tailroom succeed here but the
/// message will be refused at send time.
#[derive(Debug)]
pub struct MessageBuilder {
    opcode: Opcode,
    writer: ByteWriter,
}

impl MessageBuilder {
    /// Allocates a message for `payload_len` payload bytes and writes the opcode.
    pub fn new(opcode: Opcode, payload_len: usize) -> Result<Self, EncodeError> {
        let mut writer = ByteWriter::with_capacity(message_capacity(opcode, payload_len));
        opcode.encode(&mut writer)?;
        Ok(Self { opcode, writer })
    }

    /// Returns the message opcode.
    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Returns the writer used to append payload bytes.
    pub fn payload(&mut self) -> &mut ByteWriter {
        &mut self.writer
    }

    /// Returns the number of bytes written so far, opcode included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writer.len()
    }

    /// Returns `true` if only the opcode has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writer.len() == self.opcode.encoded_len()
    }

    /// Completes the message.
    #[must_use]
    pub fn finish(self) -> OutboundMessage {
        let capacity = self.writer.capacity();
        OutboundMessage {
            opcode: self.opcode,
            bytes: self.writer.finish(),
            capacity,
        }
    }
}

/// A fully assembled message ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    opcode: Opcode,
    bytes: Vec<u8>,
    capacity: usize,
}

impl OutboundMessage {
    /// Returns the message opcode.
    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Returns the encoded message (opcode + payload).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the payload following the opcode.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.bytes[self.opcode.encoded_len()..]
    }

    /// Returns the encoded length (opcode + payload).
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the message carries no payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload().is_empty()
    }

    /// Returns the unused capacity behind the encoded bytes.
    #[must_use]
    pub fn tailroom(&self) -> usize {
        self.capacity - self.bytes.len()
    }

    /// Returns `true` if the TransMIC still fits behind the payload.
    #[must_use]
    pub fn has_mic_room(&self) -> bool {
        self.tailroom() >= TRANS_MIC_SIZE
    }

    /// Consumes the message and returns the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
