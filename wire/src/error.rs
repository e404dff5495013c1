//! Error types for wire format operations.

use std::fmt;

use bitstream::BitError;

/// Result type for wire format operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// High-level decode errors for access message framing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Message contains no opcode at all.
    EmptyMessage,

    /// First opcode octet is reserved for future use.
    ReservedOpcode { octet: u8 },

    /// Message ends before the multi-octet opcode is complete.
    TruncatedOpcode { needed: usize, available: usize },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LimitKind {
    MessageBytes,
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The message buffer cannot hold the write.
    BufferTooSmall { needed: usize, available: usize },

    /// Any other byte-level failure.
    Bitstream(BitError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "empty message: no opcode present"),
            Self::ReservedOpcode { octet } => {
                write!(f, "reserved opcode octet: 0x{octet:02X}")
            }
            Self::TruncatedOpcode { needed, available } => {
                write!(
                    f,
                    "truncated opcode: need {needed} bytes, have {available}"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MessageBytes => "message bytes",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {needed}, have {available}")
            }
            Self::Bitstream(err) => write!(f, "bitstream error: {err}"),
        }
    }
}

impl From<BitError> for EncodeError {
    fn from(err: BitError) -> Self {
        match err {
            BitError::BufferOverflow {
                attempted,
                capacity,
            } => Self::BufferTooSmall {
                needed: attempted,
                available: capacity,
            },
            other => Self::Bitstream(other),
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}
