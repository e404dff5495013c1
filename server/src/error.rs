//! Error types for model message handling.

use std::fmt;

use bitstream::BitError;
use wire::{DecodeError, EncodeError, Opcode};

use crate::dispatch::Handler;

/// Result type for message handlers.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Result type for client-side status decoding.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors a handler can report instead of a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The opcode is wired into a table but has no implementation yet.
    NotImplemented { handler: Handler },

    /// Request payload could not be parsed.
    Malformed(BitError),

    /// Reply could not be assembled.
    Encode(EncodeError),

    /// The handler produced a reply other than the request's status, or
    /// a reply to an unacknowledged request.
    UnexpectedReply {
        handler: Handler,
        expected: Option<Opcode>,
        found: Option<Opcode>,
    },
}

/// Errors while parsing a status message on the client side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Wire framing error.
    Wire(DecodeError),

    /// Message carries a different opcode than expected.
    UnexpectedOpcode { expected: Opcode, found: Opcode },

    /// Trailing bytes do not form a complete entry.
    Truncated { offset: usize, remaining: usize },
}

/// Errors a transport reports when refusing an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// No room left behind the payload for the TransMIC.
    InsufficientTailroom { needed: usize, available: usize },

    /// Message exceeds the largest access payload.
    MessageTooLarge { len: usize, limit: usize },

    /// The transport cannot accept messages right now.
    Unavailable,
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotImplemented { handler } => write!(f, "{handler} not implemented"),
            Self::Malformed(err) => write!(f, "malformed request: {err}"),
            Self::Encode(err) => write!(f, "reply encoding failed: {err}"),
            Self::UnexpectedReply {
                handler,
                expected,
                found,
            } => {
                write!(f, "{handler} replied with ")?;
                match found {
                    Some(opcode) => write!(f, "{opcode}")?,
                    None => f.write_str("nothing")?,
                }
                match expected {
                    Some(opcode) => write!(f, ", expected {opcode}"),
                    None => f.write_str(", expected no reply"),
                }
            }
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(err) => write!(f, "wire error: {err}"),
            Self::UnexpectedOpcode { expected, found } => {
                write!(f, "unexpected opcode {found}, expected {expected}")
            }
            Self::Truncated { offset, remaining } => {
                write!(
                    f,
                    "truncated entry at offset {offset}: {remaining} bytes remaining"
                )
            }
        }
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientTailroom { needed, available } => {
                write!(
                    f,
                    "not enough tailroom for TransMIC: need {needed}, have {available}"
                )
            }
            Self::MessageTooLarge { len, limit } => {
                write!(f, "message too large: {len} bytes > {limit}")
            }
            Self::Unavailable => write!(f, "transport unavailable"),
        }
    }
}

impl From<EncodeError> for HandlerError {
    fn from(err: EncodeError) -> Self {
        Self::Encode(err)
    }
}

// Byte-level failures inside a handler come from writing the reply; request
// parsing maps its errors to `Malformed` explicitly.
impl From<BitError> for HandlerError {
    fn from(err: BitError) -> Self {
        Self::Encode(EncodeError::from(err))
    }
}

impl From<DecodeError> for CodecError {
    fn from(err: DecodeError) -> Self {
        Self::Wire(err)
    }
}

impl std::error::Error for HandlerError {}

impl std::error::Error for CodecError {}

impl std::error::Error for SendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_error_display_not_implemented() {
        let err = HandlerError::NotImplemented {
            handler: Handler::CadenceSet,
        };
        let msg = err.to_string();
        assert!(msg.contains("cadence set"));
        assert!(msg.contains("not implemented"));
    }

    #[test]
    fn handler_error_from_overflow_is_encode() {
        let err = HandlerError::from(BitError::BufferOverflow {
            attempted: 14,
            capacity: 13,
        });
        assert!(matches!(
            err,
            HandlerError::Encode(EncodeError::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn handler_error_display_unexpected_reply() {
        let err = HandlerError::UnexpectedReply {
            handler: Handler::SettingSetUnack,
            expected: None,
            found: Some(Opcode::one(0x5B)),
        };
        assert_eq!(
            err.to_string(),
            "setting set unacknowledged replied with 0x5B, expected no reply"
        );

        let err = HandlerError::UnexpectedReply {
            handler: Handler::SensorGet,
            expected: Some(Opcode::one(0x52)),
            found: None,
        };
        assert_eq!(
            err.to_string(),
            "sensor get replied with nothing, expected 0x52"
        );
    }

    #[test]
    fn codec_error_display_truncated() {
        let err = CodecError::Truncated {
            offset: 8,
            remaining: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("offset 8"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn codec_error_display_unexpected_opcode() {
        let err = CodecError::UnexpectedOpcode {
            expected: Opcode::one(0x51),
            found: Opcode::one(0x52),
        };
        assert_eq!(err.to_string(), "unexpected opcode 0x52, expected 0x51");
    }

    #[test]
    fn send_error_display() {
        let err = SendError::InsufficientTailroom {
            needed: 4,
            available: 2,
        };
        assert!(err.to_string().contains("TransMIC"));
        let err = SendError::MessageTooLarge {
            len: 400,
            limit: 380,
        };
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<HandlerError>();
        assert_error::<CodecError>();
        assert_error::<SendError>();
    }
}
