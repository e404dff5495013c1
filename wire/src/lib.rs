//! Access message framing and opcode encoding for meshsensor.
//!
//! This crate handles the binary shape of an access message: an opcode in one
//! of its 1-, 2- or 3-octet forms followed by an opaque payload. It does not
//! know about sensors or models, only the structure of messages.
//!
//! # Design Principles
//!
//! - **Stable wire format** - Opcode forms follow the access layer rules exactly.
//! - **Bounded decoding** - Message lengths are validated against limits before use.
//! - **Sized once** - Outbound buffers are allocated from the expected payload length
//!   and keep tailroom for the transport MIC.

mod error;
mod limits;
mod message;
mod opcode;

pub use error::{DecodeError, EncodeError, LimitKind, WireResult};
pub use limits::{Limits, MAX_ACCESS_PDU};
pub use message::{
    decode_message, message_capacity, MessageBuilder, OutboundMessage, WireMessage,
    TRANS_MIC_SIZE,
};
pub use opcode::{Opcode, RESERVED_OPCODE};
