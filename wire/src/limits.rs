//! Configurable limits for bounded decoding.

/// Largest upper transport access PDU, TransMIC included.
pub const MAX_ACCESS_PDU: usize = 384;

/// Wire-level limits for access message handling.
///
/// Enforced on inbound messages during decoding and by transports before
/// handing an outbound message to the network layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum message size in bytes (opcode + payload, TransMIC excluded).
    pub max_message_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // 32 segments of 12 bytes, minus the 4-byte TransMIC
            max_message_bytes: MAX_ACCESS_PDU - crate::TRANS_MIC_SIZE,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_message_bytes: 64,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_message_bytes: usize::MAX,
        }
    }
}
