//! Message context and the outbound transport seam.

use wire::{Limits, OutboundMessage, TRANS_MIC_SIZE};

use crate::error::SendError;

/// Sentinel TTL asking the network layer to use its configured default.
pub const TTL_DEFAULT: u8 = 0xFF;

/// Addressing information that travels with an access message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageContext {
    /// Network key index.
    pub net_idx: u16,
    /// Application key index.
    pub app_idx: u16,
    /// Remote address (source of a request, destination of a reply).
    pub addr: u16,
    /// Destination address of the received message.
    pub recv_dst: u16,
    /// TTL of the received message.
    pub recv_ttl: u8,
    /// TTL to use when sending.
    pub send_ttl: u8,
}

impl MessageContext {
    /// Creates a context for a message exchanged with `addr`.
    #[must_use]
    pub const fn new(net_idx: u16, app_idx: u16, addr: u16) -> Self {
        Self {
            net_idx,
            app_idx,
            addr,
            recv_dst: 0,
            recv_ttl: 0,
            send_ttl: TTL_DEFAULT,
        }
    }

    /// Derives the context for replying to the message this context arrived with.
    ///
    /// Replies use the same keys, go back to the sender, and leave the TTL to
    /// the network default.
    #[must_use]
    pub const fn reply(&self) -> Self {
        Self {
            net_idx: self.net_idx,
            app_idx: self.app_idx,
            addr: self.addr,
            recv_dst: 0,
            recv_ttl: 0,
            send_ttl: TTL_DEFAULT,
        }
    }
}

/// Hands finished messages to the lower layers.
pub trait Transport {
    /// Sends `message` to the destination in `ctx`.
    fn send(&mut self, ctx: &MessageContext, message: OutboundMessage) -> Result<(), SendError>;
}

/// A message accepted by [`BufferedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub ctx: MessageContext,
    pub message: OutboundMessage,
}

/// In-memory transport that queues accepted messages.
///
/// Applies the same admission checks as the real lower transport: the
/// TransMIC must fit behind the payload and the message must fit in one
/// access payload.
#[derive(Debug, Default)]
pub struct BufferedTransport {
    limits: Limits,
    sent: Vec<SentMessage>,
    failure: Option<SendError>,
}

impl BufferedTransport {
    #[must_use]
    pub fn new(limits: Limits) -> Self {
        Self {
            limits,
            sent: Vec::new(),
            failure: None,
        }
    }

    /// Makes every subsequent send fail with `err` until cleared.
    pub fn fail_with(&mut self, err: SendError) {
        self.failure = Some(err);
    }

    /// Clears an injected failure.
    pub fn clear_failure(&mut self) {
        self.failure = None;
    }

    /// Returns the accepted messages, oldest first.
    #[must_use]
    pub fn sent(&self) -> &[SentMessage] {
        &self.sent
    }

    /// Returns the most recently accepted message.
    #[must_use]
    pub fn last(&self) -> Option<&SentMessage> {
        self.sent.last()
    }

    /// Removes and returns the accepted messages.
    pub fn take_sent(&mut self) -> Vec<SentMessage> {
        std::mem::take(&mut self.sent)
    }
}

impl Transport for BufferedTransport {
    fn send(&mut self, ctx: &MessageContext, message: OutboundMessage) -> Result<(), SendError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        if !message.has_mic_room() {
            return Err(SendError::InsufficientTailroom {
                needed: TRANS_MIC_SIZE,
                available: message.tailroom(),
            });
        }
        if message.len() > self.limits.max_message_bytes {
            return Err(SendError::MessageTooLarge {
                len: message.len(),
                limit: self.limits.max_message_bytes,
            });
        }
        self.sent.push(SentMessage { ctx: *ctx, message });
        Ok(())
    }
}
