//! Opcode tables and inbound message dispatch.
//!
//! Each model exposes a static table of [`OpEntry`] rows. An inbound message
//! is matched against the table by opcode, rejected if its payload is shorter
//! than the row's minimum, and otherwise handed to the row's [`Handler`]. A
//! reply, if any, goes back to the requester through a [`Transport`].

use std::fmt;

use registry::SensorRegistry;
use wire::{decode_message, DecodeError, Limits, Opcode, OutboundMessage, WireMessage};

use crate::error::{HandlerError, HandlerResult, SendError};
use crate::handlers;
use crate::model::Model;
use crate::op;
use crate::transport::{MessageContext, Transport};

/// Request handlers known to the sensor models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    DescriptorGet,
    SensorGet,
    ColumnGet,
    SeriesGet,
    CadenceGet,
    CadenceSet,
    CadenceSetUnack,
    SettingsGet,
    SettingGet,
    SettingSet,
    SettingSetUnack,
}

impl Handler {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DescriptorGet => "descriptor get",
            Self::SensorGet => "sensor get",
            Self::ColumnGet => "column get",
            Self::SeriesGet => "series get",
            Self::CadenceGet => "cadence get",
            Self::CadenceSet => "cadence set",
            Self::CadenceSetUnack => "cadence set unacknowledged",
            Self::SettingsGet => "settings get",
            Self::SettingGet => "setting get",
            Self::SettingSet => "setting set",
            Self::SettingSetUnack => "setting set unacknowledged",
        }
    }

    /// Returns the status opcode this request is answered with, or `None`
    /// for unacknowledged requests.
    #[must_use]
    pub const fn response_opcode(self) -> Option<Opcode> {
        match self {
            Self::DescriptorGet => Some(op::DESCRIPTOR_STATUS),
            Self::SensorGet => Some(op::SENSOR_STATUS),
            Self::ColumnGet => Some(op::COLUMN_STATUS),
            Self::SeriesGet => Some(op::SERIES_STATUS),
            Self::CadenceGet | Self::CadenceSet => Some(op::CADENCE_STATUS),
            Self::SettingsGet => Some(op::SETTINGS_STATUS),
            Self::SettingGet | Self::SettingSet => Some(op::SETTING_STATUS),
            Self::CadenceSetUnack | Self::SettingSetUnack => None,
        }
    }

    /// Runs the handler against `payload`.
    ///
    /// `Ok(None)` means the request was processed and needs no reply. A reply
    /// that does not carry [`Handler::response_opcode`] is turned into
    /// [`HandlerError::UnexpectedReply`].
    pub fn handle(
        self,
        registry: &SensorRegistry,
        payload: &[u8],
    ) -> HandlerResult<Option<OutboundMessage>> {
        let reply = match self {
            Self::DescriptorGet => Some(handlers::descriptor_get(registry, payload)?),
            other => return Err(HandlerError::NotImplemented { handler: other }),
        };
        self.check_reply(reply.as_ref())?;
        Ok(reply)
    }

    /// Checks that `reply` is the status this request is answered with.
    pub fn check_reply(self, reply: Option<&OutboundMessage>) -> HandlerResult<()> {
        let expected = self.response_opcode();
        let found = reply.map(OutboundMessage::opcode);
        if expected == found {
            Ok(())
        } else {
            Err(HandlerError::UnexpectedReply {
                handler: self,
                expected,
                found,
            })
        }
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a model's opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpEntry {
    pub opcode: Opcode,
    /// Shortest payload the handler accepts.
    pub min_len: usize,
    pub handler: Handler,
}

impl OpEntry {
    #[must_use]
    pub const fn new(opcode: Opcode, min_len: usize, handler: Handler) -> Self {
        Self {
            opcode,
            min_len,
            handler,
        }
    }
}

/// Sensor Server opcodes.
pub const SENSOR_SRV_OPS: &[OpEntry] = &[
    OpEntry::new(op::DESCRIPTOR_GET, 0, Handler::DescriptorGet),
    OpEntry::new(op::SENSOR_GET, 0, Handler::SensorGet),
    OpEntry::new(op::COLUMN_GET, 2, Handler::ColumnGet),
    OpEntry::new(op::SERIES_GET, 2, Handler::SeriesGet),
];

/// Sensor Setup Server opcodes.
pub const SENSOR_SETUP_SRV_OPS: &[OpEntry] = &[
    OpEntry::new(op::CADENCE_GET, 2, Handler::CadenceGet),
    OpEntry::new(op::CADENCE_SET, 32, Handler::CadenceSet),
    OpEntry::new(op::CADENCE_SET_UNACK, 32, Handler::CadenceSetUnack),
    OpEntry::new(op::SETTINGS_GET, 2, Handler::SettingsGet),
    OpEntry::new(op::SETTING_GET, 4, Handler::SettingGet),
    OpEntry::new(op::SETTING_SET, 4, Handler::SettingSet),
    OpEntry::new(op::SETTING_SET_UNACK, 4, Handler::SettingSetUnack),
];

/// Finds the first row matching `opcode`.
#[must_use]
pub fn find_entry(table: &[OpEntry], opcode: Opcode) -> Option<&OpEntry> {
    table.iter().find(|entry| entry.opcode == opcode)
}

/// Why an inbound message was discarded without running a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The access message could not be framed.
    Malformed(DecodeError),
    /// The model has no row for the opcode.
    UnknownOpcode(Opcode),
    /// The payload is shorter than the row's minimum.
    PayloadTooShort {
        opcode: Opcode,
        min_len: usize,
        actual: usize,
    },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed message: {err}"),
            Self::UnknownOpcode(opcode) => write!(f, "unknown opcode {opcode}"),
            Self::PayloadTooShort {
                opcode,
                min_len,
                actual,
            } => write!(
                f,
                "payload too short for {opcode}: {actual} bytes < {min_len}"
            ),
        }
    }
}

/// What happened to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A reply was accepted by the transport.
    Replied { opcode: Opcode, len: usize },
    /// The handler ran and had nothing to send.
    Completed,
    /// The message was discarded before reaching a handler.
    Dropped(DropReason),
    /// The opcode is routed to a handler that is not implemented.
    Unhandled(Handler),
    /// The handler rejected the request.
    HandlerFailed(HandlerError),
    /// The reply was built but the transport refused it.
    SendFailed(SendError),
}

impl DispatchOutcome {
    /// Returns `true` if a reply reached the transport.
    #[must_use]
    pub const fn is_replied(&self) -> bool {
        matches!(self, Self::Replied { .. })
    }

    /// Returns `true` if the message never reached a handler.
    #[must_use]
    pub const fn is_dropped(&self) -> bool {
        matches!(self, Self::Dropped(_))
    }
}

/// Decodes `bytes` and dispatches the message to `model`.
pub fn dispatch<M, T>(
    model: &M,
    ctx: &MessageContext,
    bytes: &[u8],
    limits: &Limits,
    transport: &mut T,
) -> DispatchOutcome
where
    M: Model + ?Sized,
    T: Transport + ?Sized,
{
    match decode_message(bytes, limits) {
        Ok(msg) => dispatch_message(model, ctx, msg, transport),
        Err(err) => {
            log::debug!("model 0x{:04X}: dropping message: {err}", model.model_id());
            DispatchOutcome::Dropped(DropReason::Malformed(err))
        }
    }
}

/// Dispatches an already framed message to `model`.
pub fn dispatch_message<M, T>(
    model: &M,
    ctx: &MessageContext,
    msg: WireMessage<'_>,
    transport: &mut T,
) -> DispatchOutcome
where
    M: Model + ?Sized,
    T: Transport + ?Sized,
{
    let model_id = model.model_id();

    let Some(entry) = find_entry(model.op_table(), msg.opcode) else {
        let reason = DropReason::UnknownOpcode(msg.opcode);
        log::debug!("model 0x{model_id:04X}: {reason}");
        return DispatchOutcome::Dropped(reason);
    };

    if msg.payload.len() < entry.min_len {
        let reason = DropReason::PayloadTooShort {
            opcode: msg.opcode,
            min_len: entry.min_len,
            actual: msg.payload.len(),
        };
        log::debug!("model 0x{model_id:04X}: {reason}");
        return DispatchOutcome::Dropped(reason);
    }

    log::trace!(
        "model 0x{model_id:04X}: {} from 0x{:04X} ({} bytes)",
        entry.handler,
        ctx.addr,
        msg.payload.len()
    );

    let reply = match entry.handler.handle(model.registry(), msg.payload) {
        Ok(Some(reply)) => reply,
        Ok(None) => return DispatchOutcome::Completed,
        Err(HandlerError::NotImplemented { handler }) => {
            log::warn!("model 0x{model_id:04X}: {handler} is not implemented");
            return DispatchOutcome::Unhandled(handler);
        }
        Err(err) => {
            log::warn!("model 0x{model_id:04X}: {} failed: {err}", entry.handler);
            return DispatchOutcome::HandlerFailed(err);
        }
    };

    let opcode = reply.opcode();
    let len = reply.len();
    match transport.send(&ctx.reply(), reply) {
        Ok(()) => DispatchOutcome::Replied { opcode, len },
        Err(err) => {
            log::error!(
                "model 0x{model_id:04X}: unable to send {opcode} to 0x{:04X}: {err}",
                ctx.addr
            );
            DispatchOutcome::SendFailed(err)
        }
    }
}
