//! Request handlers.

use bitstream::ByteReader;
use registry::SensorRegistry;
use wire::{MessageBuilder, OutboundMessage};

use crate::descriptor::{
    encode_descriptor_entry, encode_missing_entry, DESCRIPTOR_ENTRY_SIZE, MISSING_ENTRY_SIZE,
};
use crate::error::{HandlerError, HandlerResult};
use crate::op;

/// Builds the Descriptor Status reply for a Descriptor Get request.
///
/// An empty request lists every sensor in registry order. Otherwise the
/// leading property ID selects one sensor; an unknown ID is echoed back on
/// its own. Bytes after the ID are ignored.
pub fn descriptor_get(registry: &SensorRegistry, payload: &[u8]) -> HandlerResult<OutboundMessage> {
    if payload.is_empty() {
        let mut msg =
            MessageBuilder::new(op::DESCRIPTOR_STATUS, DESCRIPTOR_ENTRY_SIZE * registry.len())?;
        for sensor in registry {
            encode_descriptor_entry(sensor, msg.payload())?;
        }
        return Ok(msg.finish());
    }

    let id = ByteReader::new(payload)
        .read_le16()
        .map_err(HandlerError::Malformed)?;

    let msg = match registry.lookup(id) {
        Some(sensor) => {
            let mut msg = MessageBuilder::new(op::DESCRIPTOR_STATUS, DESCRIPTOR_ENTRY_SIZE)?;
            encode_descriptor_entry(sensor, msg.payload())?;
            msg
        }
        None => {
            log::debug!("descriptor get: property 0x{id:04X} not present");
            let mut msg = MessageBuilder::new(op::DESCRIPTOR_STATUS, MISSING_ENTRY_SIZE)?;
            encode_missing_entry(id, msg.payload())?;
            msg
        }
    };
    Ok(msg.finish())
}
