//! Sensor Server and Sensor Setup Server model instances.

use std::sync::Arc;

use bitstream::ByteWriter;
use registry::SensorRegistry;

use crate::dispatch::{OpEntry, SENSOR_SETUP_SRV_OPS, SENSOR_SRV_OPS};
use crate::error::HandlerResult;
use crate::op::{SENSOR_SETUP_SRV_MODEL_ID, SENSOR_SRV_MODEL_ID};

/// A model as seen by the dispatcher.
pub trait Model {
    /// SIG model identifier.
    fn model_id(&self) -> u16;

    /// Opcodes this model accepts.
    fn op_table(&self) -> &'static [OpEntry];

    /// Sensors served by this model.
    fn registry(&self) -> &SensorRegistry;
}

/// Read-only sensor model.
#[derive(Debug, Clone)]
pub struct SensorServer {
    registry: Arc<SensorRegistry>,
}

/// Privileged model for cadence and settings.
#[derive(Debug, Clone)]
pub struct SensorSetupServer {
    registry: Arc<SensorRegistry>,
}

/// Creates both models on top of one shared registry.
#[must_use]
pub fn sensor_models(registry: Arc<SensorRegistry>) -> (SensorServer, SensorSetupServer) {
    (
        SensorServer::new(Arc::clone(&registry)),
        SensorSetupServer::new(registry),
    )
}

impl SensorServer {
    #[must_use]
    pub const fn new(registry: Arc<SensorRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the shared registry handle.
    #[must_use]
    pub const fn shared_registry(&self) -> &Arc<SensorRegistry> {
        &self.registry
    }

    /// Refreshes the periodic publication payload.
    ///
    /// Nothing is published yet: the buffer is left untouched.
    pub fn publish_update(&self, publication: &mut Publication) -> HandlerResult<()> {
        log::trace!(
            "model 0x{SENSOR_SRV_MODEL_ID:04X}: publication update ({} sensors, {} bytes capacity)",
            self.registry.len(),
            publication.capacity()
        );
        Ok(())
    }
}

impl SensorSetupServer {
    #[must_use]
    pub const fn new(registry: Arc<SensorRegistry>) -> Self {
        Self { registry }
    }

    /// Returns the shared registry handle.
    #[must_use]
    pub const fn shared_registry(&self) -> &Arc<SensorRegistry> {
        &self.registry
    }
}

impl Model for SensorServer {
    fn model_id(&self) -> u16 {
        SENSOR_SRV_MODEL_ID
    }

    fn op_table(&self) -> &'static [OpEntry] {
        SENSOR_SRV_OPS
    }

    fn registry(&self) -> &SensorRegistry {
        &self.registry
    }
}

impl Model for SensorSetupServer {
    fn model_id(&self) -> u16 {
        SENSOR_SETUP_SRV_MODEL_ID
    }

    fn op_table(&self) -> &'static [OpEntry] {
        SENSOR_SETUP_SRV_OPS
    }

    fn registry(&self) -> &SensorRegistry {
        &self.registry
    }
}

/// Buffer for unsolicited periodic publications.
#[derive(Debug)]
pub struct Publication {
    buffer: ByteWriter,
}

impl Publication {
    /// Sizes the buffer for a one-octet status opcode, a property ID, and a
    /// value of up to `max_value_size` bytes.
    #[must_use]
    pub fn for_sensor_values(max_value_size: usize) -> Self {
        Self {
            buffer: ByteWriter::with_capacity(1 + 2 + max_value_size),
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns the current payload.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn writer(&mut self) -> &mut ByteWriter {
        &mut self.buffer
    }
}
