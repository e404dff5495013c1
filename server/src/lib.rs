//! Sensor Server and Sensor Setup Server models for meshsensor.
//!
//! This crate connects the wire framing to the sensor registry:
//! - Opcode tables for the two models and the minimum-length gate
//! - Request handlers, with Descriptor Get fully implemented
//! - The Descriptor Status codec, including a client-side parser
//! - A transport seam for replies and the periodic publication buffer
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use registry::{Descriptor, Sensor, SensorRegistry};
//! use server::{dispatch, sensor_models, BufferedTransport, MessageContext};
//! use wire::Limits;
//!
//! let registry = SensorRegistry::builder()
//!     .sensor(Sensor::new(0x0056, Descriptor::new(10, 10, 1, 5, 2)))
//!     .build()?;
//! let (srv, _setup) = sensor_models(Arc::new(registry));
//!
//! let limits = Limits::default();
//! let mut transport = BufferedTransport::new(limits.clone());
//! let ctx = MessageContext::new(0, 0, 0x0001);
//!
//! let outcome = dispatch(&srv, &ctx, &[0x82, 0x30], &limits, &mut transport);
//! assert!(outcome.is_replied());
//! assert_eq!(
//!     transport.sent()[0].message.as_bytes(),
//!     &[0x51, 0x56, 0x00, 0x0A, 0xA0, 0x00, 0x01, 0x05, 0x02]
//! );
//! # Ok::<(), registry::RegistryError>(())
//! ```

mod descriptor;
mod dispatch;
mod error;
mod handlers;
mod model;
pub mod op;
mod transport;

pub use descriptor::{
    decode_descriptor_status, decode_descriptor_status_message, encode_descriptor_entry,
    encode_missing_entry, pack_tolerance_word, unpack_tolerance_word, DescriptorEntry,
    DESCRIPTOR_ENTRY_SIZE, MISSING_ENTRY_SIZE, PACKED_RECORD_SIZE, SAMPLING_FUNC, TOLERANCE_NEG,
    TOLERANCE_POS,
};
pub use dispatch::{
    dispatch, dispatch_message, find_entry, DispatchOutcome, DropReason, Handler, OpEntry,
    SENSOR_SETUP_SRV_OPS, SENSOR_SRV_OPS,
};
pub use error::{CodecError, CodecResult, HandlerError, HandlerResult, SendError};
pub use handlers::descriptor_get;
pub use model::{sensor_models, Model, Publication, SensorServer, SensorSetupServer};
pub use op::{SENSOR_SETUP_SRV_MODEL_ID, SENSOR_SRV_MODEL_ID};
pub use transport::{BufferedTransport, MessageContext, SentMessage, Transport, TTL_DEFAULT};
