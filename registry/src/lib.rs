//! Sensor, descriptor, and setting definitions for meshsensor.
//!
//! This crate defines what an element exposes through its sensor models:
//! - Sensor descriptors (tolerances, sampling function, period, interval)
//! - Sensors keyed by property ID, with optional settings
//! - Accessor traits for values and settings supplied by the application
//! - The validated, ordered registry shared by the server models
//!
//! # Design Principles
//!
//! - **Configured once** - A registry is built at startup and never mutated.
//! - **Explicit widths** - Descriptor fields narrower than their storage are validated.
//! - **Deterministic lookup** - Registry order is preserved; the first match wins.

mod descriptor;
mod error;
mod registry;
mod sensor;

pub use descriptor::{Descriptor, SamplingFunction, TOLERANCE_BITS, TOLERANCE_MAX};
pub use error::{AccessError, AccessResult, RegistryError, RegistryResult, ToleranceKind};
pub use registry::{RegistryBuilder, SensorRegistry};
pub use sensor::{Sensor, Setting, SettingStore, ValueSource};

/// A 16-bit device property identifier naming a sensor or a setting.
pub type PropertyId = u16;
