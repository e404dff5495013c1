//! Sensors, settings, and their accessors.

use std::fmt;
use std::sync::Arc;

use crate::descriptor::Descriptor;
use crate::error::{AccessError, AccessResult};
use crate::PropertyId;

/// Source of a sensor's current raw value.
///
/// Implementations are owned by the application and must be safe to call
/// from whichever context delivers inbound messages.
pub trait ValueSource: Send + Sync {
    /// Appends the current encoded value of `sensor` to `out`.
    fn read(&self, sensor: PropertyId, out: &mut Vec<u8>) -> AccessResult<()>;
}

/// Backing storage for one sensor setting.
pub trait SettingStore: Send + Sync {
    /// Appends the current encoded setting value to `out`.
    fn read(&self, out: &mut Vec<u8>) -> AccessResult<()>;

    /// Replaces the setting value.
    fn write(&self, _value: &[u8]) -> AccessResult<()> {
        Err(AccessError::ReadOnly)
    }

    /// Returns `true` if [`write`](Self::write) is supported.
    fn is_writable(&self) -> bool {
        false
    }
}

/// A configurable parameter of a sensor.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Setting {
    pub id: PropertyId,
    #[cfg_attr(feature = "serde", serde(skip))]
    store: Option<Arc<dyn SettingStore>>,
}

impl Setting {
    /// Creates a setting with no backing store.
    #[must_use]
    pub const fn new(id: PropertyId) -> Self {
        Self { id, store: None }
    }

    /// Creates a setting backed by `store`.
    #[must_use]
    pub fn with_store(id: PropertyId, store: Arc<dyn SettingStore>) -> Self {
        Self {
            id,
            store: Some(store),
        }
    }

    /// Returns `true` if a backing store is attached.
    #[must_use]
    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Returns `true` if the setting accepts writes.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.store.as_ref().is_some_and(|store| store.is_writable())
    }

    /// Reads the setting value into `out`.
    pub fn read(&self, out: &mut Vec<u8>) -> AccessResult<()> {
        match &self.store {
            Some(store) => store.read(out),
            None => Err(AccessError::Unavailable),
        }
    }

    /// Writes a new setting value.
    pub fn write(&self, value: &[u8]) -> AccessResult<()> {
        match &self.store {
            Some(store) if store.is_writable() => store.write(value),
            Some(_) => Err(AccessError::ReadOnly),
            None => Err(AccessError::Unavailable),
        }
    }
}

impl fmt::Debug for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("id", &self.id)
            .field("has_store", &self.has_store())
            .finish()
    }
}

/// One sensor exposed by an element.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sensor {
    /// Property ID, the lookup key.
    pub id: PropertyId,
    pub descriptor: Descriptor,
    #[cfg_attr(feature = "serde", serde(default))]
    pub settings: Vec<Setting>,
    #[cfg_attr(feature = "serde", serde(skip))]
    source: Option<Arc<dyn ValueSource>>,
}

impl Sensor {
    /// Creates a sensor with no settings and no value source.
    #[must_use]
    pub const fn new(id: PropertyId, descriptor: Descriptor) -> Self {
        Self {
            id,
            descriptor,
            settings: Vec::new(),
            source: None,
        }
    }

    /// Adds a setting.
    #[must_use]
    pub fn with_setting(mut self, setting: Setting) -> Self {
        self.settings.push(setting);
        self
    }

    /// Attaches the value source.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn ValueSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Returns `true` if a value source is attached.
    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Reads the current value into `out`.
    pub fn read_value(&self, out: &mut Vec<u8>) -> AccessResult<()> {
        match &self.source {
            Some(source) => source.read(self.id, out),
            None => Err(AccessError::Unavailable),
        }
    }

    /// Finds a setting by property ID (first match).
    #[must_use]
    pub fn find_setting(&self, id: PropertyId) -> Option<&Setting> {
        self.settings.iter().find(|setting| setting.id == id)
    }
}

impl fmt::Debug for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sensor")
            .field("id", &self.id)
            .field("descriptor", &self.descriptor)
            .field("settings", &self.settings)
            .field("has_source", &self.has_source())
            .finish()
    }
}
