//! The ordered sensor collection shared by the server models.

use std::collections::HashSet;

use crate::error::{RegistryError, RegistryResult};
use crate::sensor::Sensor;
use crate::PropertyId;

/// Ordered, immutable set of sensors keyed by property ID.
///
/// Built once when the element is configured. Both the server and the setup
/// server read from the same instance; nothing mutates it afterwards.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorRegistry {
    sensors: Vec<Sensor>,
}

impl SensorRegistry {
    /// Creates a registry from sensors after validation.
    pub fn new(sensors: Vec<Sensor>) -> RegistryResult<Self> {
        let registry = Self { sensors };
        registry.validate()?;
        Ok(registry)
    }

    /// Creates a registry builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            sensors: Vec::new(),
        }
    }

    /// Validates registry invariants.
    ///
    /// Sensor IDs must be unique, setting IDs unique per sensor, and
    /// descriptor tolerances must fit their 12-bit fields.
    pub fn validate(&self) -> RegistryResult<()> {
        let mut sensor_ids = HashSet::new();
        for sensor in &self.sensors {
            if !sensor_ids.insert(sensor.id) {
                return Err(RegistryError::DuplicateSensorId { id: sensor.id });
            }
            sensor.descriptor.validate(sensor.id)?;

            let mut setting_ids = HashSet::new();
            for setting in &sensor.settings {
                if !setting_ids.insert(setting.id) {
                    return Err(RegistryError::DuplicateSettingId {
                        sensor: sensor.id,
                        setting: setting.id,
                    });
                }
            }
        }
        Ok(())
    }

    /// Finds the sensor with property ID `id`.
    ///
    /// Linear scan in registry order; the first match wins.
    #[must_use]
    pub fn lookup(&self, id: PropertyId) -> Option<&Sensor> {
        self.sensors.iter().find(|sensor| sensor.id == id)
    }

    /// Returns the sensors in registry order.
    #[must_use]
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Iterates over the sensors in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sensor> {
        self.sensors.iter()
    }

    /// Returns the number of sensors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// Returns `true` if the registry holds no sensors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

impl<'a> IntoIterator for &'a SensorRegistry {
    type Item = &'a Sensor;
    type IntoIter = std::slice::Iter<'a, Sensor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder for `SensorRegistry`.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    sensors: Vec<Sensor>,
}

impl RegistryBuilder {
    /// Adds a sensor.
    #[must_use]
    pub fn sensor(mut self, sensor: Sensor) -> Self {
        self.sensors.push(sensor);
        self
    }

    /// Builds the registry after validation.
    pub fn build(self) -> RegistryResult<SensorRegistry> {
        SensorRegistry::new(self.sensors)
    }
}
