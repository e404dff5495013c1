//! Registry validation and accessor errors.

use std::fmt;

use crate::PropertyId;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type for sensor and setting accessors.
pub type AccessResult<T> = Result<T, AccessError>;

/// Errors that can occur when building or validating a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two sensors share a property ID.
    DuplicateSensorId { id: PropertyId },

    /// Two settings of one sensor share a property ID.
    DuplicateSettingId {
        sensor: PropertyId,
        setting: PropertyId,
    },

    /// A tolerance does not fit its 12-bit field.
    ToleranceOutOfRange {
        sensor: PropertyId,
        kind: ToleranceKind,
        value: u16,
    },
}

/// Which tolerance bound an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleranceKind {
    Positive,
    Negative,
}

/// Errors reported by value and setting accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// No accessor is attached.
    Unavailable,

    /// The setting has no write accessor.
    ReadOnly,

    /// The value has the wrong size for the property.
    InvalidLength { expected: usize, actual: usize },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSensorId { id } => {
                write!(f, "duplicate sensor property id 0x{id:04X}")
            }
            Self::DuplicateSettingId { sensor, setting } => {
                write!(
                    f,
                    "duplicate setting property id 0x{setting:04X} on sensor 0x{sensor:04X}"
                )
            }
            Self::ToleranceOutOfRange {
                sensor,
                kind,
                value,
            } => {
                write!(
                    f,
                    "{kind} tolerance {value} of sensor 0x{sensor:04X} exceeds 12 bits"
                )
            }
        }
    }
}

impl fmt::Display for ToleranceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "no accessor attached"),
            Self::ReadOnly => write!(f, "setting is read-only"),
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid value length: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

impl std::error::Error for AccessError {}
