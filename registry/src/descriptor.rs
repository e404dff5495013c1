//! Sensor descriptor state.

use crate::error::{RegistryError, RegistryResult, ToleranceKind};
use crate::PropertyId;

/// Width of each tolerance field in bits.
pub const TOLERANCE_BITS: u8 = 12;

/// Largest encodable tolerance.
pub const TOLERANCE_MAX: u16 = (1 << TOLERANCE_BITS) - 1;

/// Measurement characteristics of one sensor.
///
/// Values are configuration codes and are sent as authored. Only the
/// tolerance fields are narrower than their storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Descriptor {
    /// Positive tolerance (12 bits).
    pub tolerance_pos: u16,
    /// Negative tolerance (12 bits).
    pub tolerance_neg: u16,
    /// Sampling function code.
    pub sampling_func: u8,
    /// Measurement period code.
    pub period: u8,
    /// Update interval code.
    pub interval: u8,
}

impl Descriptor {
    /// Creates a descriptor from raw codes.
    #[must_use]
    pub const fn new(
        tolerance_pos: u16,
        tolerance_neg: u16,
        sampling_func: u8,
        period: u8,
        interval: u8,
    ) -> Self {
        Self {
            tolerance_pos,
            tolerance_neg,
            sampling_func,
            period,
            interval,
        }
    }

    /// Returns `true` if both tolerances fit in 12 bits.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.tolerance_pos <= TOLERANCE_MAX && self.tolerance_neg <= TOLERANCE_MAX
    }

    pub(crate) fn validate(&self, sensor: PropertyId) -> RegistryResult<()> {
        for (kind, value) in [
            (ToleranceKind::Positive, self.tolerance_pos),
            (ToleranceKind::Negative, self.tolerance_neg),
        ] {
            if value > TOLERANCE_MAX {
                return Err(RegistryError::ToleranceOutOfRange {
                    sensor,
                    kind,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Returns the sampling function named by `sampling_func`.
    #[must_use]
    pub const fn sampling_function(&self) -> SamplingFunction {
        SamplingFunction::from_raw(self.sampling_func)
    }

    /// Positive tolerance as a percentage, `None` when unspecified.
    #[must_use]
    pub fn tolerance_pos_percent(&self) -> Option<f64> {
        tolerance_percent(self.tolerance_pos)
    }

    /// Negative tolerance as a percentage, `None` when unspecified.
    #[must_use]
    pub fn tolerance_neg_percent(&self) -> Option<f64> {
        tolerance_percent(self.tolerance_neg)
    }

    /// Measurement period in seconds, `None` when not applicable.
    #[must_use]
    pub fn period_secs(&self) -> Option<f64> {
        log_time_secs(self.period)
    }

    /// Update interval in seconds, `None` when not applicable.
    #[must_use]
    pub fn interval_secs(&self) -> Option<f64> {
        log_time_secs(self.interval)
    }
}

fn tolerance_percent(raw: u16) -> Option<f64> {
    if raw == 0 || raw > TOLERANCE_MAX {
        return None;
    }
    Some(f64::from(raw) * 100.0 / f64::from(TOLERANCE_MAX))
}

// Period and interval codes are 1.1^(n - 64) seconds; 0 means not applicable.
fn log_time_secs(code: u8) -> Option<f64> {
    if code == 0 {
        return None;
    }
    Some(1.1f64.powi(i32::from(code) - 64))
}

/// Standard sampling function codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplingFunction {
    Unspecified,
    Instantaneous,
    ArithmeticMean,
    Rms,
    Maximum,
    Minimum,
    Accumulated,
    Count,
    /// Any code outside the standard set, preserved as-is.
    Other(u8),
}

impl SamplingFunction {
    /// Parses a raw sampling function code.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0x00 => Self::Unspecified,
            0x01 => Self::Instantaneous,
            0x02 => Self::ArithmeticMean,
            0x03 => Self::Rms,
            0x04 => Self::Maximum,
            0x05 => Self::Minimum,
            0x06 => Self::Accumulated,
            0x07 => Self::Count,
            other => Self::Other(other),
        }
    }

    /// Returns the raw code.
    #[must_use]
    pub const fn raw(self) -> u8 {
        match self {
            Self::Unspecified => 0x00,
            Self::Instantaneous => 0x01,
            Self::ArithmeticMean => 0x02,
            Self::Rms => 0x03,
            Self::Maximum => 0x04,
            Self::Minimum => 0x05,
            Self::Accumulated => 0x06,
            Self::Count => 0x07,
            Self::Other(raw) => raw,
        }
    }
}

impl From<SamplingFunction> for u8 {
    fn from(func: SamplingFunction) -> Self {
        func.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_max_is_twelve_bits() {
        assert_eq!(TOLERANCE_MAX, 0x0FFF);
    }

    #[test]
    fn descriptor_construction() {
        let desc = Descriptor::new(10, 10, 1, 5, 2);
        assert_eq!(desc.tolerance_pos, 10);
        assert_eq!(desc.tolerance_neg, 10);
        assert_eq!(desc.sampling_func, 1);
        assert_eq!(desc.period, 5);
        assert_eq!(desc.interval, 2);
        assert!(desc.is_valid());
    }

    #[test]
    fn validate_accepts_boundaries() {
        assert!(Descriptor::new(0, 0, 0, 0, 0).validate(1).is_ok());
        assert!(Descriptor::new(0x0FFF, 0x0FFF, 0xFF, 0xFF, 0xFF)
            .validate(1)
            .is_ok());
    }

    #[test]
    fn validate_rejects_wide_positive_tolerance() {
        let err = Descriptor::new(0x1000, 0, 0, 0, 0).validate(0x56).unwrap_err();
        assert_eq!(
            err,
            RegistryError::ToleranceOutOfRange {
                sensor: 0x56,
                kind: ToleranceKind::Positive,
                value: 0x1000
            }
        );
    }

    #[test]
    fn validate_rejects_wide_negative_tolerance() {
        let desc = Descriptor::new(0, 0xFFFF, 0, 0, 0);
        assert!(!desc.is_valid());
        assert!(matches!(
            desc.validate(1),
            Err(RegistryError::ToleranceOutOfRange {
                kind: ToleranceKind::Negative,
                ..
            })
        ));
    }

    #[test]
    fn sampling_function_codes() {
        for raw in 0u8..=0xFF {
            assert_eq!(SamplingFunction::from_raw(raw).raw(), raw);
        }
        assert_eq!(
            Descriptor::new(0, 0, 2, 0, 0).sampling_function(),
            SamplingFunction::ArithmeticMean
        );
        assert_eq!(SamplingFunction::from_raw(0x08), SamplingFunction::Other(0x08));
    }

    #[test]
    fn unspecified_values_have_no_physical_meaning() {
        let desc = Descriptor::default();
        assert_eq!(desc.tolerance_pos_percent(), None);
        assert_eq!(desc.period_secs(), None);
        assert_eq!(desc.interval_secs(), None);
    }

    #[test]
    fn physical_conversions() {
        let desc = Descriptor::new(TOLERANCE_MAX, 0, 0, 64, 64);
        assert_eq!(desc.tolerance_pos_percent(), Some(100.0));
        assert_eq!(desc.period_secs(), Some(1.0));
        assert_eq!(desc.interval_secs(), Some(1.0));
    }
}
