//! Sensor model opcodes and model identifiers.

use wire::Opcode;

/// Sensor Server model identifier.
pub const SENSOR_SRV_MODEL_ID: u16 = 0x1100;

/// Sensor Setup Server model identifier.
pub const SENSOR_SETUP_SRV_MODEL_ID: u16 = 0x1101;

pub const DESCRIPTOR_GET: Opcode = Opcode::two(0x82, 0x30);
pub const DESCRIPTOR_STATUS: Opcode = Opcode::one(0x51);
pub const SENSOR_GET: Opcode = Opcode::two(0x82, 0x31);
pub const SENSOR_STATUS: Opcode = Opcode::one(0x52);
pub const COLUMN_GET: Opcode = Opcode::two(0x82, 0x32);
pub const COLUMN_STATUS: Opcode = Opcode::one(0x53);
pub const SERIES_GET: Opcode = Opcode::two(0x82, 0x33);
pub const SERIES_STATUS: Opcode = Opcode::one(0x54);
pub const CADENCE_GET: Opcode = Opcode::two(0x82, 0x34);
pub const CADENCE_SET: Opcode = Opcode::one(0x55);
pub const CADENCE_SET_UNACK: Opcode = Opcode::one(0x56);
pub const CADENCE_STATUS: Opcode = Opcode::one(0x57);
pub const SETTINGS_GET: Opcode = Opcode::two(0x82, 0x35);
pub const SETTINGS_STATUS: Opcode = Opcode::one(0x58);
pub const SETTING_GET: Opcode = Opcode::two(0x82, 0x36);
pub const SETTING_SET: Opcode = Opcode::one(0x59);
pub const SETTING_SET_UNACK: Opcode = Opcode::one(0x5A);
pub const SETTING_STATUS: Opcode = Opcode::one(0x5B);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_opcodes_are_two_octets() {
        for op in [
            DESCRIPTOR_GET,
            SENSOR_GET,
            COLUMN_GET,
            SERIES_GET,
            CADENCE_GET,
            SETTINGS_GET,
            SETTING_GET,
        ] {
            assert_eq!(op.encoded_len(), 2, "{op}");
            assert_eq!(op.raw() >> 8, 0x82);
        }
    }

    #[test]
    fn status_and_set_opcodes_are_one_octet() {
        let ops = [
            DESCRIPTOR_STATUS,
            SENSOR_STATUS,
            COLUMN_STATUS,
            SERIES_STATUS,
            CADENCE_SET,
            CADENCE_SET_UNACK,
            CADENCE_STATUS,
            SETTINGS_STATUS,
            SETTING_SET,
            SETTING_SET_UNACK,
            SETTING_STATUS,
        ];
        for (op, raw) in ops.iter().zip(0x51u32..) {
            assert_eq!(op.encoded_len(), 1);
            assert_eq!(op.raw(), raw);
        }
    }

    #[test]
    fn model_ids() {
        assert_eq!(SENSOR_SRV_MODEL_ID, 0x1100);
        assert_eq!(SENSOR_SETUP_SRV_MODEL_ID, SENSOR_SRV_MODEL_ID + 1);
    }
}
