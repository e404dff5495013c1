use bitstream::{ByteReader, ByteWriter};
use proptest::prelude::*;
use wire::{decode_message, DecodeError, Limits, MessageBuilder, Opcode};

fn opcode_strategy() -> impl Strategy<Value = Opcode> {
    prop_oneof![
        (0u8..0x7F).prop_map(Opcode::one),
        (any::<u8>(), any::<u8>()).prop_map(|(b0, b1)| Opcode::two(b0, b1)),
        (any::<u8>(), any::<u16>()).prop_map(|(b0, company)| Opcode::vendor(b0, company)),
    ]
}

proptest! {
    #[test]
    fn prop_opcode_roundtrip(opcode in opcode_strategy()) {
        let mut writer = ByteWriter::with_capacity(3);
        opcode.encode(&mut writer).unwrap();
        let bytes = writer.finish();
        prop_assert_eq!(bytes.len(), opcode.encoded_len());

        let mut reader = ByteReader::new(&bytes);
        prop_assert_eq!(Opcode::decode(&mut reader).unwrap(), opcode);
    }

    #[test]
    fn prop_message_payload_preserved(
        opcode in opcode_strategy(),
        payload in prop::collection::vec(any::<u8>(), 0..48),
    ) {
        let mut builder = MessageBuilder::new(opcode, payload.len()).unwrap();
        builder.payload().write_bytes(&payload).unwrap();
        let out = builder.finish();
        prop_assert!(out.has_mic_room());

        let msg = decode_message(out.as_bytes(), &Limits::default()).unwrap();
        prop_assert_eq!(msg.opcode, opcode);
        prop_assert_eq!(msg.payload, payload.as_slice());
    }

    #[test]
    fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..16)) {
        match decode_message(&bytes, &Limits::default()) {
            Ok(msg) => {
                prop_assert_eq!(msg.opcode.encoded_len() + msg.payload.len(), bytes.len());
            }
            Err(err) => {
                let framing_error = matches!(
                    err,
                    DecodeError::EmptyMessage
                        | DecodeError::ReservedOpcode { .. }
                        | DecodeError::TruncatedOpcode { .. }
                );
                prop_assert!(framing_error, "unexpected decode error {:?}", err);
            }
        }
    }
}
