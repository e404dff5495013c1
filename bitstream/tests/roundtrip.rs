use bitstream::{BitError, BitField, ByteReader, ByteWriter};

#[test]
fn bounded_writer_roundtrip_mixed() {
    let mut writer = ByteWriter::with_capacity(13);
    writer.write_u8(0x51).unwrap();
    writer.write_le16(0x0056).unwrap();
    writer.write_le32(0x0100_A00A).unwrap();
    writer.write_u8(5).unwrap();
    writer.write_u8(2).unwrap();
    assert_eq!(writer.remaining(), 4);
    let bytes = writer.finish();

    let mut reader = ByteReader::new(&bytes);
    assert_eq!(reader.read_u8().unwrap(), 0x51);
    assert_eq!(reader.read_le16().unwrap(), 0x0056);
    assert_eq!(reader.read_le32().unwrap(), 0x0100_A00A);
    assert_eq!(reader.read_bytes(2).unwrap(), &[5, 2]);
    assert!(reader.is_empty());
}

#[test]
fn reader_reports_truncation() {
    let mut reader = ByteReader::new(&[0x56, 0x00, 0x0A]);
    reader.read_le16().unwrap();
    assert_eq!(
        reader.read_le32().unwrap_err(),
        BitError::EndOfBuffer {
            requested: 4,
            available: 1
        }
    );
}

#[test]
fn bitfield_words_survive_le_encoding() {
    let field = BitField::new(24, 8);
    let word = field.checked_insert(0, 0xA5).unwrap();
    let mut writer = ByteWriter::with_capacity(4);
    writer.write_le32(word).unwrap();
    let bytes = writer.finish();
    assert_eq!(bytes[3], 0xA5);
}
