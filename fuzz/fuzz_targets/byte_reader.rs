#![no_main]

use bitstream::ByteReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of reads.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 5;
        idx += 1;

        let before = reader.position();
        let ok = match op {
            0 => reader.read_u8().is_ok(),
            1 => reader.read_le16().is_ok(),
            2 => reader.read_le32().is_ok(),
            3 => reader.read_be16().is_ok(),
            _ => {
                let len = usize::from(data[idx - 1] % 16);
                reader.read_bytes(len).is_ok()
            }
        };
        if !ok {
            assert_eq!(reader.position(), before);
        }
    }
});
