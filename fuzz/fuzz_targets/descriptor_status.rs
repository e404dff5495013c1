#![no_main]

use libfuzzer_sys::fuzz_target;
use server::{decode_descriptor_status, DescriptorEntry};

fuzz_target!(|data: &[u8]| {
    if let Ok(entries) = decode_descriptor_status(data) {
        let total: usize = entries.iter().map(DescriptorEntry::encoded_len).sum();
        assert_eq!(total, data.len());
    }
});
