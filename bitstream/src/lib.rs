//! Little-endian byte and bit-field primitives for meshsensor.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] for the little-endian
//! scalar encoding used by mesh access messages, plus [`BitField`] for packing
//! several narrow fields into one 32-bit word.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads/writes are bounds-checked against a fixed capacity.
//! - **No domain knowledge** - This crate knows nothing about sensors, opcodes, or models.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bitstream::{BitField, ByteReader, ByteWriter};
//!
//! const LOW: BitField = BitField::new(0, 12);
//! const HIGH: BitField = BitField::new(12, 12);
//!
//! let word = HIGH.insert(LOW.insert(0, 10), 20);
//!
//! let mut writer = ByteWriter::with_capacity(6);
//! writer.write_le16(0x0056).unwrap();
//! writer.write_le32(word).unwrap();
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_le16().unwrap(), 0x0056);
//! let word = reader.read_le32().unwrap();
//! assert_eq!(LOW.extract(word), 10);
//! assert_eq!(HIGH.extract(word), 20);
//! ```

mod bitfield;
mod error;
mod reader;
mod writer;

pub use bitfield::{BitField, WORD_BITS};
pub use error::{BitError, BitResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;
