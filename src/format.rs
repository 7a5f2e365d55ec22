//! Layout constants of the FSCD binary dictionary.
//!
//! ```text
//! offset 0   8 bytes   magic "FSCD0000"
//! offset 8   4 bytes   record count (u32, little-endian)
//! offset 12  records   { frequency: u16 LE, word bytes, 0x00 } * count
//! ```
//!
//! There is no padding between records and no trailer.

/// Magic marker identifying the format and its version.
pub const DICT_MAGIC: &[u8; 8] = b"FSCD0000";

/// Length of the magic marker.
pub const MAGIC_LEN: usize = DICT_MAGIC.len();

/// Byte offset of the record count field.
pub const COUNT_OFFSET: u64 = MAGIC_LEN as u64;

/// Width of the record count field.
pub const COUNT_LEN: usize = 4;

/// Total header size.
pub const HEADER_LEN: u64 = (MAGIC_LEN + COUNT_LEN) as u64;

/// Largest frequency representable in a record.
pub const MAX_FREQUENCY: u16 = u16::MAX;

/// Terminator written after every word.
pub const WORD_TERMINATOR: u8 = 0;

/// Clamp a source frequency into the persisted range.
pub fn saturate_frequency(value: u64) -> u16 {
    u16::try_from(value).unwrap_or(MAX_FREQUENCY)
}

/// Encoded size of a record whose word is `word_len` bytes long.
pub fn encoded_record_len(word_len: usize) -> u64 {
    2 + word_len as u64 + 1
}
