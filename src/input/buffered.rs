//! Buffered input for platforms or files where mapping is unavailable.

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::error::{Result, SpellDictError};

/// Read exactly `len` bytes of `file` into a buffer of `len + 1` bytes.
///
/// The extra trailing byte is zero. Fewer than `len` bytes available is a
/// short read and fails.
pub fn read_file(file: &File, len: usize) -> Result<Vec<u8>> {
    let mut reader = file;
    reader
        .seek(SeekFrom::Start(0))
        .map_err(|e| SpellDictError::resource(format!("Failed to rewind input: {e}")))?;

    let mut buffer = vec![0u8; len + 1];
    reader.read_exact(&mut buffer[..len]).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            SpellDictError::resource(format!("Short read: input is smaller than {len} bytes"))
        } else {
            SpellDictError::resource(format!("Failed to read input: {e}"))
        }
    })?;
    buffer[len] = 0;

    Ok(buffer)
}
