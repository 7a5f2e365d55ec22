//! Memory-mapped input.

use std::fs::File;

use memmap2::{Mmap, MmapOptions};

use crate::error::{Result, SpellDictError};

/// Map the first `len` bytes of `file` read-only.
///
/// The mapping is private: nothing written to the file by another process is
/// promised to show through, and the compiler never writes to it.
pub fn map_file(file: &File, len: usize) -> Result<Mmap> {
    // SAFETY: the map is only read, and it is dropped before the compiler
    // returns. Concurrent truncation of the source by another process is not
    // supported, the same as for any mmap-based reader.
    let mmap = unsafe {
        MmapOptions::new()
            .len(len)
            .map(file)
            .map_err(|e| SpellDictError::resource(format!("Failed to mmap input: {e}")))?
    };

    if mmap.len() < len {
        return Err(SpellDictError::resource(format!(
            "Mapped {} bytes, expected {len}",
            mmap.len()
        )));
    }

    Ok(mmap)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_map_file() {
        let mut input = NamedTempFile::new().unwrap();
        input.write_all(b"5 mapped\n").unwrap();
        input.flush().unwrap();

        let file = File::open(input.path()).unwrap();
        let mmap = map_file(&file, 9).unwrap();
        assert_eq!(&mmap[..], b"5 mapped\n");
    }
}
