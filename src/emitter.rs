//! Streaming writer for the FSCD binary dictionary.
//!
//! The header is written first with the record count left as a 4-byte gap.
//! Records are appended as they arrive, and [`DictWriter::finish`] seeks back
//! to fill in the count. That back-patch is the last write; a file whose
//! writer was never finished must not be loaded.

use std::io::{Seek, SeekFrom, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellDictError};
use crate::format::{
    COUNT_LEN, COUNT_OFFSET, DICT_MAGIC, HEADER_LEN, WORD_TERMINATOR, encoded_record_len,
    saturate_frequency,
};

/// Counters collected while emitting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitStats {
    /// Records written, equal to the patched header count.
    pub records: u64,
    /// Records whose frequency was clamped to the maximum.
    pub saturated: u64,
    /// Total size of the dictionary in bytes, header included.
    pub bytes_written: u64,
}

/// Binary dictionary writer over any seekable sink.
#[derive(Debug)]
pub struct DictWriter<W: Write + Seek> {
    writer: W,
    /// Sink offset of the magic marker.
    base: u64,
    stats: EmitStats,
}

impl<W: Write + Seek> DictWriter<W> {
    /// Write the magic marker and reserve the record count field.
    ///
    /// The dictionary starts at the sink's current position; the count is
    /// later patched relative to it.
    pub fn new(mut writer: W) -> Result<Self> {
        let base = writer
            .stream_position()
            .map_err(|e| SpellDictError::write(format!("Failed to locate output start: {e}")))?;
        writer
            .write_all(DICT_MAGIC)
            .map_err(|e| SpellDictError::write(format!("Failed to write magic: {e}")))?;
        writer
            .seek(SeekFrom::Current(COUNT_LEN as i64))
            .map_err(|e| SpellDictError::write(format!("Failed to reserve record count: {e}")))?;

        Ok(DictWriter {
            writer,
            base,
            stats: EmitStats {
                bytes_written: HEADER_LEN,
                ..EmitStats::default()
            },
        })
    }

    /// Append one record.
    ///
    /// Frequencies above `u16::MAX` are saturated. A word containing a zero
    /// byte cannot be terminated unambiguously and is rejected before
    /// anything is written.
    pub fn write_record(&mut self, frequency: u64, word: &[u8]) -> Result<()> {
        if let Some(offset) = word.iter().position(|&b| b == WORD_TERMINATOR) {
            return Err(SpellDictError::write(format!(
                "Record {} has a zero byte at word offset {offset}",
                self.stats.records + 1
            )));
        }

        let stored = saturate_frequency(frequency);
        if u64::from(stored) != frequency {
            self.stats.saturated += 1;
        }

        self.writer
            .write_u16::<LittleEndian>(stored)
            .and_then(|_| self.writer.write_all(word))
            .and_then(|_| self.writer.write_u8(WORD_TERMINATOR))
            .map_err(|e| {
                SpellDictError::write(format!(
                    "Failed to write record {}: {e}",
                    self.stats.records + 1
                ))
            })?;

        self.stats.records += 1;
        self.stats.bytes_written += encoded_record_len(word.len());
        Ok(())
    }

    /// Number of records written so far.
    pub fn records(&self) -> u64 {
        self.stats.records
    }

    /// Patch the record count into the header and flush.
    ///
    /// Returns the sink, positioned just after the count field, and the
    /// final counters.
    pub fn finish(mut self) -> Result<(W, EmitStats)> {
        let count = u32::try_from(self.stats.records).map_err(|_| {
            SpellDictError::write(format!(
                "{} records exceed the 32-bit record count",
                self.stats.records
            ))
        })?;

        self.writer
            .seek(SeekFrom::Start(self.base + COUNT_OFFSET))
            .map_err(|e| SpellDictError::write(format!("Failed to seek to record count: {e}")))?;
        self.writer
            .write_u32::<LittleEndian>(count)
            .map_err(|e| SpellDictError::write(format!("Failed to patch record count: {e}")))?;
        self.writer
            .flush()
            .map_err(|e| SpellDictError::write(format!("Failed to flush output: {e}")))?;

        debug!(
            "Patched record count {count} ({} bytes total)",
            self.stats.bytes_written
        );
        Ok((self.writer, self.stats))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;

    fn emit(records: &[(u64, &[u8])]) -> (Vec<u8>, EmitStats) {
        let mut writer = DictWriter::new(Cursor::new(Vec::new())).unwrap();
        for (frequency, word) in records {
            writer.write_record(*frequency, word).unwrap();
        }
        let (cursor, stats) = writer.finish().unwrap();
        (cursor.into_inner(), stats)
    }

    #[test]
    fn test_empty_dictionary() {
        let (bytes, stats) = emit(&[]);
        assert_eq!(bytes, b"FSCD0000\0\0\0\0");
        assert_eq!(stats.records, 0);
        assert_eq!(stats.bytes_written, 12);
    }

    #[test]
    fn test_record_layout() {
        let (bytes, stats) = emit(&[(3, b"cat"), (10, b"dog")]);

        let mut expected = b"FSCD0000".to_vec();
        expected.extend_from_slice(&[2, 0, 0, 0]);
        expected.extend_from_slice(&[0x03, 0x00]);
        expected.extend_from_slice(b"cat\0");
        expected.extend_from_slice(&[0x0A, 0x00]);
        expected.extend_from_slice(b"dog\0");

        assert_eq!(bytes, expected);
        assert_eq!(stats.records, 2);
        assert_eq!(stats.saturated, 0);
        assert_eq!(stats.bytes_written, bytes.len() as u64);
    }

    #[test]
    fn test_saturation() {
        let (bytes, stats) = emit(&[(70000, b"rare"), (65535, b"edge")]);
        assert_eq!(&bytes[12..14], &[0xFF, 0xFF]);
        assert_eq!(&bytes[14..19], b"rare\0");
        assert_eq!(&bytes[19..21], &[0xFF, 0xFF]);
        assert_eq!(stats.saturated, 1);
    }

    #[test]
    fn test_empty_word() {
        let (bytes, _) = emit(&[(1, b"")]);
        assert_eq!(&bytes[12..], &[0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_embedded_zero_rejected() {
        let mut writer = DictWriter::new(Cursor::new(Vec::new())).unwrap();
        match writer.write_record(1, b"a\0b") {
            Err(SpellDictError::Write(msg)) => assert!(msg.contains("Record 1")),
            other => panic!("Expected write error, got {other:?}"),
        }
        assert_eq!(writer.records(), 0);

        let (cursor, _) = writer.finish().unwrap();
        assert_eq!(cursor.into_inner(), b"FSCD0000\0\0\0\0");
    }

    #[test]
    fn test_count_patched_relative_to_start() {
        let mut sink = Cursor::new(b"PRE".to_vec());
        sink.set_position(3);

        let mut writer = DictWriter::new(sink).unwrap();
        writer.write_record(3, b"cat").unwrap();
        let (cursor, stats) = writer.finish().unwrap();
        let bytes = cursor.into_inner();

        assert_eq!(&bytes[..3], b"PRE");
        assert_eq!(&bytes[3..11], b"FSCD0000");
        assert_eq!(&bytes[11..15], &[1, 0, 0, 0]);
        assert_eq!(&bytes[15..], b"\x03\x00cat\0");
        assert_eq!(stats.bytes_written, bytes.len() as u64 - 3);
    }

    /// A sink that refuses to seek.
    #[derive(Debug, Default)]
    struct Unseekable(Vec<u8>);

    impl Write for Unseekable {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for Unseekable {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "not seekable"))
        }
    }

    #[test]
    fn test_seek_failure_is_fatal() {
        match DictWriter::new(Unseekable::default()) {
            Err(SpellDictError::Write(msg)) => assert!(msg.contains("output start")),
            other => panic!("Expected write error, got {other:?}"),
        }
    }
}
