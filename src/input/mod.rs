//! Input acquisition for the dictionary compiler.
//!
//! The whole source file is exposed as one contiguous, read-only byte view.
//! Two interchangeable strategies back the view: a private read-only memory
//! map, or a heap buffer holding the file content followed by a zero byte.
//! Either way the view reads as zero one byte past the end of the content, so
//! scanners can look ahead without running off the end.

pub mod buffered;
pub mod mmap;

use std::fmt;
use std::fs::File;

use clap::ValueEnum;
use log::{debug, warn};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellDictError};

pub use buffered::read_file;
pub use mmap::map_file;

/// How the source file is brought into memory.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputStrategy {
    /// Map the file, falling back to a buffered read if mapping fails.
    #[default]
    Auto,
    /// Map the file; mapping failure is fatal.
    Mmap,
    /// Read the file into a heap buffer.
    Buffered,
}

/// The strategy that actually served a [`SourceView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Mmap,
    Buffered,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Mmap => write!(f, "mmap"),
            ViewKind::Buffered => write!(f, "buffered"),
        }
    }
}

#[derive(Debug)]
enum Backing {
    Mmap(Mmap),
    /// File content plus one trailing zero byte.
    Buffer(Vec<u8>),
}

/// Read-only view over the entire content of a source file.
///
/// The underlying mapping or buffer is released when the view is dropped.
#[derive(Debug)]
pub struct SourceView {
    backing: Backing,
    len: usize,
}

impl SourceView {
    /// Acquire a view over `file` using the given strategy.
    ///
    /// The file must be a regular file; its size is taken from its metadata
    /// before anything is mapped or read. A non-regular input, metadata
    /// failure, mapping failure (unless falling back) and short reads are all
    /// resource errors.
    pub fn open(file: &File, strategy: InputStrategy) -> Result<Self> {
        let metadata = file
            .metadata()
            .map_err(|e| SpellDictError::resource(format!("Failed to get file metadata: {e}")))?;

        // Pipes and devices report a size of zero; only a regular file has a
        // length that can be trusted up front.
        if !metadata.is_file() {
            return Err(SpellDictError::resource(format!(
                "Input is not a regular file ({:?})",
                metadata.file_type()
            )));
        }

        let len = usize::try_from(metadata.len()).map_err(|_| {
            SpellDictError::resource(format!(
                "Input of {} bytes does not fit in memory",
                metadata.len()
            ))
        })?;

        // An empty file cannot be mapped; it is trivially an empty buffer.
        if len == 0 {
            debug!("Empty input, skipping mmap");
            return Ok(SourceView::from_buffer(vec![0u8], 0));
        }

        match strategy {
            InputStrategy::Mmap => SourceView::mapped(file, len),
            InputStrategy::Buffered => SourceView::buffered(file, len),
            InputStrategy::Auto => match SourceView::mapped(file, len) {
                Ok(view) => Ok(view),
                Err(e) => {
                    warn!("{e}; falling back to buffered read");
                    SourceView::buffered(file, len)
                }
            },
        }
    }

    fn mapped(file: &File, len: usize) -> Result<Self> {
        let mmap = map_file(file, len)?;
        debug!("Mapped {len} input bytes");
        Ok(SourceView {
            backing: Backing::Mmap(mmap),
            len,
        })
    }

    fn buffered(file: &File, len: usize) -> Result<Self> {
        let buffer = read_file(file, len)?;
        debug!("Read {len} input bytes into buffer");
        Ok(SourceView::from_buffer(buffer, len))
    }

    fn from_buffer(buffer: Vec<u8>, len: usize) -> Self {
        debug_assert_eq!(buffer.len(), len + 1);
        debug_assert_eq!(buffer[len], 0);
        SourceView {
            backing: Backing::Buffer(buffer),
            len,
        }
    }

    /// The file content, without the trailing sentinel.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Mmap(mmap) => &mmap[..self.len],
            Backing::Buffer(buffer) => &buffer[..self.len],
        }
    }

    /// Byte at `index`, or zero at and past the end of the content.
    pub fn byte_at(&self, index: usize) -> u8 {
        self.as_bytes().get(index).copied().unwrap_or(0)
    }

    /// Exact length of the file content.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Which strategy backs this view.
    pub fn kind(&self) -> ViewKind {
        match self.backing {
            Backing::Mmap(_) => ViewKind::Mmap,
            Backing::Buffer(_) => ViewKind::Buffered,
        }
    }
}

impl AsRef<[u8]> for SourceView {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn temp_input(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_strategies_expose_same_bytes() {
        let input = temp_input(b"3 cat\n10 dog");

        for strategy in [
            InputStrategy::Auto,
            InputStrategy::Mmap,
            InputStrategy::Buffered,
        ] {
            let file = File::open(input.path()).unwrap();
            let view = SourceView::open(&file, strategy).unwrap();
            assert_eq!(view.as_bytes(), b"3 cat\n10 dog");
            assert_eq!(view.len(), 12);
            assert_eq!(view.byte_at(11), b'g');
            assert_eq!(view.byte_at(12), 0);
            assert_eq!(view.byte_at(1000), 0);
        }
    }

    #[test]
    fn test_view_kind() {
        let input = temp_input(b"1 a\n");

        let file = File::open(input.path()).unwrap();
        let view = SourceView::open(&file, InputStrategy::Mmap).unwrap();
        assert_eq!(view.kind(), ViewKind::Mmap);

        let view = SourceView::open(&file, InputStrategy::Buffered).unwrap();
        assert_eq!(view.kind(), ViewKind::Buffered);
    }

    #[cfg(unix)]
    #[test]
    fn test_character_device_rejected() {
        let file = File::open("/dev/null").unwrap();

        for strategy in [
            InputStrategy::Auto,
            InputStrategy::Mmap,
            InputStrategy::Buffered,
        ] {
            match SourceView::open(&file, strategy) {
                Err(SpellDictError::Resource(msg)) => assert!(msg.contains("not a regular file")),
                other => panic!("Expected resource error, got {other:?}"),
            }
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = File::open(dir.path()).unwrap();

        assert!(matches!(
            SourceView::open(&file, InputStrategy::Auto),
            Err(SpellDictError::Resource(_))
        ));
    }

    #[test]
    fn test_empty_file() {
        let input = temp_input(b"");
        let file = File::open(input.path()).unwrap();

        let view = SourceView::open(&file, InputStrategy::Mmap).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.as_bytes(), b"");
        assert_eq!(view.byte_at(0), 0);
    }
}
