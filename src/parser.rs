//! Line-oriented parser for `<frequency> <word>` source text.
//!
//! The scan is a cursor over an immutable byte slice. Each record starts
//! with a run of ASCII digits (possibly empty), followed by exactly one space;
//! the rest of the line up to `\n` is the word. Whitespace, including blank
//! lines, may precede the digits. The final line may omit the newline.

use crate::error::{Result, SpellDictError};
use crate::format::WORD_TERMINATOR;

const EXPECTED_SEPARATOR: &str = "expected a space after the frequency";

/// Whitespace as classified by C `isspace` in the "C" locale.
fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

/// One parsed source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRecord<'a> {
    /// Frequency as written, saturated at `u64::MAX`.
    pub frequency: u64,
    /// Raw word bytes, without the newline.
    pub word: &'a [u8],
}

/// Iterator over the records of a source text.
///
/// Yields at most one error, after which it is exhausted.
#[derive(Debug, Clone)]
pub struct RecordParser<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    failed: bool,
}

impl<'a> RecordParser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        RecordParser {
            input,
            pos: 0,
            line: 0,
            failed: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current byte offset into the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn parse_record(&mut self) -> Result<SourceRecord<'a>> {
        let record_start = self.pos;
        let first_line = self.line + 1;
        let mut line_start = self.pos;
        self.line = first_line;

        // Like strtol, whitespace (blank lines included) may precede the
        // digits, but only counts when digits follow it.
        while let Some(&byte) = self.input.get(self.pos) {
            if !is_c_space(byte) {
                break;
            }
            self.pos += 1;
            if byte == b'\n' {
                self.line += 1;
                line_start = self.pos;
            }
        }

        let digits_start = self.pos;
        let mut frequency = 0u64;
        while let Some(&byte) = self.input.get(self.pos) {
            if !byte.is_ascii_digit() {
                break;
            }
            frequency = frequency
                .saturating_mul(10)
                .saturating_add(u64::from(byte - b'0'));
            self.pos += 1;
        }

        if self.pos == digits_start {
            self.pos = record_start;
            self.line = first_line;
            line_start = record_start;
        }

        if self.input.get(self.pos) != Some(&b' ') {
            let column = self.pos - line_start + 1;
            let reason = match self.input.get(self.pos).copied() {
                None => format!("unexpected end of input, {EXPECTED_SEPARATOR}"),
                Some(b'\n') => format!("unexpected end of line, {EXPECTED_SEPARATOR}"),
                Some(byte) => format!("unexpected byte 0x{byte:02x}, {EXPECTED_SEPARATOR}"),
            };
            return Err(SpellDictError::format(self.line, column, reason));
        }
        self.pos += 1;

        let word_start = self.pos;
        let rest = &self.input[word_start..];
        let word_len = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
        let word = &rest[..word_len];

        if let Some(offset) = word.iter().position(|&b| b == WORD_TERMINATOR) {
            return Err(SpellDictError::format(
                self.line,
                word_start + offset - line_start + 1,
                "word contains a zero byte",
            ));
        }

        // Step over the newline; on the last line this lands one past the end.
        self.pos = (word_start + word_len + 1).min(self.input.len());

        Ok(SourceRecord { frequency, word })
    }
}

impl<'a> Iterator for RecordParser<'a> {
    type Item = Result<SourceRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.input.len() {
            return None;
        }

        let record = self.parse_record();
        if record.is_err() {
            self.failed = true;
        }
        Some(record)
    }
}

impl std::iter::FusedIterator for RecordParser<'_> {}
