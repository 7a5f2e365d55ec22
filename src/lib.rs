//! # spelldict
//!
//! Compiler from human-edited frequency word lists to the compact `FSCD0000`
//! binary dictionary loaded by spell-checking and completion engines.
//!
//! ## Features
//!
//! - Single streaming pass: records are parsed and emitted one at a time
//! - Memory-mapped input with a buffered-read fallback
//! - Byte-exact little-endian output on every host
//! - Strict syntax checking with line/column diagnostics
//!
//! ## Example
//!
//! ```
//! use std::io::Cursor;
//!
//! let mut out = Cursor::new(Vec::new());
//! let report = spelldict::compile(b"3 cat\n10 dog\n", &mut out).unwrap();
//! assert_eq!(report.records, 2);
//! assert_eq!(&out.get_ref()[..8], b"FSCD0000");
//! ```

pub mod cli;
pub mod compiler;
pub mod emitter;
pub mod error;
pub mod format;
pub mod input;
pub mod parser;

pub use compiler::{CompileOptions, CompileReport, compile, compile_file};
pub use error::{Result, SpellDictError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
