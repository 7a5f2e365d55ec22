//! Text-to-binary dictionary compilation.
//!
//! [`compile`] drives the parser and the emitter together, one record at a
//! time, so memory use is bounded by the input view rather than by the
//! number of records. [`compile_file`] adds path handling on top.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::emitter::DictWriter;
use crate::error::{Result, SpellDictError};
use crate::input::{InputStrategy, SourceView, ViewKind};
use crate::parser::RecordParser;

/// Options controlling a compilation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// How the source file is loaded.
    pub input_strategy: InputStrategy,
    /// Delete the output file if compilation fails after it was created.
    ///
    /// Off by default: a failed run leaves whatever was written in place,
    /// and the caller must not use it.
    pub remove_partial_output: bool,
}

impl CompileOptions {
    /// Load options from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SpellDictError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Summary of a successful compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileReport {
    pub records: u64,
    pub saturated_records: u64,
    pub input_bytes: u64,
    pub output_bytes: u64,
    /// Present when the input came from a file.
    pub input_kind: Option<ViewKind>,
    pub duration_ms: u64,
}

/// Compile source text into a binary dictionary written to `writer`.
///
/// The dictionary is written from the writer's current position onward. On
/// success the record count has been patched and the writer flushed.
pub fn compile<W: Write + Seek>(input: &[u8], writer: W) -> Result<CompileReport> {
    let start = Instant::now();
    let mut dict = DictWriter::new(writer)?;

    for record in RecordParser::new(input) {
        let record = record?;
        dict.write_record(record.frequency, record.word)?;
    }

    let (_, stats) = dict.finish()?;

    Ok(CompileReport {
        records: stats.records,
        saturated_records: stats.saturated,
        input_bytes: input.len() as u64,
        output_bytes: stats.bytes_written,
        input_kind: None,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Compile the dictionary at `input` into `output`.
///
/// The output is created if absent and truncated if present, with mode
/// 0644 on Unix. Either path failing to open aborts before anything is
/// compiled.
pub fn compile_file<P, Q>(input: P, output: Q, options: &CompileOptions) -> Result<CompileReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    let output = output.as_ref();

    let source = File::open(input).map_err(|e| {
        SpellDictError::resource(format!("Failed to open input {}: {e}", input.display()))
    })?;
    let sink = open_output(output)?;

    debug!(
        "Compiling {} -> {} ({:?} input)",
        input.display(),
        output.display(),
        options.input_strategy
    );

    let result = compile_source(&source, sink, options);

    match result {
        Ok(report) => {
            info!(
                "Compiled {} records into {} ({} bytes, {} saturated)",
                report.records,
                output.display(),
                report.output_bytes,
                report.saturated_records
            );
            Ok(report)
        }
        Err(e) => {
            if options.remove_partial_output {
                warn!("Removing partial output {}", output.display());
                if let Err(remove_err) = fs::remove_file(output) {
                    warn!("Failed to remove {}: {remove_err}", output.display());
                }
            }
            Err(e)
        }
    }
}

fn compile_source(source: &File, sink: File, options: &CompileOptions) -> Result<CompileReport> {
    let view = SourceView::open(source, options.input_strategy)?;

    let mut writer = BufWriter::new(sink);
    let mut report = compile(view.as_bytes(), &mut writer)?;
    report.input_kind = Some(view.kind());

    let sink = writer
        .into_inner()
        .map_err(|e| SpellDictError::write(format!("Failed to flush output: {}", e.error())))?;
    sink.sync_all()
        .map_err(|e| SpellDictError::write(format!("Failed to sync output: {e}")))?;

    Ok(report)
}

fn open_output(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    options.open(path).map_err(|e| {
        SpellDictError::resource(format!("Failed to open output {}: {e}", path.display()))
    })
}
