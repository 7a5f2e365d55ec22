//! Output formatting for CLI commands.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SpellDictArgs};
use crate::compiler::CompileReport;
use crate::error::Result;

/// Result structure for dictionary compilation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompilationResult {
    pub output: String,
    #[serde(flatten)]
    pub report: CompileReport,
}

impl CompilationResult {
    pub fn new(output: &Path, report: CompileReport) -> Self {
        CompilationResult {
            output: output.to_string_lossy().to_string(),
            report,
        }
    }
}

/// Output a result in the specified format.
pub fn output_result(
    message: &str,
    result: &CompilationResult,
    args: &SpellDictArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human(message: &str, result: &CompilationResult, args: &SpellDictArgs) -> Result<()> {
    if args.verbosity() == 0 {
        return Ok(());
    }

    println!("{}", format_human(message, result));
    Ok(())
}

/// Render a compilation result as an aligned key/value summary.
pub fn format_human(message: &str, result: &CompilationResult) -> String {
    let report = &result.report;
    let mut lines = vec![message.to_string(), String::new()];

    lines.push(format!("  {:<18} {}", "Output:", result.output));
    lines.push(format!("  {:<18} {}", "Records:", report.records));
    if report.saturated_records > 0 {
        lines.push(format!(
            "  {:<18} {}",
            "Saturated:", report.saturated_records
        ));
    }
    lines.push(format!("  {:<18} {} bytes", "Input size:", report.input_bytes));
    lines.push(format!("  {:<18} {} bytes", "Output size:", report.output_bytes));
    if let Some(kind) = report.input_kind {
        lines.push(format!("  {:<18} {kind}", "Input loaded via:"));
    }
    lines.push(format!("  {:<18} {} ms", "Duration:", report.duration_ms));

    lines.join("\n")
}

/// Output in JSON format.
fn output_json(result: &CompilationResult, args: &SpellDictArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ViewKind;

    fn sample() -> CompilationResult {
        CompilationResult::new(
            Path::new("words.dict"),
            CompileReport {
                records: 2,
                saturated_records: 1,
                input_bytes: 17,
                output_bytes: 24,
                input_kind: Some(ViewKind::Mmap),
                duration_ms: 0,
            },
        )
    }

    #[test]
    fn test_format_human() {
        let text = format_human("Done", &sample());
        assert!(text.starts_with("Done\n"));
        assert!(text.contains("Records:"));
        assert!(text.contains("Saturated:"));
        assert!(text.contains("mmap"));
    }

    #[test]
    fn test_json_is_flat() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["output"], "words.dict");
        assert_eq!(value["records"], 2);
        assert_eq!(value["input_kind"], "mmap");
    }
}
