//! Command implementations for the spelldict CLI.

use log::debug;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::compiler::{CompileOptions, compile_file};
use crate::error::Result;

/// Execute a CLI command.
pub fn execute_command(args: SpellDictArgs) -> Result<()> {
    match &args.command {
        Command::CompDict(comp_args) => compile_dictionary(comp_args.clone(), &args),
    }
}

/// Compile a text dictionary into its binary form.
fn compile_dictionary(args: CompDictArgs, cli_args: &SpellDictArgs) -> Result<()> {
    let options = resolve_options(&args)?;
    debug!("Compile options: {options:?}");

    if cli_args.verbosity() > 1 {
        println!(
            "Compiling {} -> {}",
            args.input.display(),
            args.output.display()
        );
    }

    let report = compile_file(&args.input, &args.output, &options)?;

    output_result(
        "Dictionary compiled successfully",
        &CompilationResult::new(&args.output, report),
        cli_args,
    )
}

/// Merge the optional config file with command line flags.
pub fn resolve_options(args: &CompDictArgs) -> Result<CompileOptions> {
    let mut options = match &args.config {
        Some(path) => CompileOptions::from_json_file(path)?,
        None => CompileOptions::default(),
    };

    if let Some(strategy) = args.input_strategy {
        options.input_strategy = strategy;
    }
    if args.remove_partial {
        options.remove_partial_output = true;
    }

    Ok(options)
}
