//! Command line argument parsing for the spelldict CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::input::InputStrategy;

/// spelldict - compile frequency word lists into binary spelling dictionaries
#[derive(Parser, Debug, Clone)]
#[command(name = "spelldict")]
#[command(about = "Compile frequency word lists into binary spelling dictionaries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpellDictArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpellDictArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compile a text frequency list into a binary dictionary
    #[command(name = "comp-dict")]
    CompDict(CompDictArgs),
}

/// Arguments for dictionary compilation
#[derive(Parser, Debug, Clone)]
pub struct CompDictArgs {
    /// Source word list, one "<frequency> <word>" per line
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Binary dictionary to write (created or truncated)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// How to load the input file
    #[arg(long, value_name = "STRATEGY", env = "SPELLDICT_INPUT_STRATEGY")]
    pub input_strategy: Option<InputStrategy>,

    /// Delete the output file if compilation fails
    #[arg(long)]
    pub remove_partial: bool,

    /// JSON file with compile options; flags take precedence
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// JSON report
    Json,
}
