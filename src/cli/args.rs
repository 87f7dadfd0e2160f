//! Command line argument parsing for the clinorm CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// clinorm - token classification and normalization for concept lookup
#[derive(Parser, Debug, Clone)]
#[command(name = "clinorm")]
#[command(about = "Classify and normalize tokens for clinical concept lookup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ClinormArgs {
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

impl ClinormArgs {
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
    /// Annotate the tokens of a text
    Annotate(AnnotateArgs),

    /// Validate a configuration file and show the rule order
    #[command(name = "check-config")]
    CheckConfig(CheckConfigArgs),
}

/// Arguments for annotating a text
#[derive(Parser, Debug, Clone)]
pub struct AnnotateArgs {
    /// Text to annotate (reads --input or stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Normalization settings (JSON); the clinical preset when omitted
    #[arg(short, long, value_name = "CONFIG_FILE", env = "CLINORM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Lexicon file (surface<TAB>lemma[<TAB>POS])
    #[arg(short, long, value_name = "LEXICON_FILE")]
    pub lexicon: Option<PathBuf>,

    /// Spelling dictionary (one word, or `word frequency`, per line)
    #[arg(short, long, value_name = "DICTIONARY_FILE")]
    pub dictionary: Option<PathBuf>,

    /// Fail on the first collaborator error instead of skipping the token
    #[arg(long)]
    pub strict: bool,

    /// Only show tokens kept for matching
    #[arg(long)]
    pub kept_only: bool,
}

/// Arguments for validating a configuration
#[derive(Parser, Debug, Clone)]
pub struct CheckConfigArgs {
    /// Normalization settings (JSON); the clinical preset when omitted
    #[arg(short, long, value_name = "CONFIG_FILE", env = "CLINORM_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
