//! Command line argument parsing for the snowcascade CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// snowcascade - multi-language stemming tokenizer for full-text indexes
#[derive(Parser, Debug, Clone)]
#[command(name = "snowcascade")]
#[command(about = "Stem, filter and compress text the way a snowball-tokenized index sees it")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SnowcascadeArgs {
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

impl SnowcascadeArgs {
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
    /// Run text through the snowball pipeline
    Tokenize(TokenizeArgs),

    /// List the supported stemmer languages
    Stemmers,

    /// Compress a file into the blob format
    Compress(TransformArgs),

    /// Restore a compressed blob
    Uncompress(TransformArgs),

    /// Check whether a file is a compressed blob
    #[command(name = "is-compressed")]
    IsCompressed(IsCompressedArgs),
}

/// Arguments for tokenizing text
#[derive(Parser, Debug, Clone)]
pub struct TokenizeArgs {
    /// Text to tokenize
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Tokenize as a query (enables stop-word suppression)
    #[arg(long)]
    pub query: bool,

    /// Tokenize as a prefix query
    #[arg(long)]
    pub prefix: bool,

    /// Stemmer languages in cascade order (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Drop tokens shorter than this many bytes
    #[arg(long)]
    pub min_token_length: Option<usize>,

    /// Stop-word file, one word per line (default: built-in English list)
    #[arg(long, value_name = "FILE")]
    pub stop_words: Option<PathBuf>,

    /// Stemmer settings file (JSON)
    #[arg(short, long, value_name = "FILE", env = "SNOWCASCADE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Delegate tokenizer
    #[arg(long, default_value = "unicode61")]
    pub delegate: String,
}

/// Arguments for commands that read one file and write another
#[derive(Parser, Debug, Clone)]
pub struct TransformArgs {
    /// Input file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

/// Arguments for checking a file
#[derive(Parser, Debug, Clone)]
pub struct IsCompressedArgs {
    /// File to check
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
