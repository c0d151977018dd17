//! CLI command definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cubridor: offline set algebra over saved coverage files
#[derive(Parser, Debug)]
#[command(name = "cubridor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge coverage files into one cumulative file
    Merge(MergeArgs),

    /// Show coverage in the current file that a baseline lacks
    Diff(DiffArgs),

    /// Show coverage present in both files
    Intersect(PairArgs),

    /// Show coverage present in exactly one of two files
    Symdiff(PairArgs),

    /// Check whether the first file's coverage contains the second's
    ///
    /// Exits non-zero when it does not, so scripts can branch on it.
    Contains(ContainsArgs),

    /// Export a coverage file as human-readable text
    Export(ExportArgs),

    /// Summarize a coverage file
    Show(ShowArgs),
}

/// Arguments for the merge command
#[derive(Parser, Debug)]
pub struct MergeArgs {
    /// Input coverage files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output coverage file
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the diff command
#[derive(Parser, Debug)]
pub struct DiffArgs {
    /// Baseline coverage file
    pub baseline: PathBuf,

    /// Current coverage file
    pub current: PathBuf,

    /// Write the result as a binary coverage file instead of text on stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the two-operand set commands
#[derive(Parser, Debug)]
pub struct PairArgs {
    /// First coverage file
    pub first: PathBuf,

    /// Second coverage file
    pub second: PathBuf,

    /// Write the result as a binary coverage file instead of text on stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the contains command
#[derive(Parser, Debug)]
pub struct ContainsArgs {
    /// Coverage file expected to be the superset
    pub haystack: PathBuf,

    /// Coverage file expected to be the subset
    pub needle: PathBuf,
}

/// Arguments for the export command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Input coverage file
    pub input: PathBuf,

    /// Output text file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Input coverage file
    pub input: PathBuf,

    /// Emit the collection as JSON
    #[arg(long)]
    pub json: bool,

    /// Dump every offset instead of the per-module summary
    #[arg(long)]
    pub full: bool,
}
