use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Profile delimited and JSON datasets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Profile a dataset: per-column dtypes, statistics, and frequency ranks
    Profile(ProfileArgs),
    /// Preview the first few records of a dataset in a formatted table
    Preview(PreviewArgs),
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Input file to profile ('-' reads the payload from stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Source name used for format hinting and reporting (defaults to the
    /// input file name; stdin has no hint and auto-detects the format)
    #[arg(long)]
    pub name: Option<String>,
    /// Character encoding of the input payload (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Emit the profile as a JSON document instead of rendered tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Input file to preview ('-' reads the payload from stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Source name used for format hinting (defaults to the input file name)
    #[arg(long)]
    pub name: Option<String>,
    /// Character encoding of the input payload (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Number of records to display (capped at the 50-record preview bound)
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}
