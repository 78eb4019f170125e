use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "testgen")]
#[command(about = "Generate table-driven test scaffolds for Rust functions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Regex matched against function and method names; matches everything when omitted
    pub pattern: Option<String>,

    /// Append generated scaffolds to this file (stdout is the default)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory tree to scan (defaults to the current directory)
    #[arg(short, long)]
    pub package: Option<PathBuf>,

    /// Glob patterns for files to exclude from the scan
    #[arg(long = "exclude", value_delimiter = ',')]
    pub exclude: Vec<String>,
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
