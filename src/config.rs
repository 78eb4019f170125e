use crate::cli::Cli;
use crate::errors::GeneratorError;
use regex::Regex;
use std::env;
use std::path::PathBuf;

/// Where generated scaffolds are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    /// Opened create-or-append; existing content is never truncated.
    File(PathBuf),
}

/// Explicit configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub target: OutputTarget,
    /// Root of the directory tree to scan.
    pub scope: PathBuf,
    /// Applied to candidate identifiers only, never to parameter or type names.
    pub pattern: Regex,
    /// Glob patterns for source files excluded from the scan.
    pub exclude: Vec<String>,
}

impl GeneratorConfig {
    /// Build a run configuration from parsed CLI arguments.
    ///
    /// The filter regex is compiled here so a malformed pattern aborts the
    /// run before any scanning starts.
    pub fn from_cli(cli: Cli) -> Result<Self, GeneratorError> {
        let pattern_src = cli.pattern.unwrap_or_else(|| ".*".to_string());
        let pattern = Regex::new(&pattern_src).map_err(|e| GeneratorError::Pattern {
            pattern: pattern_src,
            source: e,
        })?;

        let scope = match cli.package {
            Some(path) => path,
            None => env::current_dir().map_err(|e| GeneratorError::Read {
                path: PathBuf::from("."),
                source: e,
            })?,
        };

        let target = match cli.output {
            Some(path) => OutputTarget::File(path),
            None => OutputTarget::Stdout,
        };

        Ok(Self {
            target,
            scope,
            pattern,
            exclude: cli.exclude,
        })
    }
}
