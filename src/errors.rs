//! Unrecoverable error types for a generation run.
//!
//! Configuration problems (`Pattern`, `Output`) surface before the scan
//! begins; `Read`, `Parse` and `Walk` abort the scan; `Render` is the one
//! mid-stream fatal condition. Per-declaration problems (unresolvable span,
//! unsupported type shape) are logged and skipped instead of being
//! represented here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The name filter is not a valid regular expression.
    #[error("invalid name filter '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The output destination could not be opened for appending.
    #[error("cannot open output '{path}': {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source file could not be read.
    #[error("cannot read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A source file could not be parsed as Rust.
    #[error("cannot parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    /// Directory traversal failed below the scan root.
    #[error("walking '{path}': {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// Writing a scaffold failed; already-written output is not retracted.
    #[error("writing scaffold for '{function}': {source}")]
    Render {
        function: String,
        #[source]
        source: io::Error,
    },
}
