//! Error handling for recode.
//! Defines the error type and result alias used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for recode operations.
///
/// Every fatal condition of a run maps to one variant. Per-line render failures
/// and formatter failures are reported through the same type but the caller
/// decides whether they stop the run.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system or stream operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The source file could not be parsed
    #[error("Syntax error in '{path}': {message}.")]
    SyntaxError { path: String, message: String },

    /// The Rust grammar could not be loaded or produced no tree
    #[error("Parser error: {0}.")]
    ParserError(String),

    /// Represents errors that occur during template compilation or rendering
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// The input data file could not be opened
    #[error("Cannot open input '{}': {source}.", path.display())]
    InputError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Neither `--src` nor `RECODE_FILE` named a source file
    #[error("No source file given: pass --src or set RECODE_FILE.")]
    MissingSourceError,

    /// The external formatter exited unsuccessfully
    #[error("Formatter error: {0}.")]
    FormatterError(String),
}

/// Convenience type alias for Results with recode's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
