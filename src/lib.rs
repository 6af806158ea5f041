//! recode renders a template once per line of an input stream and splices
//! the result between a pair of labeled comments in a Rust source file.

/// Command-line interface module
pub mod cli;

/// Error types and handling
pub mod error;

/// External formatter invoked after a splice
pub mod formatter;

/// Path and string helpers available inside templates
pub mod helpers;

/// BEGIN/END marker lookup
pub mod label;

/// Core orchestration: render, splice, write back
pub mod processor;

/// Template compilation and per-line rendering
pub mod renderer;

/// Source file loading and comment indexing
pub mod source;

/// Byte-exact replacement between two markers
pub mod splice;
