//! Post-splice formatting through an external program.

use log::debug;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Formats a file in place.
pub trait Formatter {
    fn format(&self, path: &Path) -> Result<()>;
}

/// Runs `<program> [args...] <path>` and waits for it to exit.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

/// Program and edition used when no formatter is configured.
pub const DEFAULT_FORMATTER: &str = "rustfmt";
pub const DEFAULT_EDITION: &str = "2021";

impl Default for CommandFormatter {
    /// `rustfmt --edition 2021`; without an edition rustfmt parses as 2015.
    fn default() -> Self {
        CommandFormatter::new(DEFAULT_FORMATTER).arg("--edition").arg(DEFAULT_EDITION)
    }
}

impl Formatter for CommandFormatter {
    /// # Errors
    /// * `Error::IoError` if the program cannot be started
    /// * `Error::FormatterError` if it exits with a failure status
    fn format(&self, path: &Path) -> Result<()> {
        debug!("Running {} on {}", self.program, path.display());
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        if !status.success() {
            return Err(Error::FormatterError(format!(
                "{} failed with status: {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

/// Formatter that leaves the file untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, path: &Path) -> Result<()> {
        debug!("Skipping formatting of {}", path.display());
        Ok(())
    }
}
