//! Command-line interface implementation for recode.
//! Provides argument parsing and help text formatting using clap.

use clap::{builder::NonEmptyStringValueParser, error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::formatter::{CommandFormatter, DEFAULT_FORMATTER};

/// Environment variable consulted when `--src` is not given.
pub const SOURCE_ENV: &str = "RECODE_FILE";

/// Command-line arguments structure for recode.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "recode: render a template per input line and splice it between labeled comments",
    long_about = None
)]
pub struct Args {
    /// Source file to modify
    #[arg(short, long, value_name = "PATH", env = SOURCE_ENV)]
    pub src: Option<PathBuf>,

    /// Label of the comment pair (`<LABEL>-BEGIN` / `<LABEL>-END`)
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub label: String,

    /// Line-oriented input file, standard input when omitted
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Row template, rendered once per input line and joined with newlines
    #[arg(long, value_name = "TEMPLATE", default_value = "")]
    pub row: String,

    /// Column template, rendered once per input line and joined with --sep
    #[arg(long, value_name = "TEMPLATE", default_value = "")]
    pub col: String,

    /// Separator used in column mode
    #[arg(long, default_value = ",")]
    pub sep: String,

    /// Formatter executed on the rewritten file
    #[arg(long, value_name = "PROG", default_value = DEFAULT_FORMATTER)]
    pub formatter: String,

    /// Argument passed to the formatter before the file path; repeatable.
    /// Defaults to `--edition 2021` when the formatter is rustfmt
    #[arg(long = "formatter-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub formatter_args: Vec<String>,

    /// Do not run the formatter after splicing
    #[arg(long)]
    pub no_format: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Returns the source path, or an error when neither the flag nor the
    /// environment provided one.
    pub fn source_path(&self) -> Result<PathBuf> {
        match &self.src {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => Err(Error::MissingSourceError),
        }
    }

    /// Builds the formatter command from `--formatter` and `--formatter-arg`.
    pub fn command_formatter(&self) -> CommandFormatter {
        if self.formatter == DEFAULT_FORMATTER && self.formatter_args.is_empty() {
            return CommandFormatter::default();
        }
        CommandFormatter::new(self.formatter.as_str()).args(self.formatter_args.iter().cloned())
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text on stderr if `--label` is missing
///   or empty
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(e.kind(), ErrorKind::MissingRequiredArgument | ErrorKind::InvalidValue) {
                let help = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .render_help();
                eprintln!("{help}");
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
