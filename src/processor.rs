//! Core orchestration: index the source, render the input, splice and write.

use log::debug;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Result},
    formatter::Formatter,
    label::LabelPair,
    renderer::Renderer,
    source::SourceFile,
    splice::splice,
};

/// Opens the input stream: the file at `path`, or standard input.
///
/// # Errors
/// * `Error::InputError` if the file cannot be opened
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .map_err(|source| Error::InputError { path: path.to_path_buf(), source })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Result of rendering, computed before anything is written.
#[derive(Debug)]
pub struct Plan {
    pub path: PathBuf,
    /// The rendered block, printed whether or not a splice happens.
    pub block: String,
    /// New file content when the label pair was found.
    pub content: Option<String>,
}

/// What `Processor::apply` did with a plan.
#[derive(Debug)]
pub enum Applied {
    /// No label pair; the file was not touched.
    Skipped,
    /// The file was rewritten. Carries the formatter's result.
    Written { format: Result<()> },
}

pub struct Processor<'a> {
    renderer: &'a Renderer,
    formatter: &'a dyn Formatter,
    label: String,
}

impl<'a> Processor<'a> {
    pub fn new<S: Into<String>>(
        renderer: &'a Renderer,
        formatter: &'a dyn Formatter,
        label: S,
    ) -> Self {
        Self { renderer, formatter, label: label.into() }
    }

    /// Loads the source at `path`, renders `reader` and computes the spliced
    /// content without touching the file.
    ///
    /// # Errors
    /// * `Error::IoError` or `Error::SyntaxError` if the source cannot be loaded
    /// * `Error::IoError` if reading the input fails
    pub fn plan<P: AsRef<Path>, R: BufRead>(&self, path: P, reader: R) -> Result<Plan> {
        let source = SourceFile::load(path)?;
        let pair = LabelPair::locate(&self.label, &source.comments);
        let block = self.renderer.render(reader)?;

        let content = match pair {
            Some(pair) => {
                debug!("Splicing between {:?} and {:?}", pair.begin, pair.end);
                Some(splice(&source.content, &pair, &block))
            }
            None => {
                debug!("No '{}' label pair in {}", self.label, source.path.display());
                None
            }
        };

        Ok(Plan { path: source.path, block, content })
    }

    /// Writes the planned content back and formats the file.
    ///
    /// A formatter failure does not fail this call; it is returned inside
    /// `Applied::Written` for the caller to inspect.
    ///
    /// # Errors
    /// * `Error::IoError` if the file cannot be written
    pub fn apply(&self, plan: &Plan) -> Result<Applied> {
        let Some(content) = &plan.content else {
            return Ok(Applied::Skipped);
        };
        fs::write(&plan.path, content).map_err(Error::IoError)?;
        let format = self.formatter.format(&plan.path);
        Ok(Applied::Written { format })
    }
}
