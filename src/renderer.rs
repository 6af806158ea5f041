//! Template renderer for recode.
//! Compiles a row or column template with MiniJinja and renders it once per
//! input line.
use log::{debug, warn};
use minijinja::value::{Rest, Value};
use minijinja::Environment;
use regex::{Captures, Regex};
use serde::Serialize;
use std::io::BufRead;
use std::sync::LazyLock;

use crate::error::Result;
use crate::helpers::Helper;

/// Template used when neither a row nor a column template is given.
pub const IDENTITY_TEMPLATE: &str = "{{ . }}";

/// Name under which the current input line is exposed to templates.
pub const LINE_VAR: &str = "line";

/// How rendered lines are joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// One output line per input line.
    Row,
    /// All outputs on one line, joined by `separator`.
    Column { separator: String },
}

impl Mode {
    pub fn separator(&self) -> &str {
        match self {
            Mode::Row => "\n",
            Mode::Column { separator } => separator,
        }
    }

    fn template_name(&self) -> &'static str {
        match self {
            Mode::Row => "row",
            Mode::Column { .. } => "col",
        }
    }
}

/// A template source together with its mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    pub source: String,
    pub mode: Mode,
}

impl TemplateSpec {
    /// Selects the mode from the command-line templates.
    ///
    /// A non-empty row template wins over a column template. With neither,
    /// rows are rendered with the identity template.
    pub fn from_options(row: &str, col: &str, sep: &str) -> Self {
        if !row.is_empty() {
            Self { source: row.to_string(), mode: Mode::Row }
        } else if !col.is_empty() {
            Self {
                source: col.to_string(),
                mode: Mode::Column { separator: sep.to_string() },
            }
        } else {
            Self { source: IDENTITY_TEMPLATE.to_string(), mode: Mode::Row }
        }
    }
}

#[derive(Serialize)]
struct LineContext<'a> {
    line: &'a str,
    index: usize,
}

/// A compiled template ready to render input lines.
pub struct Renderer {
    env: Environment<'static>,
    mode: Mode,
}

impl Renderer {
    /// Compiles `spec` with the given helpers registered.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the template does not compile
    pub fn compile(spec: &TemplateSpec, helpers: &[Helper]) -> Result<Self> {
        let mut env = Environment::new();
        // a row template ending in a newline keeps it
        env.set_keep_trailing_newline(true);
        for helper in helpers {
            let call = helper.call;
            env.add_function(helper.name, move |args: Rest<Value>| call(&args));
            if helper.filter {
                env.add_filter(helper.name, move |args: Rest<Value>| call(&args));
            }
        }

        let source = expand_dot_shorthand(&spec.source);
        if source != spec.source {
            debug!("Template rewritten to: {source}");
        }
        env.add_template_owned(spec.mode.template_name(), source)?;

        Ok(Self { env, mode: spec.mode.clone() })
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Renders the template for a single line.
    pub fn render_line(&self, index: usize, line: &str) -> Result<String> {
        let tmpl = self.env.get_template(self.mode.template_name())?;
        Ok(tmpl.render(LineContext { line, index })?)
    }

    /// Renders every line of `reader` and joins the results.
    ///
    /// A line that fails to render contributes an empty string, so the
    /// number of joined items always equals the number of input lines.
    ///
    /// # Errors
    /// * `Error::IoError` if reading the input fails
    pub fn render<R: BufRead>(&self, reader: R) -> Result<String> {
        let mut outputs = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            debug!("text: {line}");
            let rendered = self.render_line(index, &line).unwrap_or_else(|e| {
                warn!("Failed to render line {}: {}", index + 1, e);
                String::new()
            });
            outputs.push(rendered);
        }
        Ok(outputs.join(self.mode.separator()))
    }
}

static ACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{(-?)(.*?)(-?)\}\}").expect("valid action pattern"));

const KEYWORDS: [&str; 12] =
    ["and", "or", "not", "in", "is", "if", "else", "true", "false", "none", "True", "False"];

/// Rewrites Go-template style actions into MiniJinja expressions.
///
/// `{{ . }}` becomes `{{ line }}` and `{{ f . "x" }}` becomes
/// `{{ f(line, "x") }}`. Actions that use neither form are left untouched.
pub fn expand_dot_shorthand(source: &str) -> String {
    ACTION
        .replace_all(source, |caps: &Captures| match rewrite_expr(&caps[2]) {
            Some(expr) => format!("{{{{{} {} {}}}}}", &caps[1], expr, &caps[3]),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn rewrite_expr(expr: &str) -> Option<String> {
    let mut changed = false;
    let mut stages = Vec::new();
    for (i, stage) in split_outside_quotes(expr, '|').into_iter().enumerate() {
        let tokens = tokenize(stage)?;
        let call = if i == 0 { rewrite_call(&tokens) } else { None };
        match call.or_else(|| rewrite_dots(&tokens)) {
            Some(rewritten) => {
                changed = true;
                stages.push(rewritten);
            }
            None => stages.push(stage.trim().to_string()),
        }
    }
    changed.then(|| stages.join(" | "))
}

fn rewrite_call(tokens: &[&str]) -> Option<String> {
    let (func, args) = tokens.split_first()?;
    if args.is_empty() || !is_ident(func) || !args.iter().all(|t| is_atom(t)) {
        return None;
    }
    let args: Vec<&str> = args.iter().map(|t| operand(t)).collect();
    Some(format!("{}({})", func, args.join(", ")))
}

fn rewrite_dots(tokens: &[&str]) -> Option<String> {
    if !tokens.contains(&".") {
        return None;
    }
    Some(tokens.iter().map(|t| operand(t)).collect::<Vec<_>>().join(" "))
}

fn operand(token: &str) -> &str {
    if token == "." {
        LINE_VAR
    } else {
        token
    }
}

fn is_ident(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS.contains(&token)
}

fn is_atom(token: &str) -> bool {
    token == "."
        || is_ident(token)
        || token.starts_with(['"', '\''])
        || token.parse::<f64>().is_ok()
}

/// Splits on `sep` where it does not appear inside a quoted string.
fn split_outside_quotes(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote = None;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == sep => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            None => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// Whitespace-separated tokens, keeping quoted strings whole. `None` when a
/// quote is left open.
fn tokenize(s: &str) -> Option<Vec<&str>> {
    let mut tokens = Vec::new();
    let mut quote = None;
    let mut escaped = false;
    let mut start = None;
    for (i, c) in s.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c.is_whitespace() => {
                if let Some(st) = start.take() {
                    tokens.push(&s[st..i]);
                }
            }
            None => {
                if start.is_none() {
                    start = Some(i);
                }
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
            }
        }
    }
    if quote.is_some() {
        return None;
    }
    if let Some(st) = start {
        tokens.push(&s[st..]);
    }
    Some(tokens)
}
