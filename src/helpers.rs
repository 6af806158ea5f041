//! Path and string helpers available inside templates.
//!
//! The table is immutable and built at compile time. `Renderer::compile`
//! receives it explicitly and registers each entry on its environment.

use log::debug;
use minijinja::value::{from_args, Rest};
use minijinja::{Error, Value};
use std::path::{is_separator, MAIN_SEPARATOR_STR};

/// Signature shared by every helper.
pub type HelperFn = fn(&[Value]) -> Result<Value, Error>;

/// A named template helper.
#[derive(Clone, Copy)]
pub struct Helper {
    pub name: &'static str,
    /// Also register as a filter (`{{ line | name }}`). Off for names that
    /// MiniJinja already ships as builtin filters.
    pub filter: bool,
    pub call: HelperFn,
}

/// The helper library.
pub static HELPERS: &[Helper] = &[
    Helper { name: "dirname", filter: true, call: |args| unary(args, dirname) },
    Helper { name: "basename", filter: true, call: |args| unary(args, basename) },
    Helper { name: "ext", filter: true, call: |args| unary(args, ext) },
    Helper { name: "join", filter: false, call: join_helper },
    Helper { name: "split", filter: false, call: split_helper },
    Helper { name: "trim", filter: false, call: |args| binary(args, trim) },
    Helper { name: "trimPrefix", filter: true, call: |args| binary(args, trim_prefix) },
    Helper { name: "trimSuffix", filter: true, call: |args| binary(args, trim_suffix) },
    Helper { name: "strip", filter: true, call: |args| unary(args, |s| s.trim().to_string()) },
    Helper { name: "lower", filter: false, call: |args| unary(args, |s| s.to_lowercase()) },
    Helper { name: "upper", filter: false, call: |args| unary(args, |s| s.to_uppercase()) },
];

/// Looks up a helper by template name.
pub fn lookup(name: &str) -> Option<&'static Helper> {
    HELPERS.iter().find(|h| h.name == name)
}

fn unary(args: &[Value], f: fn(&str) -> String) -> Result<Value, Error> {
    let (s,): (String,) = from_args(args)?;
    Ok(Value::from(f(&s)))
}

fn binary(args: &[Value], f: fn(&str, &str) -> String) -> Result<Value, Error> {
    let (s, other): (String, String) = from_args(args)?;
    Ok(Value::from(f(&s, &other)))
}

fn join_helper(args: &[Value]) -> Result<Value, Error> {
    let (elems,): (Rest<String>,) = from_args(args)?;
    Ok(Value::from(join(&elems[..])))
}

fn split_helper(args: &[Value]) -> Result<Value, Error> {
    let (s, sep): (String, Option<String>) = from_args(args)?;
    debug!("split: {s:?} {sep:?}");
    Ok(Value::from(split(&s, sep.as_deref().unwrap_or(" "))))
}

/// Everything before the last separator, cleaned; `.` when there is none.
pub fn dirname(path: &str) -> String {
    match path.rfind(is_separator) {
        Some(i) => clean(&path[..=i]),
        None => ".".to_string(),
    }
}

/// Lexically normalizes `path`: collapses repeated separators, drops `.`
/// elements and resolves `..` against the preceding element. An empty
/// result becomes `.`.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with(is_separator);
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split(is_separator) {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                // `..` above the root stays at the root
                _ if rooted => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }

    let joined = parts.join(MAIN_SEPARATOR_STR);
    match (rooted, joined.is_empty()) {
        (true, _) => format!("{MAIN_SEPARATOR_STR}{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Last element of `path`; trailing separators are ignored.
pub fn basename(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return MAIN_SEPARATOR_STR.to_string();
    }
    trimmed.rsplit(is_separator).next().unwrap_or(trimmed).to_string()
}

/// Extension of the last element including the dot, or empty.
pub fn ext(path: &str) -> String {
    let name = path.rsplit(is_separator).next().unwrap_or(path);
    name.rfind('.').map(|i| name[i..].to_string()).unwrap_or_default()
}

/// Joins non-empty elements with the platform separator and cleans the
/// result. Empty when every element is empty.
pub fn join<S: AsRef<str>>(elems: &[S]) -> String {
    let elems: Vec<&str> =
        elems.iter().map(AsRef::<str>::as_ref).filter(|e| !e.is_empty()).collect();
    if elems.is_empty() {
        return String::new();
    }
    clean(&elems.join(MAIN_SEPARATOR_STR))
}

/// Splits `s` on `sep`; an empty separator splits into characters.
pub fn split(s: &str, sep: &str) -> Vec<String> {
    if sep.is_empty() {
        return s.chars().map(String::from).collect();
    }
    s.split(sep).map(String::from).collect()
}

/// Strips leading and trailing characters contained in `cutset`.
pub fn trim(s: &str, cutset: &str) -> String {
    s.trim_matches(|c: char| cutset.contains(c)).to_string()
}

pub fn trim_prefix(s: &str, prefix: &str) -> String {
    s.strip_prefix(prefix).unwrap_or(s).to_string()
}

pub fn trim_suffix(s: &str, suffix: &str) -> String {
    s.strip_suffix(suffix).unwrap_or(s).to_string()
}
