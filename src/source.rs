//! Source indexing for recode.
//! Parses a Rust source file with tree-sitter, rejects it when the tree has
//! errors, and records every comment together with its byte span so that
//! markers can be located precisely.

use log::debug;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

use crate::error::{Error, Result};

/// Comment flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// ...` up to the end of the line
    Line,
    /// `/* ... */`, possibly nested
    Block,
}

/// A comment found in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    /// Raw comment text including its delimiters.
    pub text: String,
    /// Byte span of `text` within the source.
    pub span: Range<usize>,
}

impl Comment {
    /// Comment text without delimiters and surrounding whitespace.
    pub fn body(&self) -> &str {
        let inner = match self.kind {
            CommentKind::Line => self.text.strip_prefix("//").unwrap_or(&self.text),
            CommentKind::Block => {
                let text = self.text.strip_prefix("/*").unwrap_or(&self.text);
                text.strip_suffix("*/").unwrap_or(text)
            }
        };
        inner.trim()
    }
}

/// A source file loaded for splicing.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
    pub comments: Vec<Comment>,
}

impl SourceFile {
    /// Reads and indexes the file at `path`.
    ///
    /// # Errors
    /// * `Error::IoError` if the file cannot be read
    /// * `Error::SyntaxError` if the content is not valid Rust
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading source file: {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(path, content)
    }

    /// Indexes already loaded content.
    pub fn parse<P: AsRef<Path>>(path: P, content: String) -> Result<Self> {
        let path = path.as_ref();
        let tree = parse_tree(&content)?;
        if let Some(node) = first_error(tree.root_node()) {
            let at = node.start_position();
            return Err(Error::SyntaxError {
                path: path.display().to_string(),
                message: format!(
                    "unexpected `{}` at {}:{}",
                    content[node.byte_range()].lines().next().unwrap_or_default(),
                    at.row + 1,
                    at.column + 1
                ),
            });
        }

        let comments = collect_comments(&tree, &content);
        debug!("Indexed {} comments in {}", comments.len(), path.display());

        Ok(Self { path: path.to_path_buf(), content, comments })
    }
}

/// Parses `src` with the Rust grammar.
pub fn parse_tree(src: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_rust::LANGUAGE.into())
        .map_err(|e| Error::ParserError(e.to_string()))?;
    parser
        .parse(src, None)
        .ok_or_else(|| Error::ParserError("tree-sitter returned no tree".to_string()))
}

/// Collects all comments of `src` in document order, without checking the
/// tree for syntax errors.
pub fn scan_comments(src: &str) -> Result<Vec<Comment>> {
    Ok(collect_comments(&parse_tree(src)?, src))
}

fn collect_comments(tree: &Tree, src: &str) -> Vec<Comment> {
    let mut comments = Vec::new();
    let mut stack = vec![tree.root_node()];
    while let Some(node) = stack.pop() {
        let kind = match node.kind() {
            "line_comment" => Some(CommentKind::Line),
            "block_comment" => Some(CommentKind::Block),
            _ => None,
        };
        if let Some(kind) = kind {
            comments.push(comment(src, kind, node.byte_range()));
            continue;
        }
        push_children(node, &mut stack);
    }
    comments
}

/// First error or missing node in document order.
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() {
            push_children(node, &mut stack);
        }
    }
    Some(root)
}

/// Pushes children in reverse so that popping yields document order.
fn push_children<'t>(node: Node<'t>, stack: &mut Vec<Node<'t>>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    stack.extend(children.into_iter().rev());
}

fn comment(src: &str, kind: CommentKind, span: Range<usize>) -> Comment {
    // line comments may carry their line terminator
    let text = src[span.clone()].trim_end_matches(['\n', '\r']);
    let span = span.start..span.start + text.len();
    Comment { kind, text: text.to_string(), span }
}
