//! Splicing of rendered text between a label's BEGIN and END comments.

use std::ops::Range;

use crate::label::LabelPair;

/// Byte range replaced by a splice.
///
/// Starts after the BEGIN comment, including the rest of its line when that
/// is only whitespace. Ends at the start of the END comment's line when only
/// indentation precedes it, so the END comment keeps its indentation.
pub fn region(content: &str, pair: &LabelPair) -> Range<usize> {
    let mut start = pair.begin.end;
    let tail = &content[start..];
    if let Some(newline) = tail.find('\n') {
        if tail[..newline].trim().is_empty() {
            start += newline + 1;
        }
    }

    let mut end = pair.end.start;
    let line_start = content[..end].rfind('\n').map_or(0, |n| n + 1);
    if content[line_start..end].trim().is_empty() {
        end = line_start;
    }

    start..end.max(start)
}

/// Line ending of `content`: `\r\n` when its first line ends that way.
pub fn line_ending(content: &str) -> &'static str {
    match content.find('\n') {
        Some(i) if content[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Replaces the region of `pair` in `content` with `block`.
///
/// A non-empty block gets a trailing line ending so that it does not run
/// into the END comment. Lines of the block use the file's line ending.
/// Everything outside the region is kept byte for byte.
pub fn splice(content: &str, pair: &LabelPair, block: &str) -> String {
    let region = region(content, pair);
    let eol = line_ending(content);

    let mut out = String::with_capacity(content.len() + block.len() + 2);
    out.push_str(&content[..region.start]);
    if !block.is_empty() {
        if eol == "\n" {
            out.push_str(block);
        } else {
            let lines: Vec<&str> =
                block.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();
            out.push_str(&lines.join(eol));
        }
        out.push_str(eol);
    }
    out.push_str(&content[region.end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair_of(content: &str, begin: &str, end: &str) -> LabelPair {
        let b = content.find(begin).unwrap();
        let e = content.find(end).unwrap();
        LabelPair { begin: b..b + begin.len(), end: e..e + end.len() }
    }

    #[test]
    fn test_region_covers_whole_lines() {
        let content = "x\n    // A-BEGIN\n    old\n    // A-END\ny\n";
        let pair = pair_of(content, "// A-BEGIN", "// A-END");
        assert_eq!(&content[region(content, &pair)], "    old\n");
    }

    #[test]
    fn test_region_with_inline_markers() {
        let content = "let v = [/* A-BEGIN */ 1, 2 /* A-END */];";
        let pair = pair_of(content, "/* A-BEGIN */", "/* A-END */");
        assert_eq!(&content[region(content, &pair)], " 1, 2 ");
    }

    #[test]
    fn test_crlf_source_keeps_crlf() {
        let content = "// A-BEGIN\r\nold\r\n// A-END\r\n";
        let pair = pair_of(content, "// A-BEGIN", "// A-END");
        assert_eq!(line_ending(content), "\r\n");
        assert_eq!(splice(content, &pair, "x\ny"), "// A-BEGIN\r\nx\r\ny\r\n// A-END\r\n");
    }

    #[test]
    fn test_empty_block_removes_region() {
        let content = "// A-BEGIN\nold\n// A-END\n";
        let pair = pair_of(content, "// A-BEGIN", "// A-END");
        assert_eq!(splice(content, &pair, ""), "// A-BEGIN\n// A-END\n");
    }
}
