//! Label lookup: finds the BEGIN/END comment pair that bounds a splice region.

use log::{debug, warn};
use std::ops::Range;

use crate::source::Comment;

pub const BEGIN_SUFFIX: &str = "-BEGIN";
pub const END_SUFFIX: &str = "-END";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Begin,
    End,
}

/// A comment whose body names the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub span: Range<usize>,
}

/// Returns every marker of `label` in document order.
///
/// A comment qualifies only when its body is exactly `<label>-BEGIN` or
/// `<label>-END`.
pub fn find_markers(label: &str, comments: &[Comment]) -> Vec<Marker> {
    comments
        .iter()
        .filter_map(|comment| {
            let body = comment.body();
            let kind = match body.strip_prefix(label)? {
                BEGIN_SUFFIX => MarkerKind::Begin,
                END_SUFFIX => MarkerKind::End,
                _ => return None,
            };
            debug!("Found marker {body} at {:?}", comment.span);
            Some(Marker { kind, span: comment.span.clone() })
        })
        .collect()
}

/// The matched BEGIN/END markers of a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPair {
    pub begin: Range<usize>,
    pub end: Range<usize>,
}

impl LabelPair {
    /// Pairs the first BEGIN marker with the first END marker.
    ///
    /// Returns `None` when either is missing, when BEGIN does not end
    /// strictly before END starts, or when another marker of the label lies
    /// between them (a splice would erase it). Markers after the pair are
    /// ignored.
    pub fn from_markers(markers: &[Marker]) -> Option<Self> {
        let first = |kind: MarkerKind| markers.iter().find(|m| m.kind == kind);
        let begin = first(MarkerKind::Begin)?;
        let end = first(MarkerKind::End)?;

        if begin.span.end >= end.span.start {
            debug!("BEGIN marker at {:?} does not precede END marker at {:?}", begin.span, end.span);
            return None;
        }

        let extras = markers.iter().filter(|m| !std::ptr::eq(*m, begin) && !std::ptr::eq(*m, end));
        for extra in extras {
            if extra.span.start >= begin.span.end && extra.span.end <= end.span.start {
                warn!(
                    "Duplicate {:?} marker at byte {} lies inside the splice region, skipping",
                    extra.kind, extra.span.start
                );
                return None;
            }
            warn!("Ignoring duplicate {:?} marker at byte {}", extra.kind, extra.span.start);
        }

        Some(Self { begin: begin.span.clone(), end: end.span.clone() })
    }

    /// Locates the pair for `label` among `comments`.
    pub fn locate(label: &str, comments: &[Comment]) -> Option<Self> {
        Self::from_markers(&find_markers(label, comments))
    }
}
