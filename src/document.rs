//! Host collaborator contracts.
//!
//! The interceptor never owns a document. Everything it reads or mutates
//! goes through the traits in this module, which a host editor implements
//! over its own buffer, caret and indentation engine. All offsets are
//! absolute character offsets.
//!
//! [`EditBuffer`](crate::text::EditBuffer) is the in-crate implementation of
//! [`Document`] and [`Caret`].

use crate::error::Result;
use std::ops::Range;

/// Character storage partitioned into lines.
///
/// A line's bounds include its terminator when it has one. The last line of a
/// document has no terminator and may be empty.
pub trait Document {
    /// Total number of characters.
    fn len_chars(&self) -> usize;

    /// Read `len` characters starting at `offset`.
    fn get_text(&self, offset: usize, len: usize) -> Result<String>;

    /// Remove `len` characters starting at `offset`.
    fn remove(&mut self, offset: usize, len: usize) -> Result<()>;

    /// Insert `text` at `offset`.
    fn insert(&mut self, offset: usize, text: &str) -> Result<()>;

    /// Index of the line containing `offset`. Offsets past the end map to the
    /// last line.
    fn line_index_containing(&self, offset: usize) -> usize;

    /// Bounds `[start, end)` of a line, terminator included.
    fn line_bounds(&self, line: usize) -> Result<Range<usize>>;

    /// Number of lines. Never zero.
    fn line_count(&self) -> usize;
}

/// Caret with a selection anchor.
///
/// `dot` is the active end, `mark` the anchor. There is no selection when the
/// two are equal.
pub trait Caret {
    fn dot(&self) -> usize;

    fn mark(&self) -> usize;

    /// Move the caret, collapsing any selection.
    fn set_dot(&mut self, offset: usize);

    /// Set the anchor to `anchor` and the caret to `dot`.
    fn select(&mut self, anchor: usize, dot: usize);

    fn has_selection(&self) -> bool {
        self.dot() != self.mark()
    }
}

/// An editor component: a document with its caret.
///
/// Blanket-implemented for every type that is both; the `as_document*`
/// accessors hand the component to APIs that only need the document.
pub trait TextComponent: Document + Caret {
    fn as_document(&self) -> &dyn Document;

    fn as_document_mut(&mut self) -> &mut dyn Document;
}

impl<T: Document + Caret> TextComponent for T {
    fn as_document(&self) -> &dyn Document {
        self
    }

    fn as_document_mut(&mut self) -> &mut dyn Document {
        self
    }
}

/// Context-aware indentation engine of the host.
///
/// Hosts expose at least [`normalize_indentation`](Self::normalize_indentation).
/// Hosts that can compute an indent without touching the document should also
/// implement [`indent_for_line`](Self::indent_for_line); the resolver prefers
/// it over reformatting.
pub trait IndentService {
    /// Acquire the engine's lock. Paired with [`unlock`](Self::unlock).
    fn lock(&mut self) {}

    fn unlock(&mut self) {}

    /// Number of indentation characters the surrounding structure implies
    /// for `line`, or `None` when the engine has no side-effect free query.
    fn indent_for_line(&self, _doc: &dyn Document, _line: usize) -> Option<usize> {
        None
    }

    /// Rewrite the leading whitespace of the line spanning `[start, end)`
    /// according to its context. Must not touch other lines.
    fn normalize_indentation(&mut self, doc: &mut dyn Document, start: usize, end: usize)
    -> Result<()>;
}

/// Read text, degrading every failure to an empty string.
#[must_use]
pub fn safe_text<D: Document + ?Sized>(doc: &D, offset: usize, len: usize) -> String {
    if len == 0 {
        return String::new();
    }
    doc.get_text(offset, len).unwrap_or_default()
}

/// Read the full text of a line (terminator included), or empty text if the
/// line does not exist.
#[must_use]
pub fn line_text<D: Document + ?Sized>(doc: &D, line: usize) -> String {
    doc.line_bounds(line)
        .map(|bounds| safe_text(doc, bounds.start, bounds.len()))
        .unwrap_or_default()
}

/// Whether `ch` ends a line. Matches the breaks `ropey` splits lines on.
#[must_use]
pub fn is_line_terminator(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Number of leading spaces and tabs.
#[must_use]
pub fn leading_whitespace_len(line: &str) -> usize {
    line.chars().take_while(|&ch| ch == ' ' || ch == '\t').count()
}

/// Whether `line` holds nothing but spaces, tabs and line terminators.
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.chars()
        .all(|ch| ch == ' ' || ch == '\t' || is_line_terminator(ch))
}

/// Char index of the first character that is neither a space, a tab nor a
/// line terminator, if the line has one right after its indentation.
#[must_use]
pub fn first_content_offset(line: &str) -> Option<usize> {
    let indent = leading_whitespace_len(line);
    match line.chars().nth(indent) {
        Some(ch) if !is_line_terminator(ch) => Some(indent),
        _ => None,
    }
}

/// Length of the line terminator at the end of `line` (0, 1 or 2 chars).
#[must_use]
pub fn terminator_len(line: &str) -> usize {
    if line.ends_with("\r\n") {
        2
    } else if line.chars().next_back().is_some_and(is_line_terminator) {
        1
    } else {
        0
    }
}

/// Offset just before the terminator of `line`.
///
/// Falls back to the raw end of the line when its text cannot be read.
#[must_use]
pub fn content_end<D: Document + ?Sized>(doc: &D, line: usize) -> usize {
    let Ok(bounds) = doc.line_bounds(line) else {
        return 0;
    };
    let text = safe_text(doc, bounds.start, bounds.len());
    bounds.end.saturating_sub(terminator_len(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::EditBuffer;

    #[test]
    fn test_leading_whitespace() {
        assert_eq!(leading_whitespace_len("    foo"), 4);
        assert_eq!(leading_whitespace_len("\t\tfoo"), 2);
        assert_eq!(leading_whitespace_len(" \t \n"), 3);
        assert_eq!(leading_whitespace_len(""), 0);
    }

    #[test]
    fn test_first_content_offset() {
        assert_eq!(first_content_offset("  x\n"), Some(2));
        assert_eq!(first_content_offset("x"), Some(0));
        assert_eq!(first_content_offset("    \n"), None);
        assert_eq!(first_content_offset("  \r\n"), None);
        assert_eq!(first_content_offset(""), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t \r\n"));
        assert!(!is_blank(" \u{2003}\n"));
        assert!(!is_blank("\u{a0}"));
        assert!(!is_blank("  x"));
    }

    #[test]
    fn test_terminator_len() {
        assert_eq!(terminator_len("abc\n"), 1);
        assert_eq!(terminator_len("abc\r\n"), 2);
        assert_eq!(terminator_len("abc\r"), 1);
        assert_eq!(terminator_len("abc\u{2028}"), 1);
        assert_eq!(terminator_len("abc"), 0);
    }

    #[test]
    fn test_safe_text_out_of_range() {
        let buf = EditBuffer::with_text("abc");
        assert_eq!(safe_text(&buf, 1, 2), "bc");
        assert_eq!(safe_text(&buf, 2, 10), "");
        assert_eq!(safe_text(&buf, 99, 1), "");
        assert_eq!(safe_text(&buf, 0, 0), "");
    }

    #[test]
    fn test_content_end() {
        let buf = EditBuffer::with_text("ab\r\ncd\nef");
        assert_eq!(content_end(&buf, 0), 2);
        assert_eq!(content_end(&buf, 1), 6);
        assert_eq!(content_end(&buf, 2), 9);
        assert_eq!(content_end(&buf, 9), 0);
    }

    #[test]
    fn test_line_text() {
        let buf = EditBuffer::with_text("one\ntwo");
        assert_eq!(line_text(&buf, 0), "one\n");
        assert_eq!(line_text(&buf, 1), "two");
        assert_eq!(line_text(&buf, 2), "");
    }
}
