//! Property-based tests for smart backspace.
//!
//! Uses proptest to verify the behaviour of a backspace on every kind of
//! line: content to the left, over-indented blank lines, blank lines at or
//! before their logical column, the first line, forward delete and selections.

use smart_backspace::{
    Adjustment, BraceIndenter, Caret, ContentType, Document, EditBuffer, EditorSession,
    IndentService, InterceptorRegistry, Result, logical_line_start, resolve_for_component,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// A line of text with optional indentation.
fn content_line() -> impl Strategy<Value = String> {
    ("[ \t]{0,6}", "[a-z;(){}]{1,12}").prop_map(|(indent, body)| format!("{indent}{body}"))
}

/// Spaces and tabs only; possibly empty.
fn blank_line() -> impl Strategy<Value = String> {
    "[ \t]{0,12}"
}

fn any_line() -> impl Strategy<Value = String> {
    prop_oneof![content_line(), blank_line()]
}

/// Some lines, then a blank line at `lines.len()`, then more lines.
fn document_with_blank_line() -> impl Strategy<Value = (Vec<String>, String, Vec<String>)> {
    (
        prop::collection::vec(any_line(), 1..6),
        "[ \t]{1,12}",
        prop::collection::vec(any_line(), 0..4),
    )
}

/// Brace indentation reachable only through reformatting, so the resolver
/// has to normalize, measure and restore.
struct NormalizeOnly(BraceIndenter);

impl IndentService for NormalizeOnly {
    fn normalize_indentation(
        &mut self,
        doc: &mut dyn Document,
        start: usize,
        end: usize,
    ) -> Result<()> {
        self.0.normalize_indentation(doc, start, end)
    }
}

fn content_type() -> impl Strategy<Value = ContentType> {
    prop_oneof![Just(ContentType::JAVA), Just(ContentType::PLAIN)]
}

fn open(content_type: ContentType, text: &str) -> EditorSession {
    EditorSession::open(&InterceptorRegistry::with_defaults(), content_type, text)
}

fn line_start(lines: &[String], line: usize) -> usize {
    lines[..line].iter().map(|l| l.chars().count() + 1).sum()
}

/// Logical start the interceptor will use for `line` after the default
/// deletion has produced `text`.
fn expected_logical(content_type: &ContentType, text: &str, line: usize) -> usize {
    let mut doc = EditBuffer::with_text(text);
    if *content_type == ContentType::JAVA {
        let mut indenter = BraceIndenter::new();
        logical_line_start(&mut doc, line, Some(&mut indenter)).unwrap()
    } else {
        logical_line_start(&mut doc, line, None).unwrap()
    }
}

// ============================================================================
// Default deletion stands
// ============================================================================

proptest! {
    /// Real text left of the caret: exactly one character is deleted.
    #[test]
    fn text_left_of_caret_is_single_delete(
        before in prop::collection::vec(any_line(), 0..4),
        line in content_line(),
        after in prop::collection::vec(any_line(), 0..4),
        content_type in content_type(),
        cut in 0usize..12,
    ) {
        let indent = line.chars().take_while(|c| *c == ' ' || *c == '\t').count();
        let line_len = line.chars().count();
        let col = indent + 1 + cut % (line_len - indent);

        let mut lines = before.clone();
        lines.push(line.clone());
        lines.extend(after);
        let text = lines.join("\n");
        let dot = line_start(&lines, before.len()) + col;

        let mut session = open(content_type, &text);
        session.set_dot(dot);
        let adjustment = session.backspace().unwrap();

        let mut expected: Vec<char> = text.chars().collect();
        expected.remove(dot - 1);
        prop_assert!(adjustment.is_none());
        prop_assert_eq!(session.text(), expected.into_iter().collect::<String>());
        prop_assert_eq!(session.dot(), dot - 1);
    }

    /// Forward delete never adjusts.
    #[test]
    fn forward_delete_never_adjusts(
        lines in prop::collection::vec(any_line(), 1..8),
        content_type in content_type(),
        pick in any::<prop::sample::Index>(),
    ) {
        let text = lines.join("\n");
        let len = text.chars().count();
        prop_assume!(len > 0);
        let dot = pick.index(len);

        let mut session = open(content_type, &text);
        session.set_dot(dot);
        let adjustment = session.delete_forward().unwrap();

        let mut expected: Vec<char> = text.chars().collect();
        expected.remove(dot);
        prop_assert!(adjustment.is_none());
        prop_assert_eq!(session.text(), expected.into_iter().collect::<String>());
        prop_assert_eq!(session.dot(), dot);
    }

    /// Deleting a selection never adjusts.
    #[test]
    fn selection_never_adjusts(
        lines in prop::collection::vec(blank_line(), 2..6),
        content_type in content_type(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let text = lines.join("\n");
        let len = text.chars().count();
        let (anchor, dot) = (a.index(len + 1), b.index(len + 1));
        prop_assume!(anchor != dot);

        let mut session = open(content_type, &text);
        session.select(anchor, dot);
        let adjustment = session.backspace().unwrap();

        let (lo, hi) = (anchor.min(dot), anchor.max(dot));
        let expected: String = text
            .chars()
            .enumerate()
            .filter(|(i, _)| *i < lo || *i >= hi)
            .map(|(_, c)| c)
            .collect();
        prop_assert!(adjustment.is_none());
        prop_assert_eq!(session.text(), expected);
        prop_assert_eq!(session.dot(), lo);
    }

    /// The first line has nothing to join with.
    #[test]
    fn first_line_is_single_delete(
        first in "[ \t]{1,12}",
        rest in prop::collection::vec(any_line(), 0..4),
        content_type in content_type(),
        cut in 0usize..12,
    ) {
        let col = 1 + cut % first.chars().count();
        let mut lines = vec![first];
        lines.extend(rest);
        let text = lines.join("\n");

        let mut session = open(content_type, &text);
        session.set_dot(col);
        let adjustment = session.backspace().unwrap();

        let mut expected: Vec<char> = text.chars().collect();
        expected.remove(col - 1);
        prop_assert!(adjustment.is_none());
        prop_assert_eq!(session.text(), expected.into_iter().collect::<String>());
    }
}

// ============================================================================
// Smart adjustments
// ============================================================================

proptest! {
    /// Backspace on a blank line either snaps to or joins at the logical
    /// column, exactly as predicted by the resolver.
    #[test]
    fn blank_line_snaps_or_joins(
        (before, blank, after) in document_with_blank_line(),
        content_type in content_type(),
        cut in 0usize..12,
    ) {
        let col = 1 + cut % blank.chars().count();
        let row = before.len();
        let mut lines = before;
        lines.push(blank);
        lines.extend(after);
        let text = lines.join("\n");
        let start = line_start(&lines, row);
        let dot = start + col;

        // The default deletion runs first.
        let mut chars: Vec<char> = text.chars().collect();
        chars.remove(dot - 1);
        let deleted: String = chars.iter().collect();
        let after_dot = dot - 1;
        let logical = expected_logical(&content_type, &deleted, row);

        let mut session = open(content_type, &text);
        session.set_dot(dot);
        let adjustment = session.backspace().unwrap();

        if after_dot > logical {
            let mut expected = chars.clone();
            expected.drain(logical..after_dot);
            prop_assert_eq!(
                adjustment,
                Adjustment::Snapped { line: row, removed: logical..after_dot, caret: logical }
            );
            prop_assert_eq!(session.text(), expected.into_iter().collect::<String>());
            prop_assert_eq!(session.dot(), logical);
        } else {
            let prev_end = start - 1;
            let line_end = chars[start..]
                .iter()
                .position(|c| *c == '\n')
                .map_or(chars.len(), |p| start + p + 1);
            let mut expected = chars.clone();
            expected.drain(start..line_end);
            prop_assert_eq!(
                adjustment,
                Adjustment::Joined { line: row, removed: start..line_end, caret: prev_end }
            );
            prop_assert_eq!(session.text(), expected.into_iter().collect::<String>());
            prop_assert_eq!(session.dot(), prev_end);
        }
    }

    /// Resolving a logical start never changes the document or moves the
    /// caret, whichever way the indentation is found.
    #[test]
    fn resolver_leaves_document_unchanged(
        lines in prop::collection::vec(any_line(), 1..8),
        pick in any::<prop::sample::Index>(),
        anchor in any::<prop::sample::Index>(),
        dot in any::<prop::sample::Index>(),
    ) {
        let text = lines.join("\n");
        let len = text.chars().count();
        let mut doc = EditBuffer::with_text(&text);
        let line = pick.index(doc.line_count());
        let (anchor, dot) = (anchor.index(len + 1), dot.index(len + 1));
        doc.select(anchor, dot);

        let scanned = resolve_for_component(&mut doc, line, None).unwrap();
        let queried =
            resolve_for_component(&mut doc, line, Some(&mut BraceIndenter::new())).unwrap();
        let mut reformatter = NormalizeOnly(BraceIndenter::new());
        let reformatted = resolve_for_component(&mut doc, line, Some(&mut reformatter)).unwrap();
        let bounds = doc.line_bounds(line).unwrap();

        prop_assert_eq!(doc.text(), text);
        prop_assert_eq!((doc.mark(), doc.dot()), (anchor, dot));
        prop_assert_eq!(reformatted.offset, queried.offset);
        for start in [scanned, queried, reformatted] {
            prop_assert!(start.offset >= bounds.start);
            prop_assert_eq!(start.line_start, bounds.start);
        }
    }

    /// After any backspace the caret is inside the document and no event
    /// state survives.
    #[test]
    fn caret_stays_in_bounds(
        lines in prop::collection::vec(any_line(), 1..8),
        content_type in content_type(),
        pick in any::<prop::sample::Index>(),
        presses in 1usize..6,
    ) {
        let text = lines.join("\n");
        let mut session = open(content_type, &text);
        session.set_dot(pick.index(text.chars().count() + 1));
        for _ in 0..presses {
            session.backspace().unwrap();
            prop_assert!(session.dot() <= session.buffer().len_chars());
            prop_assert!(!session.buffer().has_selection());
            prop_assert!(session.interceptor().unwrap().state().is_idle());
        }
    }
}
