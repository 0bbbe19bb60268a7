//! Bracket-nesting indentation for structured text.

use crate::document::{Document, IndentService, leading_whitespace_len, line_text, safe_text};
use crate::error::{Error, Result};

/// Indentation service for brace-delimited languages.
///
/// The indent of a line is one level per bracket (`{`, `[`, `(`) left open
/// by the text before it, one level less when the line itself starts with a
/// closing bracket. Brackets inside string and character literals and after
/// `//` are ignored.
#[derive(Clone, Debug)]
pub struct BraceIndenter {
    indent_width: usize,
    use_tabs: bool,
    lock_depth: usize,
}

impl Default for BraceIndenter {
    fn default() -> Self {
        Self {
            indent_width: 4,
            use_tabs: false,
            lock_depth: 0,
        }
    }
}

impl BraceIndenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spaces per level when indenting with spaces.
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Indent with one tab per level.
    #[must_use]
    pub fn with_tabs(mut self, use_tabs: bool) -> Self {
        self.use_tabs = use_tabs;
        self
    }

    #[must_use]
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    #[must_use]
    pub fn uses_tabs(&self) -> bool {
        self.use_tabs
    }

    /// Whether a probe currently holds the lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lock_depth > 0
    }

    /// Nesting level implied for `line`.
    #[must_use]
    pub fn level_for_line(&self, doc: &dyn Document, line: usize) -> usize {
        let Ok(bounds) = doc.line_bounds(line) else {
            return 0;
        };
        let level = open_brackets(&safe_text(doc, 0, bounds.start));
        let own = line_text(doc, line);
        let closes_first = own
            .trim_start_matches([' ', '\t'])
            .starts_with(['}', ']', ')']);
        if closes_first {
            level.saturating_sub(1)
        } else {
            level
        }
    }

    /// Indentation text for `level`.
    #[must_use]
    pub fn indent_string(&self, level: usize) -> String {
        if self.use_tabs {
            "\t".repeat(level)
        } else {
            " ".repeat(level * self.indent_width)
        }
    }
}

impl IndentService for BraceIndenter {
    fn lock(&mut self) {
        self.lock_depth += 1;
    }

    fn unlock(&mut self) {
        self.lock_depth = self.lock_depth.saturating_sub(1);
    }

    fn indent_for_line(&self, doc: &dyn Document, line: usize) -> Option<usize> {
        doc.line_bounds(line).ok()?;
        Some(self.indent_string(self.level_for_line(doc, line)).chars().count())
    }

    fn normalize_indentation(
        &mut self,
        doc: &mut dyn Document,
        start: usize,
        end: usize,
    ) -> Result<()> {
        if end < start {
            return Err(Error::Indent(format!("inverted line range {start}..{end}")));
        }
        let text = doc.get_text(start, end - start)?;
        let line = doc.line_index_containing(start);
        let indent = self.indent_string(self.level_for_line(&*doc, line));

        let current = leading_whitespace_len(&text);
        if text.chars().take(current).eq(indent.chars()) {
            return Ok(());
        }
        doc.remove(start, current)?;
        doc.insert(start, &indent)
    }
}

/// Brackets still open at the end of `text`.
fn open_brackets(text: &str) -> usize {
    let mut depth = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            '"' | '\'' => skip_literal(&mut chars, ch),
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    depth
}

/// Skip to the closing `quote`. Literals never span lines.
fn skip_literal(chars: &mut impl Iterator<Item = char>, quote: char) {
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '\n' => return,
            c if c == quote => return,
            _ => {}
        }
    }
}
