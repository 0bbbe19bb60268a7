//! Editable text buffer with a caret and selection anchor.
//!
//! This module provides [`EditBuffer`], a rope-backed document that
//! implements both [`Document`] and [`Caret`], so it can be handed to a
//! [`DeletionInterceptor`](crate::DeletionInterceptor) as an editor component.
//!
//! # Examples
//!
//! ```
//! use smart_backspace::EditBuffer;
//!
//! let mut buf = EditBuffer::with_text("Hello World");
//!
//! // Move caret to end of line and delete backward
//! buf.move_to_line_end();
//! assert!(buf.delete_backward()); // Removes 'd'
//! assert_eq!(buf.text(), "Hello Worl");
//! ```

use crate::document::{Caret, Document};
use crate::error::{Error, Result};
use crate::text::RopeWrapper;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// How far around the caret to look when finding a grapheme cluster.
const GRAPHEME_WINDOW: usize = 32;

/// Caret position as row and column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorPosition {
    pub row: usize,
    pub col: usize,
    pub offset: usize,
}

/// Text buffer with a caret (`dot`) and selection anchor (`mark`).
///
/// The default deletions mirror what an editor does before any interceptor
/// runs: remove the selection if there is one, otherwise one grapheme cluster
/// next to the caret.
#[derive(Clone, Debug, Default)]
pub struct EditBuffer {
    rope: RopeWrapper,
    dot: usize,
    mark: usize,
}

impl EditBuffer {
    /// Create a new empty edit buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an edit buffer with initial text. The caret starts at offset 0.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: RopeWrapper::from_str(text),
            dot: 0,
            mark: 0,
        }
    }

    /// Get the full text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Selected range, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Range<usize>> {
        (self.dot != self.mark).then(|| self.dot.min(self.mark)..self.dot.max(self.mark))
    }

    /// Get caret position info.
    #[must_use]
    pub fn cursor_position(&self) -> CursorPosition {
        let row = self.rope.char_to_line(self.dot);
        CursorPosition {
            row,
            col: self.dot - self.rope.line_to_char(row),
            offset: self.dot,
        }
    }

    /// Move the caret to a row and column. The column is clamped to the
    /// line's content.
    pub fn move_to(&mut self, row: usize, col: usize) {
        let row = row.min(self.rope.len_lines().saturating_sub(1));
        let start = self.rope.line_to_char(row);
        let offset = start + col.min(self.line_content_len(row));
        self.set_dot(offset);
    }

    /// Move the caret to the end of its line's content.
    pub fn move_to_line_end(&mut self) {
        let row = self.cursor_position().row;
        self.move_to(row, usize::MAX);
    }

    /// Insert text at the caret, replacing the selection.
    pub fn insert_text(&mut self, text: &str) -> Result<()> {
        if let Some(range) = self.selection() {
            self.rope.remove(range.clone())?;
            self.set_dot(range.start);
        }
        self.rope.insert(self.dot, text)?;
        self.set_dot(self.dot + text.chars().count());
        Ok(())
    }

    /// Default backspace: delete the selection, or the grapheme cluster
    /// before the caret. Returns whether anything was removed.
    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.dot == 0 {
            return false;
        }

        let window_start = self.dot.saturating_sub(GRAPHEME_WINDOW);
        let window = self.slice_string(window_start..self.dot);
        let len = window
            .graphemes(true)
            .next_back()
            .map_or(1, |g| g.chars().count());
        let start = self.dot - len;

        if self.rope.remove(start..self.dot).is_err() {
            return false;
        }
        self.set_dot(start);
        true
    }

    /// Default forward delete: delete the selection, or the grapheme cluster
    /// after the caret. Returns whether anything was removed.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let total = self.rope.len_chars();
        if self.dot >= total {
            return false;
        }

        let window_end = (self.dot + GRAPHEME_WINDOW).min(total);
        let window = self.slice_string(self.dot..window_end);
        let len = window
            .graphemes(true)
            .next()
            .map_or(1, |g| g.chars().count());

        if self.rope.remove(self.dot..self.dot + len).is_err() {
            return false;
        }
        self.set_dot(self.dot);
        true
    }

    fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection() else {
            return false;
        };
        if self.rope.remove(range.clone()).is_err() {
            return false;
        }
        self.set_dot(range.start);
        true
    }

    fn slice_string(&self, range: Range<usize>) -> String {
        self.rope
            .get_slice(range)
            .map(|slice| slice.to_string())
            .unwrap_or_default()
    }

    fn line_content_len(&self, row: usize) -> usize {
        let Some(line) = self.rope.line(row) else {
            return 0;
        };
        let text = line.to_string();
        line.len_chars() - crate::document::terminator_len(&text)
    }
}

impl Document for EditBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn get_text(&self, offset: usize, len: usize) -> Result<String> {
        let end = offset.checked_add(len).ok_or(Error::OutOfRange {
            offset,
            len,
            doc_len: self.rope.len_chars(),
        })?;
        self.rope
            .get_slice(offset..end)
            .map(|slice| slice.to_string())
            .ok_or(Error::OutOfRange {
                offset,
                len,
                doc_len: self.rope.len_chars(),
            })
    }

    fn remove(&mut self, offset: usize, len: usize) -> Result<()> {
        let end = offset.saturating_add(len);
        self.rope.remove(offset..end)?;
        let shift = |pos: usize| {
            if pos >= end {
                pos - len
            } else {
                pos.min(offset)
            }
        };
        self.dot = shift(self.dot);
        self.mark = shift(self.mark);
        Ok(())
    }

    fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        self.rope.insert(offset, text)?;
        let len = text.chars().count();
        let shift = |pos: usize| if pos > offset { pos + len } else { pos };
        self.dot = shift(self.dot);
        self.mark = shift(self.mark);
        Ok(())
    }

    fn line_index_containing(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset)
    }

    fn line_bounds(&self, line: usize) -> Result<Range<usize>> {
        self.rope.line_range(line).ok_or(Error::LineOutOfRange {
            line,
            line_count: self.rope.len_lines(),
        })
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }
}

impl Caret for EditBuffer {
    fn dot(&self) -> usize {
        self.dot
    }

    fn mark(&self) -> usize {
        self.mark
    }

    fn set_dot(&mut self, offset: usize) {
        self.dot = offset.min(self.rope.len_chars());
        self.mark = self.dot;
    }

    /// Both ends are clamped to the document.
    fn select(&mut self, anchor: usize, dot: usize) {
        let len = self.rope.len_chars();
        self.mark = anchor.min(len);
        self.dot = dot.min(len);
    }
}
