//! Rope wrapper using the ropey crate.

use crate::error::{Error, Result};
use ropey::{Rope, RopeSlice};
use std::ops::Range;

/// Wrapper around ropey::Rope with bounds-checked editing.
#[derive(Clone, Debug, Default)]
pub struct RopeWrapper {
    rope: Rope,
}

impl RopeWrapper {
    /// Create a rope from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get the number of lines.
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get a line by index.
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<RopeSlice<'_>> {
        if idx < self.rope.len_lines() {
            Some(self.rope.line(idx))
        } else {
            None
        }
    }

    /// Character range of a line, terminator included.
    #[must_use]
    pub fn line_range(&self, idx: usize) -> Option<Range<usize>> {
        let line = self.line(idx)?;
        let start = self.rope.line_to_char(idx);
        Some(start..start + line.len_chars())
    }

    /// Get a slice of the rope, or `None` if the range is out of bounds.
    #[must_use]
    pub fn get_slice(&self, range: Range<usize>) -> Option<RopeSlice<'_>> {
        self.rope.get_slice(range)
    }

    /// Insert text at a character position.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> Result<()> {
        self.rope
            .try_insert(char_idx, text)
            .map_err(|_| self.out_of_range(char_idx, 0))
    }

    /// Remove a range of characters.
    pub fn remove(&mut self, range: Range<usize>) -> Result<()> {
        if range.start > range.end {
            return Err(self.out_of_range(range.start, 0));
        }
        let (start, len) = (range.start, range.len());
        self.rope
            .try_remove(range)
            .map_err(|_| self.out_of_range(start, len))
    }

    /// Convert to string.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    /// Convert char index to line index.
    #[must_use]
    pub fn char_to_line(&self, char_idx: usize) -> usize {
        self.rope.char_to_line(char_idx.min(self.len_chars()))
    }

    /// Get the char index at the start of a line.
    #[must_use]
    pub fn line_to_char(&self, line_idx: usize) -> usize {
        if line_idx >= self.len_lines() {
            self.len_chars()
        } else {
            self.rope.line_to_char(line_idx)
        }
    }

    fn out_of_range(&self, offset: usize, len: usize) -> Error {
        Error::OutOfRange {
            offset,
            len,
            doc_len: self.len_chars(),
        }
    }
}
