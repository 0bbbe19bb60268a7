//! Logical indentation resolution.
//!
//! The logical start of a line is the offset where its content begins, or
//! for a blank line, where content *would* begin if the user typed there.
//! Strategies, tried in order:
//!
//! 1. The line has content: the offset just past its leading spaces/tabs.
//! 2. The host bound an [`IndentService`]: its side-effect free query, or if
//!    it has none, a probe that normalizes the line, measures the resulting
//!    indentation and restores the line's exact original text.
//! 3. The indentation of the nearest preceding line with content.
//! 4. Column zero.
//!
//! # Examples
//!
//! ```
//! use smart_backspace::{BraceIndenter, Document, EditBuffer, logical_line_start};
//!
//! let mut doc = EditBuffer::with_text("if (x) {\n\n}");
//! let start = doc.line_bounds(1).unwrap().start;
//!
//! let mut indenter = BraceIndenter::new();
//! let logical = logical_line_start(&mut doc, 1, Some(&mut indenter)).unwrap();
//! assert_eq!(logical, start + 4);
//!
//! // Without a service the previous line's indentation (none) is used.
//! assert_eq!(logical_line_start(&mut doc, 1, None).unwrap(), start);
//! ```

mod brace;

pub use brace::BraceIndenter;

use crate::document::{
    Document, IndentService, TextComponent, first_content_offset, leading_whitespace_len,
    line_text, safe_text,
};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use std::ops::{Deref, DerefMut};

/// Where a logical line start came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndentSource {
    /// The line has content of its own.
    Content,
    /// The indentation service's query.
    Query,
    /// Normalize-measure-restore probe through the indentation service.
    Probe,
    /// Indentation copied from the nearest preceding line with content.
    PrecedingLine,
    /// No context at all; column zero.
    LineStart,
}

/// A resolved logical line start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogicalStart {
    /// Absolute offset of the logical start.
    pub offset: usize,
    /// Start of the line the offset belongs to.
    pub line_start: usize,
    pub source: IndentSource,
}

impl LogicalStart {
    /// Indentation width in characters.
    #[must_use]
    pub fn column(&self) -> usize {
        self.offset - self.line_start
    }
}

/// Scoped lock on an indentation service.
///
/// Locks on construction and unlocks on drop, so every exit path of a probe
/// releases the service.
pub struct IndentLock<'a, S: IndentService + ?Sized> {
    service: &'a mut S,
}

impl<'a, S: IndentService + ?Sized> IndentLock<'a, S> {
    pub fn acquire(service: &'a mut S) -> Self {
        service.lock();
        Self { service }
    }
}

impl<S: IndentService + ?Sized> Deref for IndentLock<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.service
    }
}

impl<S: IndentService + ?Sized> DerefMut for IndentLock<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.service
    }
}

impl<S: IndentService + ?Sized> Drop for IndentLock<'_, S> {
    fn drop(&mut self) {
        self.service.unlock();
    }
}

/// Offset within `line` where its content logically begins.
///
/// See [`resolve_logical_start`] for the strategy that produced it. Reformatting
/// rewrites the line in place, so positions the host keeps outside the
/// document may move; [`resolve_for_component`] keeps a caret where it was.
pub fn logical_line_start(
    doc: &mut dyn Document,
    line: usize,
    service: Option<&mut (dyn IndentService + '_)>,
) -> Result<usize> {
    resolve_logical_start(doc, line, service).map(|start| start.offset)
}

/// Resolve the logical start of `line`.
///
/// Leaves the document byte-for-byte as it found it. Errors only when the
/// line does not exist or when a probe could not restore the line it
/// modified ([`Error::ProbeRestore`]); every other service failure falls back
/// to the preceding-line scan.
pub fn resolve_logical_start(
    doc: &mut dyn Document,
    line: usize,
    service: Option<&mut (dyn IndentService + '_)>,
) -> Result<LogicalStart> {
    let bounds = doc.line_bounds(line)?;
    let line_start = bounds.start;
    let resolved = |column: usize, source: IndentSource| LogicalStart {
        offset: line_start + column,
        line_start,
        source,
    };

    let text = safe_text(&*doc, bounds.start, bounds.len());
    if let Some(column) = first_content_offset(&text) {
        return Ok(resolved(column, IndentSource::Content));
    }

    if let Some(service) = service {
        if let Some(column) = service.indent_for_line(doc, line) {
            return Ok(resolved(column, IndentSource::Query));
        }
        match probe_indent(doc, line, service) {
            Ok(column) => return Ok(resolved(column, IndentSource::Probe)),
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => emit_log(
                LogLevel::Warn,
                &format!("indent probe failed on line {line}, scanning back: {err}"),
            ),
        }
    }

    Ok(match preceding_indent(&*doc, line) {
        Some(column) => resolved(column, IndentSource::PrecedingLine),
        None => resolved(0, IndentSource::LineStart),
    })
}

/// [`resolve_logical_start`] on an editor component, with its caret and
/// selection anchor put back afterwards.
pub fn resolve_for_component(
    component: &mut dyn TextComponent,
    line: usize,
    service: Option<&mut (dyn IndentService + '_)>,
) -> Result<LogicalStart> {
    let (dot, mark) = (component.dot(), component.mark());
    let resolved = resolve_logical_start(component.as_document_mut(), line, service);
    if (component.dot(), component.mark()) != (dot, mark) {
        component.select(mark, dot);
    }
    resolved
}

/// Leading whitespace length of the nearest line before `line` that has
/// content.
#[must_use]
pub fn preceding_indent<D: Document + ?Sized>(doc: &D, line: usize) -> Option<usize> {
    (0..line)
        .rev()
        .find_map(|idx| first_content_offset(&line_text(doc, idx)))
}

/// Normalize `line` through the service, measure its indentation, then put
/// the original text back. The service stays locked until the line is
/// restored.
fn probe_indent(
    doc: &mut dyn Document,
    line: usize,
    service: &mut (dyn IndentService + '_),
) -> Result<usize> {
    let bounds = doc.line_bounds(line)?;
    let original = doc.get_text(bounds.start, bounds.len())?;

    let mut lock = IndentLock::acquire(service);
    let measured = lock
        .normalize_indentation(doc, bounds.start, bounds.end)
        .map(|()| leading_whitespace_len(&line_text(&*doc, line)));

    restore_line(doc, line, &original).map_err(|source| Error::ProbeRestore {
        line,
        source: Box::new(source),
    })?;
    drop(lock);

    measured
}

fn restore_line(doc: &mut dyn Document, line: usize, original: &str) -> Result<()> {
    let bounds = doc.line_bounds(line)?;
    if doc.get_text(bounds.start, bounds.len())? == original {
        return Ok(());
    }
    doc.remove(bounds.start, bounds.len())?;
    doc.insert(bounds.start, original)
}
