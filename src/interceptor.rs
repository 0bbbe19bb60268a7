//! Smart backspace deletion interceptor.
//!
//! The host calls the interceptor around every single-unit deletion:
//!
//! ```text
//! before_remove -> (host deletes) -> remove -> after_remove
//!                                \-> cancelled
//! ```
//!
//! `before_remove` records where the caret was and whether real text sat to
//! its left. `remove` inspects the line the host's default deletion left
//! behind. When a backspace leaves the caret on a whitespace-only line (and
//! the line is not the first), one of two adjustments follows:
//!
//! - **Snap**: the caret is past the line's logical indentation; the
//!   whitespace between the logical column and the caret is removed and the
//!   caret moves to the logical column.
//! - **Join**: the caret is at or before the logical column; the whole line,
//!   terminator included, is removed and the caret moves to the content end
//!   of the previous line.
//!
//! Everything else keeps the host's default deletion as is.
//!
//! # Examples
//!
//! ```
//! use smart_backspace::{Adjustment, Caret, DeletionContext, DeletionInterceptor, EditBuffer};
//!
//! let mut buffer = EditBuffer::with_text("fn f() {}\n \nx");
//! buffer.set_dot(11);
//!
//! let mut interceptor = DeletionInterceptor::new();
//! assert!(interceptor.before_remove(&DeletionContext::new(&mut buffer)));
//! buffer.delete_backward();
//!
//! let mut ctx = DeletionContext::new(&mut buffer);
//! let adjustment = interceptor.remove(&mut ctx).unwrap();
//! interceptor.after_remove(&ctx);
//!
//! assert!(matches!(adjustment, Adjustment::Joined { .. }));
//! assert_eq!(buffer.text(), "fn f() {}\nx");
//! assert_eq!(buffer.dot(), 9);
//! ```

use crate::document::{IndentService, TextComponent, content_end, is_blank, safe_text};
use crate::error::Result;
use crate::event::{EVENT_JOIN, EVENT_SNAP, LogLevel, emit_adjustment, emit_log};
use crate::indent::resolve_for_component;
use std::ops::Range;

/// Behaviour switches for a [`DeletionInterceptor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterceptorOptions {
    /// Snap an over-indented blank line back to its logical column.
    pub snap_to_indent: bool,
    /// Join a blank line with the previous line.
    pub join_blank_lines: bool,
    /// Consult the bound indentation service. When off, blank lines take the
    /// indentation of the nearest preceding line with content.
    pub use_indent_service: bool,
}

impl Default for InterceptorOptions {
    fn default() -> Self {
        Self {
            snap_to_indent: true,
            join_blank_lines: true,
            use_indent_service: true,
        }
    }
}

impl InterceptorOptions {
    #[must_use]
    pub fn with_snap_to_indent(mut self, enabled: bool) -> Self {
        self.snap_to_indent = enabled;
        self
    }

    #[must_use]
    pub fn with_join_blank_lines(mut self, enabled: bool) -> Self {
        self.join_blank_lines = enabled;
        self
    }

    #[must_use]
    pub fn with_indent_service(mut self, enabled: bool) -> Self {
        self.use_indent_service = enabled;
        self
    }
}

/// Per-event memory, captured by `before_remove` and consumed by `remove`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventState {
    /// No deletion event in flight.
    #[default]
    Idle,
    /// A deletion is in flight.
    Armed {
        /// Caret offset before the host's default deletion.
        before_dot: usize,
        /// Non-whitespace text sat between line start and the caret.
        had_text_to_left: bool,
        /// The deletion started from a selection.
        had_selection: bool,
    },
}

impl EventState {
    /// Capture the pre-deletion state of `component`.
    #[must_use]
    pub fn capture(component: &dyn TextComponent) -> Self {
        let before_dot = component.dot();
        let line = component.line_index_containing(before_dot);
        let line_start = component
            .line_bounds(line)
            .map_or(before_dot, |bounds| bounds.start);
        let left = safe_text(component, line_start, before_dot.saturating_sub(line_start));
        Self::Armed {
            before_dot,
            had_text_to_left: !is_blank(&left),
            had_selection: component.has_selection(),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// What `remove` did on top of the host's default deletion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Adjustment {
    /// The default deletion stands.
    None,
    /// Whitespace between the logical column and the caret was removed.
    Snapped {
        line: usize,
        removed: Range<usize>,
        caret: usize,
    },
    /// The blank line was removed and the caret joined the previous line.
    Joined {
        line: usize,
        removed: Range<usize>,
        caret: usize,
    },
}

impl Adjustment {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// The collaborators bound to one deletion event.
///
/// A context without a component (see [`detached`](Self::detached)) makes
/// every callback a no-op.
#[derive(Default)]
pub struct DeletionContext<'a> {
    component: Option<&'a mut (dyn TextComponent + 'a)>,
    indent: Option<&'a mut (dyn IndentService + 'a)>,
}

impl<'a> DeletionContext<'a> {
    pub fn new(component: &'a mut (dyn TextComponent + 'a)) -> Self {
        Self {
            component: Some(component),
            indent: None,
        }
    }

    /// Context with no editor component bound.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// Bind the host's indentation service for this event.
    #[must_use]
    pub fn with_indent_service(mut self, service: &'a mut (dyn IndentService + 'a)) -> Self {
        self.indent = Some(service);
        self
    }

    #[must_use]
    pub fn component(&self) -> Option<&dyn TextComponent> {
        self.component.as_deref()
    }

    #[must_use]
    pub fn has_indent_service(&self) -> bool {
        self.indent.is_some()
    }
}

/// Smart backspace hook for one document.
///
/// Instances hold the state of at most one in-flight deletion and must not be
/// shared across documents.
#[derive(Clone, Debug, Default)]
pub struct DeletionInterceptor {
    options: InterceptorOptions,
    state: EventState,
}

impl DeletionInterceptor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: InterceptorOptions) -> Self {
        Self {
            options,
            state: EventState::Idle,
        }
    }

    #[must_use]
    pub fn options(&self) -> InterceptorOptions {
        self.options
    }

    #[must_use]
    pub fn state(&self) -> EventState {
        self.state
    }

    /// Record the caret before the host deletes. Never vetoes the default
    /// deletion: always returns `true`.
    pub fn before_remove(&mut self, ctx: &DeletionContext<'_>) -> bool {
        if let Some(component) = ctx.component() {
            self.state = EventState::capture(component);
        }
        true
    }

    /// Adjust the document after the host's default deletion.
    ///
    /// Errors come from the document mutation or from a failed indentation
    /// probe restore; the event state is cleared either way.
    pub fn remove(&mut self, ctx: &mut DeletionContext<'_>) -> Result<Adjustment> {
        let state = std::mem::take(&mut self.state);
        self.adjust(state, ctx)
    }

    /// Reset the event state once the deletion has completed.
    pub fn after_remove(&mut self, _ctx: &DeletionContext<'_>) {
        self.state = EventState::Idle;
    }

    /// Reset the event state when the host abandons the deletion.
    pub fn cancelled(&mut self, _ctx: &DeletionContext<'_>) {
        self.state = EventState::Idle;
    }

    /// Decide on and apply the adjustment for an event captured as `state`.
    ///
    /// This is `remove` without the stored state, for hosts that thread the
    /// state through their own event object.
    pub fn adjust(&self, state: EventState, ctx: &mut DeletionContext<'_>) -> Result<Adjustment> {
        let (before_dot, had_text_to_left, had_selection) = match state {
            EventState::Armed {
                before_dot,
                had_text_to_left,
                had_selection,
            } => (Some(before_dot), had_text_to_left, had_selection),
            EventState::Idle => (None, false, false),
        };
        if had_text_to_left {
            return Ok(skip("text left of caret"));
        }
        if had_selection {
            return Ok(skip("selection active"));
        }

        let DeletionContext { component, indent } = ctx;
        let Some(component) = component.as_deref_mut() else {
            return Ok(skip("no component"));
        };

        let after_dot = component.dot();
        if !before_dot.is_some_and(|before| after_dot < before) {
            return Ok(skip("not a backspace"));
        }
        if component.has_selection() {
            return Ok(skip("selection active"));
        }

        let line = component.line_index_containing(after_dot);
        let Ok(bounds) = component.line_bounds(line) else {
            return Ok(skip("caret line unavailable"));
        };
        let left = safe_text(&*component, bounds.start, after_dot.saturating_sub(bounds.start));
        if !left.chars().all(|ch| ch == ' ' || ch == '\t') {
            return Ok(skip("text left of caret"));
        }
        let whole = safe_text(&*component, bounds.start, bounds.len());
        if !is_blank(&whole) {
            return Ok(skip("line has content"));
        }
        if line == 0 {
            return Ok(skip("first line"));
        }

        let service = if self.options.use_indent_service {
            indent.as_deref_mut()
        } else {
            None
        };
        let logical = resolve_for_component(&mut *component, line, service)?;
        emit_log(
            LogLevel::Debug,
            &format!(
                "line {line}: caret {after_dot}, logical start {} ({:?})",
                logical.offset, logical.source
            ),
        );

        if after_dot > logical.offset {
            if !self.options.snap_to_indent {
                return Ok(skip("snapping disabled"));
            }
            let removed = logical.offset..after_dot;
            component.remove(removed.start, removed.len())?;
            component.set_dot(logical.offset);
            emit_adjustment(EVENT_SNAP, line, removed.start, removed.end, logical.offset);
            return Ok(Adjustment::Snapped {
                line,
                removed,
                caret: logical.offset,
            });
        }

        if !self.options.join_blank_lines {
            return Ok(skip("joining disabled"));
        }
        let caret = content_end(&*component, line - 1);
        let removed = component.line_bounds(line)?;
        component.remove(removed.start, removed.len())?;
        component.set_dot(caret);
        emit_adjustment(EVENT_JOIN, line, removed.start, removed.end, caret);
        Ok(Adjustment::Joined {
            line,
            removed,
            caret,
        })
    }
}

fn skip(reason: &str) -> Adjustment {
    emit_log(LogLevel::Debug, &format!("backspace left as is: {reason}"));
    Adjustment::None
}
