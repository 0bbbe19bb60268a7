//! An open document with its deletion interceptor.
//!
//! [`EditorSession`] plays the host's part in the deletion lifecycle: it
//! owns the buffer, runs the default deletion and calls the interceptor
//! around it.
//!
//! # Examples
//!
//! ```
//! use smart_backspace::{Adjustment, ContentType, EditorSession, InterceptorRegistry};
//!
//! let registry = InterceptorRegistry::with_defaults();
//! let mut session = EditorSession::open(&registry, ContentType::JAVA, "if (x) {\n      \n}");
//! session.set_dot(15);
//!
//! let adjustment = session.backspace().unwrap();
//! assert!(matches!(adjustment, Adjustment::Snapped { caret: 13, .. }));
//! assert_eq!(session.text(), "if (x) {\n    \n}");
//! ```

use crate::document::{Caret, IndentService};
use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::interceptor::{Adjustment, DeletionContext, DeletionInterceptor};
use crate::registry::{Binding, ContentType, InterceptorRegistry};
use crate::text::EditBuffer;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Backward,
    Forward,
}

/// A buffer bound to the interceptor for its content type.
pub struct EditorSession {
    content_type: ContentType,
    buffer: EditBuffer,
    interceptor: Option<DeletionInterceptor>,
    indent: Option<Box<dyn IndentService>>,
}

impl EditorSession {
    /// Open `text` as a document of `content_type`.
    ///
    /// Content types the registry does not know get plain default deletions.
    #[must_use]
    pub fn open(registry: &InterceptorRegistry, content_type: ContentType, text: &str) -> Self {
        let binding = registry.create(&content_type);
        if binding.is_none() {
            emit_log(
                LogLevel::Info,
                &format!("no deletion interceptor registered for {content_type}"),
            );
        }
        Self::from_parts(content_type, EditBuffer::with_text(text), binding)
    }

    #[must_use]
    pub fn from_parts(
        content_type: ContentType,
        buffer: EditBuffer,
        binding: Option<Binding>,
    ) -> Self {
        let (interceptor, indent) = match binding {
            Some(Binding {
                interceptor,
                indent,
            }) => (Some(interceptor), indent),
            None => (None, None),
        };
        Self {
            content_type,
            buffer,
            interceptor,
            indent,
        }
    }

    #[must_use]
    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    #[must_use]
    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut EditBuffer {
        &mut self.buffer
    }

    #[must_use]
    pub fn interceptor(&self) -> Option<&DeletionInterceptor> {
        self.interceptor.as_ref()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    #[must_use]
    pub fn dot(&self) -> usize {
        self.buffer.dot()
    }

    pub fn set_dot(&mut self, offset: usize) {
        self.buffer.set_dot(offset);
    }

    pub fn select(&mut self, anchor: usize, dot: usize) {
        self.buffer.select(anchor, dot);
    }

    pub fn insert_text(&mut self, text: &str) -> Result<()> {
        self.buffer.insert_text(text)
    }

    /// Backspace key: default deletion, then the interceptor's adjustment.
    pub fn backspace(&mut self) -> Result<Adjustment> {
        self.delete(Direction::Backward)
    }

    /// Delete key. The interceptor observes it but never adjusts.
    pub fn delete_forward(&mut self) -> Result<Adjustment> {
        self.delete(Direction::Forward)
    }

    fn delete(&mut self, direction: Direction) -> Result<Adjustment> {
        let Some(interceptor) = self.interceptor.as_mut() else {
            default_delete(&mut self.buffer, direction);
            return Ok(Adjustment::None);
        };

        if !interceptor.before_remove(&DeletionContext::new(&mut self.buffer)) {
            return Ok(Adjustment::None);
        }
        let deleted = default_delete(&mut self.buffer, direction);

        let mut ctx = DeletionContext::new(&mut self.buffer);
        if let Some(indent) = self.indent.as_deref_mut() {
            ctx = ctx.with_indent_service(indent);
        }
        if !deleted {
            interceptor.cancelled(&ctx);
            return Ok(Adjustment::None);
        }

        match interceptor.remove(&mut ctx) {
            Ok(adjustment) => {
                interceptor.after_remove(&ctx);
                Ok(adjustment)
            }
            Err(err) => {
                interceptor.cancelled(&ctx);
                emit_log(LogLevel::Error, &format!("deletion adjustment failed: {err}"));
                Err(err)
            }
        }
    }
}

fn default_delete(buffer: &mut EditBuffer, direction: Direction) -> bool {
    match direction {
        Direction::Backward => buffer.delete_backward(),
        Direction::Forward => buffer.delete_forward(),
    }
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("content_type", &self.content_type)
            .field("buffer", &self.buffer)
            .field("interceptor", &self.interceptor)
            .field("indent", &self.indent.is_some())
            .finish()
    }
}
