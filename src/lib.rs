//! Smart backspace for structured text editors.
//!
//! A deletion interceptor that refines the editor's default backspace on
//! whitespace-only lines: an over-indented blank line snaps back to its
//! logical indentation, and a blank line at or before that indentation is
//! joined with the line above it. The logical indentation comes from the
//! host's indentation service when one is bound.

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)] // Allow indent::IndentSource etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::struct_excessive_bools)] // Interceptor options are independent switches
#![allow(clippy::should_implement_trait)] // from_str naming is intentional
#![allow(clippy::inherent_to_string)] // to_string methods are convenient
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod document;
pub mod error;
pub mod event;
pub mod indent;
pub mod interceptor;
pub mod registry;
pub mod session;
pub mod text;

// Re-export core types at crate root
pub use document::{Caret, Document, IndentService, TextComponent};
pub use error::{Error, Result};
pub use event::{
    EVENT_JOIN, EVENT_SNAP, LogLevel, clear_event_callback, clear_log_callback, emit_event,
    emit_log, set_event_callback, set_log_callback,
};

// Re-export interceptor types
pub use indent::{
    BraceIndenter, IndentLock, IndentSource, LogicalStart, logical_line_start,
    resolve_for_component, resolve_logical_start,
};
pub use interceptor::{Adjustment, DeletionContext, DeletionInterceptor, EventState, InterceptorOptions};

// Re-export commonly used types
pub use registry::{
    Binding, ContentType, InterceptorFactory, InterceptorRegistry, PlainTextFactory,
    StructuredTextFactory,
};
pub use session::EditorSession;
pub use text::{CursorPosition, EditBuffer};
