//! Rope-backed text storage with a caret.
//!
//! This is the crate's own editor component: a [`Document`](crate::Document)
//! and [`Caret`](crate::Caret) that hosts without a buffer of their own (and
//! the test suite) can drive the deletion interceptor with.
//!
//! Key types:
//!
//! - [`EditBuffer`]: Editable buffer with caret, selection anchor and the
//!   default single-unit deletions
//! - [`RopeWrapper`]: Bounds-checked wrapper over `ropey::Rope`
//!
//! # Examples
//!
//! ```
//! use smart_backspace::{Caret, Document, EditBuffer};
//!
//! let mut buffer = EditBuffer::with_text("fn main() {\n    \n}");
//! assert_eq!(buffer.line_count(), 3);
//! assert_eq!(buffer.line_bounds(1).unwrap(), 12..17);
//!
//! buffer.move_to(1, 4);
//! assert_eq!(buffer.dot(), 16);
//! ```

mod edit;
mod rope;

pub use edit::{CursorPosition, EditBuffer};
pub use rope::RopeWrapper;
