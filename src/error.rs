//! Error types for smart backspace.

use std::fmt;

/// Result type alias for smart backspace operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for smart backspace operations.
#[derive(Debug)]
pub enum Error {
    /// A read or mutation addressed characters outside the document.
    OutOfRange {
        offset: usize,
        len: usize,
        doc_len: usize,
    },
    /// Line index outside the document.
    LineOutOfRange { line: usize, line_count: usize },
    /// The indentation service could not normalize a line.
    Indent(String),
    /// Restoring a line after an indentation probe failed. The document may
    /// be left modified.
    ProbeRestore { line: usize, source: Box<Error> },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                offset,
                len,
                doc_len,
            } => {
                write!(
                    f,
                    "range {offset}..{} out of bounds for document of {doc_len} chars",
                    offset.saturating_add(*len)
                )
            }
            Self::LineOutOfRange { line, line_count } => {
                write!(f, "line {line} out of bounds for document of {line_count} lines")
            }
            Self::Indent(msg) => write!(f, "indentation service failed: {msg}"),
            Self::ProbeRestore { line, source } => {
                write!(f, "failed to restore line {line} after indent probe: {source}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ProbeRestore { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl Error {
    /// Whether the document may have been left in an inconsistent state.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ProbeRestore { .. })
    }
}
