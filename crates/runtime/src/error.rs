//! Positioned runtime errors
//!
//! Core operations fail with a bare [`ErrorKind`]. While an error unwinds
//! through the evaluator, the first `process` frame it passes stamps it with
//! the offset of the character being executed, so the innermost offset wins:
//! an underflow inside a called lambda points into the lambda body, not at
//! the `!` that called it.

use false_core::ErrorKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A fatal error, optionally tied to a byte offset in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    /// `None` for start-up errors and for a non-empty stack at exit
    pub position: Option<usize>,
}

impl Error {
    pub const fn new(kind: ErrorKind) -> Self {
        Error {
            kind,
            position: None,
        }
    }

    pub const fn at(kind: ErrorKind, position: usize) -> Self {
        Error {
            kind,
            position: Some(position),
        }
    }

    /// Attach `position` unless a deeper frame already did
    pub(crate) fn or_at(self, position: usize) -> Self {
        Error {
            position: self.position.or(Some(position)),
            ..self
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}
