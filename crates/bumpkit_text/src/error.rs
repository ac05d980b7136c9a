//! # Text Error Types

use bumpkit_core::ArenaError;
use thiserror::Error;

/// Errors that can occur while writing or reading arena text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// The arena refused the allocation or the handle.
    #[error(transparent)]
    Arena(#[from] ArenaError),

    /// A formatting impl failed, or rendered a different length on the
    /// second pass than on the measuring pass.
    #[error("formatting failed while rendering into the arena")]
    Format,

    /// The allocation does not end with a terminator byte.
    #[error("allocation is not terminated")]
    MissingTerminator,

    /// The bytes before the terminator are not UTF-8.
    #[error("allocation does not hold valid UTF-8 text")]
    InvalidUtf8,

    /// The text contains a NUL byte before its terminator.
    #[error("text contains an interior NUL byte")]
    InteriorNul,
}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
