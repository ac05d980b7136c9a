//! # BUMPKIT Text
//!
//! Copies and formats strings into arena allocations.
//!
//! These helpers hold no state of their own. They ask the arena for exactly
//! the bytes they need (text plus one terminator byte) and fill them in.
//!
//! ## Example
//!
//! ```rust
//! use bumpkit_core::Arena;
//! use bumpkit_text::{arena_format, copy_into, read_text};
//!
//! let mut arena = Arena::new(256);
//!
//! let name = copy_into(&mut arena, "hello").unwrap();
//! assert_eq!(name.len(), 6);
//!
//! let line = arena_format!(&mut arena, "{} x{}", "crate", 3).unwrap();
//! assert_eq!(read_text(&arena, line).unwrap(), "crate x3");
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod copy;
pub mod error;
pub mod format;
#[cfg(feature = "scratch")]
pub mod scratch;

pub use copy::{copy_into, read_c_str, read_text, TERMINATOR};
pub use error::{TextError, TextResult};
pub use format::{format_into, rendered_len};
#[cfg(feature = "scratch")]
pub use scratch::{read_scratch_text, scratch_copy, scratch_format};

/// Formats into an arena: `arena_format!(&mut arena, "{}", x)`.
///
/// Expands to [`format_into`] and returns its result.
#[macro_export]
macro_rules! arena_format {
    ($arena:expr, $($arg:tt)*) => {
        $crate::format_into($arena, ::std::format_args!($($arg)*))
    };
}

/// Formats into a scratch arena: `scratch_format!(&mut scratch, "{}", x)`.
///
/// Expands to [`scratch_format`](crate::scratch::scratch_format) and returns
/// its result.
#[cfg(feature = "scratch")]
#[macro_export]
macro_rules! scratch_format {
    ($scratch:expr, $($arg:tt)*) => {
        $crate::scratch::scratch_format($scratch, ::std::format_args!($($arg)*))
    };
}
