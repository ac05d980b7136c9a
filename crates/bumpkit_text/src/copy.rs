//! # Copy and Read
//!
//! Terminated text in arena memory.
//!
//! Every text allocation is the text's bytes followed by one `0` byte, so
//! `"hello"` occupies 6 bytes.

use std::ffi::CStr;

use bumpkit_core::{Allocation, Arena, DiagnosticSink, MemorySource};

use crate::error::{TextError, TextResult};

/// The byte appended after every text allocation.
pub const TERMINATOR: u8 = 0;

/// Copies `text` plus a terminator into a fresh allocation.
///
/// Nothing is written unless the whole allocation succeeds.
///
/// # Errors
///
/// [`TextError::Arena`] carrying the allocation failure unchanged.
pub fn copy_into<M: MemorySource, D: DiagnosticSink>(
    arena: &mut Arena<M, D>,
    text: &str,
) -> TextResult<Allocation> {
    let allocation = arena.allocate(text.len() + 1)?;
    let (body, terminator) = arena.bytes_mut(allocation)?.split_at_mut(text.len());
    body.copy_from_slice(text.as_bytes());
    terminator[0] = TERMINATOR;
    Ok(allocation)
}

/// Returns the text stored behind `allocation`, without its terminator.
///
/// # Errors
///
/// [`TextError::Arena`] if the handle is not live,
/// [`TextError::MissingTerminator`] or [`TextError::InvalidUtf8`] if the
/// bytes are not arena text.
pub fn read_text<M: MemorySource, D: DiagnosticSink>(
    arena: &Arena<M, D>,
    allocation: Allocation,
) -> TextResult<&str> {
    let body = terminated_body(arena.bytes(allocation)?)?;
    std::str::from_utf8(body).map_err(|_| TextError::InvalidUtf8)
}

/// Returns the text stored behind `allocation` as a C string.
///
/// # Errors
///
/// As [`read_text`], plus [`TextError::InteriorNul`] if the text holds a
/// NUL byte before its terminator.
pub fn read_c_str<M: MemorySource, D: DiagnosticSink>(
    arena: &Arena<M, D>,
    allocation: Allocation,
) -> TextResult<&CStr> {
    let bytes = arena.bytes(allocation)?;
    terminated_body(bytes)?;
    CStr::from_bytes_with_nul(bytes).map_err(|_| TextError::InteriorNul)
}

/// Splits off the terminator.
fn terminated_body(bytes: &[u8]) -> TextResult<&[u8]> {
    match bytes.split_last() {
        Some((&TERMINATOR, body)) => Ok(body),
        _ => Err(TextError::MissingTerminator),
    }
}
