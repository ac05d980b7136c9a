//! # Scratch Text
//!
//! The copy and format helpers aimed at a scratch arena. Each call wakes the
//! scratch arena if it is still dormant.

use std::fmt;

use bumpkit_core::{Allocation, DiagnosticSink, MemorySource, ScratchArena};

use crate::copy::{copy_into, read_text};
use crate::error::TextResult;
use crate::format::format_into;

/// Copies `text` plus a terminator into the scratch arena.
///
/// # Errors
///
/// Same as [`copy_into`].
pub fn scratch_copy<M: MemorySource, D: DiagnosticSink>(
    scratch: &mut ScratchArena<M, D>,
    text: &str,
) -> TextResult<Allocation> {
    copy_into(scratch.arena_mut(), text)
}

/// Renders `args` plus a terminator into the scratch arena.
///
/// Prefer the [`scratch_format!`](crate::scratch_format) macro.
///
/// # Errors
///
/// Same as [`format_into`].
pub fn scratch_format<M: MemorySource, D: DiagnosticSink>(
    scratch: &mut ScratchArena<M, D>,
    args: fmt::Arguments<'_>,
) -> TextResult<Allocation> {
    format_into(scratch.arena_mut(), args)
}

/// Returns the text stored behind a scratch handle.
///
/// # Errors
///
/// Same as [`read_text`].
pub fn read_scratch_text<M: MemorySource, D: DiagnosticSink>(
    scratch: &ScratchArena<M, D>,
    allocation: Allocation,
) -> TextResult<&str> {
    read_text(scratch.arena(), allocation)
}
