//! # Formatting
//!
//! Renders `format_args!` output straight into an arena allocation.
//!
//! Rendering happens twice: a dry run that only counts bytes, then the real
//! write into an allocation of exactly that size plus the terminator. No
//! intermediate `String` is built.

use std::fmt::{self, Write};

use bumpkit_core::{Allocation, Arena, DiagnosticSink, MemorySource};

use crate::copy::TERMINATOR;
use crate::error::{TextError, TextResult};

/// Counts rendered bytes without storing them.
#[derive(Default)]
struct ByteCounter {
    /// Bytes seen so far.
    len: usize,
}

impl Write for ByteCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.len += s.len();
        Ok(())
    }
}

/// Writes rendered bytes into a fixed slice, failing on overflow.
struct SliceWriter<'a> {
    /// Destination.
    buf: &'a mut [u8],
    /// Bytes written so far.
    pos: usize,
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.pos.checked_add(s.len()).ok_or(fmt::Error)?;
        self.buf
            .get_mut(self.pos..end)
            .ok_or(fmt::Error)?
            .copy_from_slice(s.as_bytes());
        self.pos = end;
        Ok(())
    }
}

/// Measures the rendered length of `args`.
///
/// # Errors
///
/// [`TextError::Format`] if a formatting impl fails.
pub fn rendered_len(args: fmt::Arguments<'_>) -> TextResult<usize> {
    let mut counter = ByteCounter::default();
    counter.write_fmt(args).map_err(|_| TextError::Format)?;
    Ok(counter.len)
}

/// Renders `args` plus a terminator into a fresh allocation and returns it.
///
/// Prefer the [`arena_format!`](crate::arena_format) macro.
///
/// # Errors
///
/// [`TextError::Arena`] carrying the allocation failure unchanged, or
/// [`TextError::Format`] if rendering fails or is not repeatable. On a
/// formatting failure after allocation the allocation is rolled back.
pub fn format_into<M: MemorySource, D: DiagnosticSink>(
    arena: &mut Arena<M, D>,
    args: fmt::Arguments<'_>,
) -> TextResult<Allocation> {
    let len = rendered_len(args)?;
    let allocation = arena.allocate(len + 1)?;

    if render(arena, allocation, len, args).is_err() {
        arena.rollback()?;
        return Err(TextError::Format);
    }
    Ok(allocation)
}

/// Second pass: writes exactly `len` bytes and the terminator.
fn render<M: MemorySource, D: DiagnosticSink>(
    arena: &mut Arena<M, D>,
    allocation: Allocation,
    len: usize,
    args: fmt::Arguments<'_>,
) -> TextResult<()> {
    let (body, terminator) = arena.bytes_mut(allocation)?.split_at_mut(len);
    let mut writer = SliceWriter { buf: body, pos: 0 };
    writer.write_fmt(args).map_err(|_| TextError::Format)?;
    if writer.pos != len {
        return Err(TextError::Format);
    }
    terminator[0] = TERMINATOR;
    Ok(())
}
