//! # Arena Allocator
//!
//! A fixed-capacity bump allocator with a one-step rollback checkpoint.

use std::fmt;

use bytemuck::Pod;

use super::handle::{Allocation, ArenaId, Marker};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::{ArenaError, ArenaResult};
use crate::source::{MemorySource, SystemSource};

/// A bump-pointer arena allocator.
///
/// The buffer is acquired once at construction and never grows.
/// Allocations are fast (just bump the cursor) and are freed all at once
/// when the arena is cleared or destroyed. The most recent allocation can
/// also be forgotten with [`rollback`](Self::rollback).
///
/// Allocations are returned as [`Allocation`] handles. The bytes behind a
/// handle are reached through [`bytes`](Self::bytes) and
/// [`bytes_mut`](Self::bytes_mut), which reject handles from other arenas,
/// from before a clear, or past the cursor.
///
/// # Thread Safety
///
/// This arena is NOT thread-safe. Use one arena per thread, or wrap it in a
/// [`SharedArena`](crate::SharedArena).
///
/// # Example
///
/// ```rust
/// use bumpkit_core::Arena;
///
/// let mut arena = Arena::new(1024);
///
/// let life = arena.alloc_value(42i32).unwrap();
/// assert_eq!(arena.read_value::<i32>(life).unwrap(), 42);
///
/// // Forget the last allocation
/// assert_eq!(arena.rollback().unwrap(), 4);
///
/// // Reset to free all allocations
/// arena.clear();
/// assert_eq!(arena.used(), 0);
/// ```
pub struct Arena<M: MemorySource = SystemSource, D: DiagnosticSink = TracingSink> {
    /// Identifier stamped into every handle.
    id: ArenaId,
    /// The backing storage. `None` after a failed construction or a destroy.
    buffer: Option<Box<[u8]>>,
    /// Total capacity.
    capacity: usize,
    /// Offset of the first free byte.
    cursor: usize,
    /// Cursor value before the most recent allocation.
    checkpoint: usize,
    /// Bumped by clear, destroy and rebuild to invalidate outstanding handles.
    epoch: u64,
    /// Where the buffer comes from.
    source: M,
    /// Where failures are reported.
    sink: D,
}

impl Arena {
    /// Creates a new arena with the specified capacity in bytes.
    ///
    /// Never panics. If the memory cannot be supplied the failure is
    /// reported and the returned arena is unbacked with zero capacity;
    /// check [`is_backed`](Self::is_backed) before relying on it.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Total size in bytes
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_parts(capacity, SystemSource, TracingSink)
    }

    /// Creates a new arena, or returns the construction failure.
    ///
    /// # Errors
    ///
    /// [`ArenaError::ConstructionFailed`] if the memory cannot be supplied.
    pub fn try_new(capacity: usize) -> ArenaResult<Self> {
        Self::try_with_parts(capacity, SystemSource, TracingSink)
    }
}

impl<M: MemorySource, D: DiagnosticSink> Arena<M, D> {
    /// Creates a new arena drawing memory from `source` and reporting to `sink`.
    ///
    /// Like [`Arena::new`], a failed acquisition yields an unbacked arena.
    #[must_use]
    pub fn with_parts(capacity: usize, source: M, sink: D) -> Self {
        let mut arena = Self::unbacked(source, sink);
        arena.rebuild(capacity);
        arena
    }

    /// Creates a new arena from explicit parts, or returns the construction failure.
    ///
    /// # Errors
    ///
    /// [`ArenaError::ConstructionFailed`] if `source` cannot supply `capacity` bytes.
    pub fn try_with_parts(capacity: usize, source: M, sink: D) -> ArenaResult<Self> {
        let mut arena = Self::unbacked(source, sink);
        if arena.rebuild(capacity) {
            Ok(arena)
        } else {
            Err(ArenaError::ConstructionFailed { capacity })
        }
    }

    /// An arena with no buffer and zero capacity.
    pub(crate) fn unbacked(source: M, sink: D) -> Self {
        Self {
            id: ArenaId::next(),
            buffer: None,
            capacity: 0,
            cursor: 0,
            checkpoint: 0,
            epoch: 0,
            source,
            sink,
        }
    }

    /// Re-constructs the arena in place with a fresh buffer of `capacity` bytes.
    ///
    /// Any current buffer is released first and every outstanding handle
    /// becomes stale. Returns false, after reporting, if the memory cannot be
    /// supplied; the arena is then unbacked with zero capacity.
    pub fn rebuild(&mut self, capacity: usize) -> bool {
        self.destroy();

        match self.source.acquire(capacity) {
            Some(buffer) if buffer.len() == capacity => {
                self.buffer = Some(buffer);
                self.capacity = capacity;
                tracing::debug!(arena = self.id.get(), capacity, "arena constructed");
                true
            }
            rejected => {
                if let Some(buffer) = rejected {
                    self.source.release(buffer);
                }
                self.report(ArenaError::ConstructionFailed { capacity });
                false
            }
        }
    }

    /// Returns the identifier stamped into this arena's handles.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ArenaId {
        self.id
    }

    /// Returns true if the arena owns a buffer.
    #[inline]
    #[must_use]
    pub const fn is_backed(&self) -> bool {
        self.buffer.is_some()
    }

    /// Returns the total capacity in bytes.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the offset of the first free byte.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the current used space in bytes.
    #[inline]
    #[must_use]
    pub const fn used(&self) -> usize {
        self.cursor
    }

    /// Returns the remaining free space in bytes.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.capacity - self.cursor
    }

    /// Returns the cursor value before the most recent allocation.
    #[inline]
    #[must_use]
    pub const fn checkpoint(&self) -> usize {
        self.checkpoint
    }

    /// Returns the memory source.
    #[inline]
    #[must_use]
    pub const fn source(&self) -> &M {
        &self.source
    }

    /// Returns the diagnostic sink.
    #[inline]
    #[must_use]
    pub const fn sink(&self) -> &D {
        &self.sink
    }

    /// Allocates `size` bytes.
    ///
    /// This is a **O(1)** operation. The bytes are zero only the first time
    /// a range is handed out; ranges reused after a rollback or clear keep
    /// whatever was written to them before.
    ///
    /// # Errors
    ///
    /// [`ArenaError::CapacityExhausted`] if `size` does not fit, or
    /// [`ArenaError::Unbacked`] if the arena has no buffer. Both are reported
    /// to the sink and leave the arena untouched.
    pub fn allocate(&mut self, size: usize) -> ArenaResult<Allocation> {
        if self.buffer.is_none() {
            return Err(self.report(ArenaError::Unbacked));
        }

        let end = match self.cursor.checked_add(size) {
            Some(end) if end <= self.capacity => end,
            _ => {
                return Err(self.report(ArenaError::CapacityExhausted {
                    requested: size,
                    cursor: self.cursor,
                    capacity: self.capacity,
                }));
            }
        };

        let allocation = Allocation {
            arena: self.id,
            epoch: self.epoch,
            offset: self.cursor,
            len: size,
        };
        self.checkpoint = self.cursor;
        self.cursor = end;

        Ok(allocation)
    }

    /// Forgets the most recent allocation, returning the bytes reclaimed.
    ///
    /// Only one level is kept: a second rollback with no allocation in
    /// between reclaims nothing and returns `Ok(0)`.
    ///
    /// # Errors
    ///
    /// [`ArenaError::InvalidRollback`] if the checkpoint lies past the cursor.
    /// The arena is left untouched.
    pub fn rollback(&mut self) -> ArenaResult<usize> {
        if self.checkpoint > self.cursor {
            return Err(self.report(ArenaError::InvalidRollback {
                checkpoint: self.checkpoint,
                cursor: self.cursor,
            }));
        }

        let reclaimed = self.cursor - self.checkpoint;
        self.cursor = self.checkpoint;
        Ok(reclaimed)
    }

    /// Resets the arena, invalidating all previous allocations.
    ///
    /// This is a **zero-cost** operation - no memory is freed, wiped or
    /// reallocated. Capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.cursor = 0;
        self.checkpoint = 0;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Releases the buffer back to the memory source.
    ///
    /// The arena is left unbacked with zero capacity. Only
    /// [`rebuild`](Self::rebuild) makes it usable again.
    pub fn destroy(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            tracing::debug!(arena = self.id.get(), capacity = self.capacity, "arena destroyed");
            self.source.release(buffer);
        }
        self.capacity = 0;
        self.cursor = 0;
        self.checkpoint = 0;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Saves the current cursor for a later [`rewind`](Self::rewind).
    #[inline]
    #[must_use]
    pub const fn mark(&self) -> Marker {
        Marker {
            arena: self.id,
            epoch: self.epoch,
            cursor: self.cursor,
        }
    }

    /// Moves the cursor back to `marker`, returning the bytes reclaimed.
    ///
    /// Every allocation made after the marker is released at once. The
    /// rollback checkpoint is pulled back with the cursor if needed.
    ///
    /// # Errors
    ///
    /// [`ArenaError::ForeignHandle`] if the marker came from another arena,
    /// or [`ArenaError::StaleHandle`] if the arena was cleared since, or the
    /// cursor already sits before the marker.
    pub fn rewind(&mut self, marker: Marker) -> ArenaResult<usize> {
        if marker.arena != self.id {
            return Err(ArenaError::ForeignHandle);
        }
        if marker.epoch != self.epoch || marker.cursor > self.cursor {
            return Err(ArenaError::StaleHandle);
        }

        let reclaimed = self.cursor - marker.cursor;
        self.cursor = marker.cursor;
        self.checkpoint = self.checkpoint.min(marker.cursor);
        Ok(reclaimed)
    }

    /// Returns the bytes behind a live handle.
    ///
    /// # Errors
    ///
    /// See [`ArenaError::ForeignHandle`], [`ArenaError::StaleHandle`] and
    /// [`ArenaError::Unbacked`].
    pub fn bytes(&self, allocation: Allocation) -> ArenaResult<&[u8]> {
        self.validate(allocation)?;
        let buffer = self.buffer.as_deref().ok_or(ArenaError::Unbacked)?;
        Ok(&buffer[allocation.offset..allocation.end()])
    }

    /// Returns the bytes behind a live handle, mutably.
    ///
    /// # Errors
    ///
    /// Same as [`bytes`](Self::bytes).
    pub fn bytes_mut(&mut self, allocation: Allocation) -> ArenaResult<&mut [u8]> {
        self.validate(allocation)?;
        let buffer = self.buffer.as_deref_mut().ok_or(ArenaError::Unbacked)?;
        Ok(&mut buffer[allocation.offset..allocation.end()])
    }

    /// Allocates `size_of::<T>()` bytes and stores `value` in them.
    ///
    /// No alignment padding is inserted; values are copied byte-wise.
    ///
    /// # Errors
    ///
    /// Same as [`allocate`](Self::allocate).
    pub fn alloc_value<T: Pod>(&mut self, value: T) -> ArenaResult<Allocation> {
        let allocation = self.allocate(std::mem::size_of::<T>())?;
        self.write_value(allocation, value)?;
        Ok(allocation)
    }

    /// Overwrites the value stored behind `allocation`.
    ///
    /// # Errors
    ///
    /// [`ArenaError::SizeMismatch`] if the handle is not exactly
    /// `size_of::<T>()` bytes, or any error from [`bytes_mut`](Self::bytes_mut).
    pub fn write_value<T: Pod>(&mut self, allocation: Allocation, value: T) -> ArenaResult<()> {
        check_size::<T>(allocation)?;
        self.bytes_mut(allocation)?
            .copy_from_slice(bytemuck::bytes_of(&value));
        Ok(())
    }

    /// Reads back the value stored behind `allocation`.
    ///
    /// # Errors
    ///
    /// [`ArenaError::SizeMismatch`] if the handle is not exactly
    /// `size_of::<T>()` bytes, or any error from [`bytes`](Self::bytes).
    pub fn read_value<T: Pod>(&self, allocation: Allocation) -> ArenaResult<T> {
        check_size::<T>(allocation)?;
        Ok(bytemuck::pod_read_unaligned(self.bytes(allocation)?))
    }

    /// Checks that `allocation` was issued by this arena and is still live.
    fn validate(&self, allocation: Allocation) -> ArenaResult<()> {
        if allocation.arena != self.id {
            return Err(ArenaError::ForeignHandle);
        }
        if allocation.epoch != self.epoch || allocation.end() > self.cursor {
            return Err(ArenaError::StaleHandle);
        }
        Ok(())
    }

    /// Hands `error` to the sink and gives it back for returning.
    fn report(&self, error: ArenaError) -> ArenaError {
        self.sink.report(&error);
        error
    }
}

/// Rejects typed access through a handle of the wrong length.
fn check_size<T>(allocation: Allocation) -> ArenaResult<()> {
    let expected = std::mem::size_of::<T>();
    if allocation.len == expected {
        Ok(())
    } else {
        Err(ArenaError::SizeMismatch {
            expected,
            actual: allocation.len,
        })
    }
}

impl<M: MemorySource, D: DiagnosticSink> Drop for Arena<M, D> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.source.release(buffer);
        }
    }
}

impl<M: MemorySource, D: DiagnosticSink> fmt::Debug for Arena<M, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("backed", &self.is_backed())
            .field("capacity", &self.capacity)
            .field("cursor", &self.cursor)
            .field("checkpoint", &self.checkpoint)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::source::BudgetSource;

    fn recorded(capacity: usize) -> (Arena<SystemSource, RecordingSink>, RecordingSink) {
        let sink = RecordingSink::new();
        let arena = Arena::with_parts(capacity, SystemSource, sink.clone());
        (arena, sink)
    }

    #[test]
    fn test_arena_allocation() {
        let mut arena = Arena::new(1024);
        let a = arena.allocate(10).unwrap();
        assert_eq!(a.offset(), 0);
        assert_eq!(a.len(), 10);
        assert_eq!(arena.used(), 10);
        assert_eq!(arena.remaining(), 1014);
    }

    #[test]
    fn test_allocations_are_contiguous_and_disjoint() {
        let mut arena = Arena::new(64);
        let sizes = [3, 0, 7, 16, 38];
        let mut expected_offset = 0;

        for size in sizes {
            let a = arena.allocate(size).unwrap();
            assert_eq!(a.offset(), expected_offset);
            expected_offset += size;
        }
        assert_eq!(arena.cursor(), 64);
        assert_eq!(arena.remaining(), 0);
    }

    #[test]
    fn test_exhaustion_leaves_cursor() {
        let (mut arena, sink) = recorded(1024);

        let a = arena.allocate(4).unwrap();
        assert_eq!(a.offset(), 0);
        assert_eq!(arena.cursor(), 4);

        let err = arena.allocate(1024).unwrap_err();
        assert_eq!(
            err,
            ArenaError::CapacityExhausted {
                requested: 1024,
                cursor: 4,
                capacity: 1024
            }
        );
        assert_eq!(arena.cursor(), 4);
        assert_eq!(arena.checkpoint(), 0);
        assert_eq!(sink.reports(), vec![err]);
    }

    #[test]
    fn test_exhaustion_on_overflowing_size() {
        let (mut arena, sink) = recorded(16);
        arena.allocate(1).unwrap();
        assert!(matches!(
            arena.allocate(usize::MAX),
            Err(ArenaError::CapacityExhausted { .. })
        ));
        assert_eq!(arena.cursor(), 1);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_rollback_single_level() {
        let mut arena = Arena::new(128);
        arena.allocate(8).unwrap();
        arena.allocate(24).unwrap();

        assert_eq!(arena.rollback().unwrap(), 24);
        assert_eq!(arena.cursor(), 8);

        assert_eq!(arena.rollback().unwrap(), 0);
        assert_eq!(arena.cursor(), 8);
    }

    #[test]
    fn test_rollback_on_fresh_arena() {
        let mut arena = Arena::new(8);
        assert_eq!(arena.rollback().unwrap(), 0);
        assert_eq!(arena.cursor(), 0);
    }

    #[test]
    fn test_rollback_invalid_state() {
        let (mut arena, sink) = recorded(32);
        arena.allocate(4).unwrap();
        arena.checkpoint = 16;

        let err = arena.rollback().unwrap_err();
        assert_eq!(
            err,
            ArenaError::InvalidRollback {
                checkpoint: 16,
                cursor: 4
            }
        );
        assert_eq!(arena.cursor(), 4);
        assert_eq!(arena.checkpoint(), 16);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new(256);
        arena.allocate(100).unwrap();
        arena.allocate(50).unwrap();

        arena.clear();
        assert_eq!(arena.cursor(), 0);
        assert_eq!(arena.checkpoint(), 0);
        assert_eq!(arena.capacity(), 256);

        let a = arena.allocate(256).unwrap();
        assert_eq!(a.offset(), 0);
    }

    #[test]
    fn test_reused_bytes_not_wiped() {
        let mut arena = Arena::new(8);
        let a = arena.allocate(4).unwrap();
        arena.bytes_mut(a).unwrap().copy_from_slice(b"abcd");

        arena.rollback().unwrap();
        let b = arena.allocate(4).unwrap();
        assert_eq!(arena.bytes(b).unwrap(), b"abcd");

        arena.clear();
        let c = arena.allocate(2).unwrap();
        assert_eq!(arena.bytes(c).unwrap(), b"ab");
    }

    #[test]
    fn test_destroy_and_rebuild() {
        let mut arena = Arena::new(64);
        arena.allocate(10).unwrap();

        arena.destroy();
        assert!(!arena.is_backed());
        assert_eq!(arena.capacity(), 0);
        assert_eq!(arena.cursor(), 0);
        assert_eq!(arena.checkpoint(), 0);

        assert!(arena.rebuild(32));
        assert_eq!(arena.capacity(), 32);
        assert_eq!(arena.cursor(), 0);
        assert_eq!(arena.checkpoint(), 0);
        assert_eq!(arena.allocate(32).unwrap().offset(), 0);
    }

    #[test]
    fn test_destroyed_arena_refuses_allocation() {
        let (mut arena, sink) = recorded(64);
        arena.destroy();
        assert_eq!(arena.allocate(0), Err(ArenaError::Unbacked));
        assert_eq!(sink.reports(), vec![ArenaError::Unbacked]);
    }

    #[test]
    fn test_construction_failure_is_unbacked() {
        let sink = RecordingSink::new();
        let mut arena = Arena::with_parts(256, BudgetSource::new(128), sink.clone());

        assert!(!arena.is_backed());
        assert_eq!(arena.capacity(), 0);
        assert_eq!(
            sink.reports(),
            vec![ArenaError::ConstructionFailed { capacity: 256 }]
        );
        assert!(arena.allocate(1).is_err());
    }

    #[test]
    fn test_try_new_failure() {
        let result = Arena::try_with_parts(256, BudgetSource::new(8), RecordingSink::new());
        assert_eq!(
            result.unwrap_err(),
            ArenaError::ConstructionFailed { capacity: 256 }
        );
        assert!(Arena::try_new(16).is_ok());
    }

    #[test]
    fn test_buffer_returned_to_source() {
        let mut arena = Arena::with_parts(40, BudgetSource::new(100), RecordingSink::new());
        assert_eq!(arena.source().remaining(), 60);

        arena.destroy();
        assert_eq!(arena.source().remaining(), 100);

        // Destroying twice releases nothing more
        arena.destroy();
        assert_eq!(arena.source().remaining(), 100);
    }

    #[test]
    fn test_handle_checks() {
        let mut arena = Arena::new(32);
        let mut other = Arena::new(32);
        let a = arena.allocate(8).unwrap();
        other.allocate(8).unwrap();

        assert_eq!(other.bytes(a), Err(ArenaError::ForeignHandle));

        arena.rollback().unwrap();
        assert_eq!(arena.bytes(a), Err(ArenaError::StaleHandle));

        let b = arena.allocate(8).unwrap();
        arena.clear();
        assert_eq!(arena.bytes(b), Err(ArenaError::StaleHandle));

        let c = arena.allocate(8).unwrap();
        arena.destroy();
        assert_eq!(arena.bytes(c), Err(ArenaError::StaleHandle));
    }

    #[test]
    fn test_values() {
        let mut arena = Arena::new(64);
        let life = arena.alloc_value(42i32).unwrap();
        let pi = arena.alloc_value(3.5f64).unwrap();

        // 4 + 8 bytes, no alignment padding
        assert_eq!(pi.offset(), 4);
        assert_eq!(arena.read_value::<i32>(life).unwrap(), 42);
        assert_eq!(arena.read_value::<f64>(pi).unwrap(), 3.5);

        arena.write_value(life, 13i32).unwrap();
        assert_eq!(arena.read_value::<i32>(life).unwrap(), 13);

        assert_eq!(
            arena.read_value::<u64>(life),
            Err(ArenaError::SizeMismatch {
                expected: 8,
                actual: 4
            })
        );
    }

    #[test]
    fn test_markers() {
        let mut arena = Arena::new(64);
        arena.allocate(4).unwrap();
        let marker = arena.mark();

        arena.allocate(8).unwrap();
        arena.allocate(8).unwrap();
        arena.allocate(8).unwrap();

        assert_eq!(arena.rewind(marker).unwrap(), 24);
        assert_eq!(arena.cursor(), 4);
        assert!(arena.checkpoint() <= arena.cursor());

        // Plain rollback still works afterwards
        arena.allocate(2).unwrap();
        assert_eq!(arena.rollback().unwrap(), 2);

        arena.clear();
        assert_eq!(arena.rewind(marker), Err(ArenaError::StaleHandle));
        assert_eq!(Arena::new(8).rewind(marker), Err(ArenaError::ForeignHandle));
    }

    #[test]
    fn test_marker_past_cursor_is_stale() {
        let mut arena = Arena::new(64);
        arena.allocate(16).unwrap();
        let marker = arena.mark();
        arena.rollback().unwrap();
        assert_eq!(arena.rewind(marker), Err(ArenaError::StaleHandle));
        assert_eq!(arena.cursor(), 0);
    }
}
