//! # Shared Arena
//!
//! An arena behind a lock, for callers that must serialize access from
//! several threads instead of giving each thread its own arena.

use parking_lot::{Mutex, MutexGuard};

use super::arena::Arena;
use super::handle::Allocation;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::ArenaResult;
use crate::source::{MemorySource, SystemSource};

/// A [`Arena`] wrapped in a mutex.
///
/// Each call takes the lock for its own duration only. Hold the guard from
/// [`lock`](Self::lock) to keep an allocation and its rollback together.
#[derive(Debug)]
pub struct SharedArena<M: MemorySource = SystemSource, D: DiagnosticSink = TracingSink> {
    /// The guarded arena.
    inner: Mutex<Arena<M, D>>,
}

impl SharedArena {
    /// Creates a shared arena with the specified capacity in bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::from_arena(Arena::new(capacity))
    }
}

impl<M: MemorySource, D: DiagnosticSink> SharedArena<M, D> {
    /// Wraps an existing arena.
    #[must_use]
    pub fn from_arena(arena: Arena<M, D>) -> Self {
        Self {
            inner: Mutex::new(arena),
        }
    }

    /// Takes exclusive access to the arena.
    pub fn lock(&self) -> MutexGuard<'_, Arena<M, D>> {
        self.inner.lock()
    }

    /// Allocates `size` bytes.
    ///
    /// # Errors
    ///
    /// Same as [`Arena::allocate`].
    pub fn allocate(&self, size: usize) -> ArenaResult<Allocation> {
        self.inner.lock().allocate(size)
    }

    /// Forgets the most recent allocation made by any thread.
    ///
    /// # Errors
    ///
    /// Same as [`Arena::rollback`].
    pub fn rollback(&self) -> ArenaResult<usize> {
        self.inner.lock().rollback()
    }

    /// Resets the arena, invalidating every thread's allocations.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Returns the current used space in bytes.
    #[must_use]
    pub fn used(&self) -> usize {
        self.inner.lock().used()
    }

    /// Unwraps the arena.
    #[must_use]
    pub fn into_inner(self) -> Arena<M, D> {
        self.inner.into_inner()
    }
}
