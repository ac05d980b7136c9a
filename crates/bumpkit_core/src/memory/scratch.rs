//! # Scratch Arena
//!
//! A lazily constructed arena for frame-scoped temporary allocations.
//!
//! ## Usage Pattern
//!
//! ```text
//!   frame N:   alloc  alloc  alloc ... clear
//!   frame N+1: alloc  alloc ... clear
//! ```
//!
//! The scratch arena stays dormant (no buffer, zero capacity) until it is
//! first used, then wakes with its configured capacity. Forgetting the
//! `clear` at the frame boundary accumulates allocations until the capacity
//! runs out, which then fails exactly like a plain [`Arena`].
//!
//! A scratch arena is an ordinary value: construct one per runtime (or per
//! thread) and pass it to whoever needs it. [`with_thread_scratch`] offers a
//! per-thread instance for call sites that cannot thread one through.

use std::cell::RefCell;

use super::arena::Arena;
use super::handle::Allocation;
use crate::config::ArenaConfig;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::ArenaResult;
use crate::source::{MemorySource, SystemSource};
use crate::units::DEFAULT_SCRATCH_CAPACITY;

/// An arena that wakes on first use.
///
/// # Thread Safety
///
/// Like [`Arena`], a scratch arena is NOT thread-safe. Use one per thread.
///
/// # Example
///
/// ```rust
/// use bumpkit_core::ScratchArena;
///
/// let mut scratch = ScratchArena::default();
/// assert!(!scratch.is_live());
///
/// scratch.allocate(4).unwrap();
/// scratch.allocate(4).unwrap();
/// assert_eq!(scratch.used(), 8);
///
/// // End of frame
/// scratch.clear();
/// assert_eq!(scratch.allocate(4).unwrap().offset(), 0);
/// ```
#[derive(Debug)]
pub struct ScratchArena<M: MemorySource = SystemSource, D: DiagnosticSink = TracingSink> {
    /// The wrapped arena, unbacked while dormant.
    arena: Arena<M, D>,
    /// Capacity used when waking.
    wake_capacity: usize,
}

impl ScratchArena {
    /// Creates a dormant scratch arena that will wake with `capacity` bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_parts(capacity, SystemSource, TracingSink)
    }

    /// Creates a dormant scratch arena sized from `config`.
    #[must_use]
    pub fn from_config(config: &ArenaConfig) -> Self {
        Self::new(config.scratch_capacity)
    }
}

impl Default for ScratchArena {
    fn default() -> Self {
        Self::new(DEFAULT_SCRATCH_CAPACITY)
    }
}

impl<M: MemorySource, D: DiagnosticSink> ScratchArena<M, D> {
    /// Creates a dormant scratch arena from explicit parts.
    #[must_use]
    pub fn with_parts(capacity: usize, source: M, sink: D) -> Self {
        Self {
            arena: Arena::unbacked(source, sink),
            wake_capacity: capacity,
        }
    }

    /// Returns true once the arena has woken and holds a buffer.
    #[inline]
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.arena.is_backed()
    }

    /// Returns the capacity the arena wakes with.
    #[inline]
    #[must_use]
    pub const fn wake_capacity(&self) -> usize {
        self.wake_capacity
    }

    /// Returns the current used space in bytes (zero while dormant).
    #[inline]
    #[must_use]
    pub const fn used(&self) -> usize {
        self.arena.used()
    }

    /// Returns the wrapped arena without waking it.
    #[inline]
    #[must_use]
    pub const fn arena(&self) -> &Arena<M, D> {
        &self.arena
    }

    /// Returns the wrapped arena, waking it first if dormant.
    pub fn arena_mut(&mut self) -> &mut Arena<M, D> {
        self.wake();
        &mut self.arena
    }

    /// Allocates `size` bytes, waking the arena first if dormant.
    ///
    /// # Errors
    ///
    /// Same as [`Arena::allocate`]. If waking failed the arena is still
    /// unbacked and the allocation fails with
    /// [`ArenaError::Unbacked`](crate::ArenaError::Unbacked).
    pub fn allocate(&mut self, size: usize) -> ArenaResult<Allocation> {
        self.arena_mut().allocate(size)
    }

    /// Forgets the most recent scratch allocation.
    ///
    /// # Errors
    ///
    /// Same as [`Arena::rollback`].
    pub fn rollback(&mut self) -> ArenaResult<usize> {
        self.arena_mut().rollback()
    }

    /// Resets the scratch arena. Call at every frame boundary.
    pub fn clear(&mut self) {
        self.arena_mut().clear();
    }

    /// Releases the buffer, returning the arena to dormant.
    ///
    /// The next use wakes it again with a fresh buffer.
    pub fn destroy(&mut self) {
        self.arena.destroy();
    }

    /// Returns the bytes behind a live scratch handle.
    ///
    /// # Errors
    ///
    /// Same as [`Arena::bytes`].
    pub fn bytes(&self, allocation: Allocation) -> ArenaResult<&[u8]> {
        self.arena.bytes(allocation)
    }

    /// Returns the bytes behind a live scratch handle, mutably.
    ///
    /// # Errors
    ///
    /// Same as [`Arena::bytes_mut`].
    pub fn bytes_mut(&mut self, allocation: Allocation) -> ArenaResult<&mut [u8]> {
        self.arena.bytes_mut(allocation)
    }

    /// Constructs the buffer if dormant.
    fn wake(&mut self) {
        if !self.arena.is_backed() {
            tracing::trace!(capacity = self.wake_capacity, "scratch arena waking");
            self.arena.rebuild(self.wake_capacity);
        }
    }
}

thread_local! {
    static THREAD_SCRATCH: RefCell<ScratchArena> = RefCell::new(ScratchArena::default());
}

/// Runs `f` with this thread's scratch arena.
///
/// Each thread gets its own dormant arena of [`DEFAULT_SCRATCH_CAPACITY`]
/// bytes, woken on first use. Handles must not leave the closure's thread.
///
/// # Panics
///
/// Panics if called again from inside `f`.
pub fn with_thread_scratch<R>(f: impl FnOnce(&mut ScratchArena) -> R) -> R {
    THREAD_SCRATCH.with(|scratch| f(&mut scratch.borrow_mut()))
}
