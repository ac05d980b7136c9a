//! # Allocation Handles
//!
//! Opaque references into an arena. A handle names its arena, the arena
//! epoch it was issued in and the byte range it covers, so the arena can
//! check bounds and liveness before handing out the bytes.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique arena identifiers.
static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of one constructed arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaId(u64);

impl ArenaId {
    /// Issues the next identifier.
    pub(crate) fn next() -> Self {
        Self(NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identifier value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Handle to the byte range `[offset, offset + len)` of one arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Allocation {
    /// Issuing arena.
    pub(crate) arena: ArenaId,
    /// Arena epoch at issue time.
    pub(crate) epoch: u64,
    /// First byte.
    pub(crate) offset: usize,
    /// Length in bytes.
    pub(crate) len: usize,
}

impl Allocation {
    /// Returns the arena that issued this handle.
    #[inline]
    #[must_use]
    pub const fn arena(&self) -> ArenaId {
        self.arena
    }

    /// Returns the offset of the first byte within the arena buffer.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the length in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true for zero-sized allocations.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the offset one past the last byte.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// A saved cursor position, for multi-level rewinds.
///
/// Markers are opt-in. Plain [`rollback`](crate::Arena::rollback) keeps
/// its single-checkpoint behavior whether or not markers exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Marker {
    /// Issuing arena.
    pub(crate) arena: ArenaId,
    /// Arena epoch at issue time.
    pub(crate) epoch: u64,
    /// Saved cursor.
    pub(crate) cursor: usize,
}

impl Marker {
    /// Returns the saved cursor position.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_ids_unique() {
        let a = ArenaId::next();
        let b = ArenaId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }
}
