//! # Memory Sources
//!
//! Where an arena's single buffer comes from and where it goes back to.
//!
//! Swap the source to route arena memory through a custom allocator or a
//! budgeted pool. The source is a type parameter of the arena, so the
//! choice is resolved at compile time.

/// Supplies and reclaims arena buffers.
///
/// `acquire` is called once per construction and `release` once per
/// buffer, either from an explicit destroy or when the arena is dropped.
pub trait MemorySource {
    /// Returns a zero-initialized buffer of exactly `capacity` bytes, or
    /// `None` if the memory cannot be supplied.
    fn acquire(&mut self, capacity: usize) -> Option<Box<[u8]>>;

    /// Takes back a buffer previously returned by `acquire`.
    fn release(&mut self, buffer: Box<[u8]>) {
        drop(buffer);
    }
}

/// The global allocator, asked fallibly.
///
/// Uses `try_reserve_exact`, so an oversized request is reported as a
/// construction failure instead of aborting the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemSource;

impl MemorySource for SystemSource {
    fn acquire(&mut self, capacity: usize) -> Option<Box<[u8]>> {
        let mut storage = Vec::new();
        storage.try_reserve_exact(capacity).ok()?;
        storage.resize(capacity, 0u8);
        Some(storage.into_boxed_slice())
    }
}

/// A source with a fixed byte budget shared by every buffer it hands out.
///
/// Released buffers return their bytes to the budget. Useful for capping
/// the total arena footprint of a subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BudgetSource {
    /// Bytes still available.
    remaining: usize,
}

impl BudgetSource {
    /// Creates a source that will hand out at most `budget` bytes at once.
    #[must_use]
    pub const fn new(budget: usize) -> Self {
        Self { remaining: budget }
    }

    /// Returns the bytes still available.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.remaining
    }
}

impl MemorySource for BudgetSource {
    fn acquire(&mut self, capacity: usize) -> Option<Box<[u8]>> {
        if capacity > self.remaining {
            return None;
        }
        let buffer = SystemSource.acquire(capacity)?;
        self.remaining -= capacity;
        Some(buffer)
    }

    fn release(&mut self, buffer: Box<[u8]>) {
        self.remaining = self.remaining.saturating_add(buffer.len());
    }
}
