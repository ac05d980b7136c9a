//! # Size Units
//!
//! Capacity multipliers for sizing arenas.
//!
//! The multipliers and the `kb`/`mb`/`gb` helpers are compiled only with
//! the `size-helpers` feature. [`DEFAULT_SCRATCH_CAPACITY`] is always present.

// =============================================================================
// DEFAULTS
// =============================================================================

/// Capacity of a scratch arena when no override is configured (1 MiB).
pub const DEFAULT_SCRATCH_CAPACITY: usize = 1024 * 1024;

// =============================================================================
// MULTIPLIERS
// =============================================================================

/// One kibibyte.
#[cfg(feature = "size-helpers")]
pub const KB: usize = 1024;

/// One mebibyte.
#[cfg(feature = "size-helpers")]
pub const MB: usize = 1024 * KB;

/// One gibibyte.
#[cfg(feature = "size-helpers")]
pub const GB: usize = 1024 * MB;

/// `n` kibibytes, saturating at `usize::MAX`.
#[cfg(feature = "size-helpers")]
#[inline]
#[must_use]
pub const fn kb(n: usize) -> usize {
    n.saturating_mul(KB)
}

/// `n` mebibytes, saturating at `usize::MAX`.
#[cfg(feature = "size-helpers")]
#[inline]
#[must_use]
pub const fn mb(n: usize) -> usize {
    n.saturating_mul(MB)
}

/// `n` gibibytes, saturating at `usize::MAX`.
#[cfg(feature = "size-helpers")]
#[inline]
#[must_use]
pub const fn gb(n: usize) -> usize {
    n.saturating_mul(GB)
}
