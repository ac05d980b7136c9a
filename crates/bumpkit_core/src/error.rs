//! # Arena Error Types
//!
//! All errors that can occur while allocating from or reading out of an arena.

use thiserror::Error;

/// Errors that can occur in arena operations.
///
/// The first three variants are the failures an arena reports to its
/// [`DiagnosticSink`](crate::DiagnosticSink). The rest are raised when a
/// handle does not fit the arena it is presented to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// The requested allocation does not fit in the remaining bytes.
    #[error("arena unable to allocate {requested} bytes: cursor {cursor}, capacity {capacity}")]
    CapacityExhausted {
        /// Bytes requested.
        requested: usize,
        /// Cursor at the time of the request.
        cursor: usize,
        /// Total capacity of the arena.
        capacity: usize,
    },

    /// The checkpoint sits past the cursor, so the last allocation cannot be forgotten.
    #[error("cannot roll back last allocation: checkpoint {checkpoint} is past cursor {cursor}")]
    InvalidRollback {
        /// Recorded checkpoint.
        checkpoint: usize,
        /// Current cursor.
        cursor: usize,
    },

    /// The memory source could not supply the requested capacity.
    #[error("memory source could not supply {capacity} bytes")]
    ConstructionFailed {
        /// Capacity that was requested.
        capacity: usize,
    },

    /// The handle was issued by a different arena.
    #[error("handle belongs to another arena")]
    ForeignHandle,

    /// The handle was invalidated by a clear, destroy, rollback or rewind.
    #[error("handle no longer refers to live arena memory")]
    StaleHandle,

    /// The arena has no backing buffer (failed construction or destroyed).
    #[error("arena has no backing buffer")]
    Unbacked,

    /// A typed read was attempted through a handle of the wrong length.
    #[error("allocation is {actual} bytes, expected {expected}")]
    SizeMismatch {
        /// Size of the requested type.
        expected: usize,
        /// Length of the allocation.
        actual: usize,
    },
}

/// Result type for arena operations.
pub type ArenaResult<T> = Result<T, ArenaError>;
