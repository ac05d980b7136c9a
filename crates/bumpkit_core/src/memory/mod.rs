//! # Memory Management
//!
//! Fixed-capacity arenas and the scratch arena built on them.
//!
//! ## Design Philosophy
//!
//! Each arena acquires one buffer at construction. After that:
//! - No heap allocations
//! - No per-allocation bookkeeping
//! - Exhaustion is an error, never growth

mod arena;
mod handle;
#[cfg(feature = "scratch")]
mod scratch;
mod shared;

pub use arena::Arena;
pub use handle::{Allocation, ArenaId, Marker};
#[cfg(feature = "scratch")]
pub use scratch::{with_thread_scratch, ScratchArena};
pub use shared::SharedArena;
