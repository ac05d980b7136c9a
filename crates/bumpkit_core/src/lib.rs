//! # BUMPKIT Core
//!
//! Fixed-capacity bump arenas for code that allocates a lot and frees
//! everything at once:
//! - Game loops that discard per-frame data
//! - Short-lived batch jobs
//!
//! ## Rules
//!
//! 1. **One buffer per arena** - acquired at construction, never grown
//! 2. **Bump allocation** - an allocation is a cursor increment
//! 3. **One-step undo** - only the most recent allocation can be forgotten
//! 4. **No aborts** - every failure is reported and returned
//!
//! ## Example
//!
//! ```rust
//! use bumpkit_core::{Arena, ScratchArena};
//!
//! let mut arena = Arena::new(1024);
//! let a = arena.allocate(4).unwrap();
//! assert_eq!(a.offset(), 0);
//! assert!(arena.allocate(1024).is_err());
//!
//! // Scratch memory, cleared once per frame
//! let mut scratch = ScratchArena::default();
//! scratch.allocate(64).unwrap();
//! scratch.clear();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod memory;
pub mod source;
pub mod units;

pub use config::{ArenaConfig, ConfigError};
pub use diagnostics::{DiagnosticSink, RecordingSink, SilentSink, TracingSink};
pub use error::{ArenaError, ArenaResult};
#[cfg(feature = "scratch")]
pub use memory::{with_thread_scratch, ScratchArena};
pub use memory::{Allocation, Arena, ArenaId, Marker, SharedArena};
pub use source::{BudgetSource, MemorySource, SystemSource};
pub use units::DEFAULT_SCRATCH_CAPACITY;
#[cfg(feature = "size-helpers")]
pub use units::{gb, kb, mb, GB, KB, MB};
