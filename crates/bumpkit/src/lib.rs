//! # BUMPKIT
//!
//! Fixed-capacity bump arenas, a scratch arena for frame-scoped memory, and
//! text helpers on top of both.
//!
//! ## Crates
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                   bumpkit                    │
//! │                                              │
//! │  ┌────────────────┐    ┌─────────────────┐   │
//! │  │  bumpkit_core  │<───│  bumpkit_text   │   │
//! │  │                │    │  (feature text) │   │
//! │  │  • Arena       │    │  • copy_into    │   │
//! │  │  • Scratch     │    │  • format_into  │   │
//! │  │  • Units       │    │  • read_text    │   │
//! │  └────────────────┘    └─────────────────┘   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - `size-helpers`: `KB`, `MB`, `GB` and `kb()`, `mb()`, `gb()`
//! - `scratch`: [`ScratchArena`] and [`with_thread_scratch`]
//! - `text`: the [`text`] module
//!
//! All three are on by default.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod logging;

pub use bumpkit_core as core;
#[cfg(feature = "text")]
pub use bumpkit_text as text;

pub use bumpkit_core::{
    Allocation, Arena, ArenaConfig, ArenaError, ArenaId, ArenaResult, BudgetSource, ConfigError,
    DiagnosticSink, Marker, MemorySource, RecordingSink, SharedArena, SilentSink, SystemSource,
    TracingSink, DEFAULT_SCRATCH_CAPACITY,
};
#[cfg(feature = "size-helpers")]
pub use bumpkit_core::{gb, kb, mb, GB, KB, MB};
#[cfg(feature = "scratch")]
pub use bumpkit_core::{with_thread_scratch, ScratchArena};
#[cfg(feature = "text")]
pub use bumpkit_text::{arena_format, copy_into, format_into, read_text, TextError};
#[cfg(all(feature = "text", feature = "scratch"))]
pub use bumpkit_text::{scratch_copy, scratch_format};
