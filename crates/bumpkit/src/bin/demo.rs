//! # BUMPKIT Demo
//!
//! Stores one value in a 1 KiB arena and one in the scratch arena, prints
//! both, then releases both buffers.
//!
//! ```bash
//! RUST_LOG=bumpkit_core=debug cargo run --bin bumpkit_demo
//! ```

use std::error::Error;

use bumpkit::logging::init_logging;
use bumpkit::text::read_scratch_text;
use bumpkit::{arena_format, read_text, scratch_format, Arena, ScratchArena, KB};

fn main() {
    if let Err(err) = init_logging("info") {
        eprintln!("logging disabled: {err}");
    }

    if let Err(err) = run() {
        tracing::error!("demo failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    // Static arena
    let mut arena = Arena::new(KB);
    let life = arena.alloc_value(42i32)?;
    let life = arena.read_value::<i32>(life)?;
    tracing::info!("[STATIC]: life    = {life}");

    // Scratch arena
    let mut scratch = ScratchArena::default();
    let unlucky = scratch.arena_mut().alloc_value(13i32)?;
    let unlucky = scratch.arena().read_value::<i32>(unlucky)?;
    tracing::info!("[TEMP]:   unlucky = {unlucky}");

    // Text in both
    let (used, capacity) = (arena.used(), arena.capacity());
    let line = arena_format!(&mut arena, "{used} of {capacity} bytes used")?;
    let text = read_text(&arena, line)?;
    tracing::info!("[STATIC]: {text}");

    let wake_capacity = scratch.wake_capacity();
    let line = scratch_format!(&mut scratch, "woke with {wake_capacity} bytes")?;
    let text = read_scratch_text(&scratch, line)?;
    tracing::info!("[TEMP]:   {text}");

    arena.destroy();
    scratch.destroy();
    Ok(())
}
