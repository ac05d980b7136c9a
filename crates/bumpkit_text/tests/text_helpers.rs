//! Integration tests for text helpers on explicit and scratch arenas.

use bumpkit_core::{Arena, ArenaError, RecordingSink, ScratchArena, SystemSource};
use bumpkit_text::{
    arena_format, copy_into, read_c_str, read_scratch_text, read_text, scratch_copy,
    scratch_format, TextError,
};

#[test]
fn test_copy_hello_is_six_bytes() {
    let mut arena = Arena::new(1024);
    let text = copy_into(&mut arena, "hello").unwrap();

    assert_eq!(text.offset(), 0);
    assert_eq!(text.len(), 6);
    assert_eq!(arena.cursor(), 6);
    assert_eq!(arena.bytes(text).unwrap(), b"hello\0");
}

#[test]
fn test_text_rolls_back_like_any_allocation() {
    let mut arena = Arena::new(64);
    let keep = copy_into(&mut arena, "keep").unwrap();
    copy_into(&mut arena, "drop me").unwrap();

    assert_eq!(arena.rollback().unwrap(), 8);
    assert_eq!(read_text(&arena, keep).unwrap(), "keep");
}

#[test]
fn test_arena_format_returns_buffer() {
    let mut arena = Arena::new(128);
    let a = arena_format!(&mut arena, "[STATIC]: life    = {}", 42).unwrap();
    let b = arena_format!(&mut arena, "{:>5}|{:<3}|", "ab", 7).unwrap();

    assert_eq!(read_text(&arena, a).unwrap(), "[STATIC]: life    = 42");
    assert_eq!(read_text(&arena, b).unwrap(), "   ab|7  |");
    assert_eq!(b.offset(), a.end());
    assert_eq!(read_c_str(&arena, b).unwrap().to_str().unwrap(), "   ab|7  |");
}

// The scratch variant is the one most easily broken by returning nothing
// on the success path.
#[test]
fn test_scratch_format_returns_buffer() {
    let mut scratch = ScratchArena::default();
    let text = bumpkit_text::scratch_format!(&mut scratch, "[TEMP]:   unlucky = {}", 13).unwrap();
    assert_eq!(
        read_scratch_text(&scratch, text).unwrap(),
        "[TEMP]:   unlucky = 13"
    );

    let again = scratch_format(&mut scratch, format_args!("{}{}", 1, 2)).unwrap();
    assert_eq!(scratch.bytes(again).unwrap(), b"12\0");
}

#[test]
fn test_scratch_copy_across_frames() {
    let mut scratch = ScratchArena::new(64);
    for frame in 0..10 {
        let label = scratch_format(&mut scratch, format_args!("frame {frame}")).unwrap();
        let copy = scratch_copy(&mut scratch, "static label").unwrap();

        assert_eq!(label.offset(), 0);
        assert_eq!(
            read_scratch_text(&scratch, label).unwrap(),
            format!("frame {frame}")
        );
        assert_eq!(read_scratch_text(&scratch, copy).unwrap(), "static label");
        scratch.clear();

        assert!(matches!(
            read_scratch_text(&scratch, copy),
            Err(TextError::Arena(ArenaError::StaleHandle))
        ));
    }
}

#[test]
fn test_allocation_failure_propagates_verbatim() {
    let sink = RecordingSink::new();
    let mut arena = Arena::with_parts(8, SystemSource, sink.clone());
    arena.allocate(4).unwrap();

    let err = arena_format!(&mut arena, "{}", "too long").unwrap_err();
    let expected = ArenaError::CapacityExhausted {
        requested: 9,
        cursor: 4,
        capacity: 8,
    };
    assert_eq!(err, TextError::Arena(expected.clone()));
    assert_eq!(sink.reports(), vec![expected]);
    assert_eq!(arena.cursor(), 4);
}
