//! Whole-arena snapshot round trips and short-file edge cases.

mod common;

use common::MockEngine;

use fifth_host::snapshot::{load, save};

#[test]
fn save_then_load_restores_a_byte_identical_arena() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("state.img");
    let original: Vec<u8> = (0..64).map(|i| (i * 7) as u8).collect();

    let mut engine = MockEngine::with_arena(&original);
    save(&engine, &image).unwrap();

    // Scramble, then restore.
    engine.arena.iter_mut().for_each(|b| *b = 0xAA);
    let restored = load(&mut engine, &image).unwrap();

    assert_eq!(restored, original.len());
    assert_eq!(engine.arena, original);
}

#[test]
fn load_from_a_shorter_file_keeps_the_arena_tail() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("short.img");
    std::fs::write(&image, [1u8, 2, 3, 4]).unwrap();

    let mut engine = MockEngine::with_arena(&[9u8; 8]);
    let restored = load(&mut engine, &image).unwrap();

    assert_eq!(restored, 4);
    assert_eq!(engine.arena, vec![1, 2, 3, 4, 9, 9, 9, 9]);
}

#[test]
fn load_reads_at_most_the_arena_length() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("long.img");
    std::fs::write(&image, [5u8; 16]).unwrap();

    let mut engine = MockEngine::with_arena(&[0u8; 4]);
    let restored = load(&mut engine, &image).unwrap();

    assert_eq!(restored, 4);
    assert_eq!(engine.arena, vec![5, 5, 5, 5]);
}

#[test]
fn save_overwrites_an_existing_image() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("old.img");
    std::fs::write(&image, [0xFFu8; 100]).unwrap();

    let engine = MockEngine::with_arena(&[1, 2, 3]);
    save(&engine, &image).unwrap();

    assert_eq!(std::fs::read(&image).unwrap(), vec![1, 2, 3]);
}

#[test]
fn load_of_a_missing_file_is_an_error() {
    let mut engine = MockEngine::with_arena(&[0u8; 4]);
    assert!(load(&mut engine, std::path::Path::new("absent.img")).is_err());
}
