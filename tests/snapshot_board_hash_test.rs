use tetrogue::core::{BoardConfig, ChunkTemplateGenerator, GameBoard, TileCatalog};
use tetrogue::types::{Direction, Rotation};

fn fnv1a64_bytes(bytes: impl Iterator<Item = u8>) -> u64 {
    // FNV-1a 64-bit.
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

fn board(seed: u64) -> GameBoard {
    let catalog = TileCatalog::oryx();
    GameBoard::generate(&BoardConfig::default(), &ChunkTemplateGenerator::new(&catalog), seed).unwrap()
}

#[test]
fn snapshot_hash_covers_dimensions_kinds_and_rotations() {
    let snap = board(1).snapshot().unwrap();

    let bytes = (snap.columns as u32)
        .to_le_bytes()
        .into_iter()
        .chain((snap.rows as u32).to_le_bytes())
        .chain(snap.kinds.iter().map(|k| k.code()))
        .chain(snap.rotations.iter().map(|r| r.quarter_turns()));
    assert_eq!(snap.hash, fnv1a64_bytes(bytes));
    assert!(snap.rotations.iter().all(|&r| r == Rotation::North));
}

#[test]
fn snapshot_hash_is_reproducible_per_seed() {
    assert_eq!(board(5).snapshot().unwrap().hash, board(5).snapshot().unwrap().hash);
    assert_ne!(board(5).snapshot().unwrap().hash, board(6).snapshot().unwrap().hash);
}

#[test]
fn snapshot_hash_changes_when_a_chunk_rotates() {
    let mut b = board(9);
    let before = b.snapshot().unwrap();
    b.rotate_chunk(0, 0, Direction::Clockwise).unwrap();
    let after = b.snapshot().unwrap();
    assert_ne!(before.hash, after.hash);
    assert_eq!(after.rotations[0], Rotation::East);
}
