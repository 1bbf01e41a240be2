//! End-to-end scenarios across catalog, generator, chunk and board

use std::time::Duration;

use tetrogue::core::{
    oryx_region, BoardConfig, ChunkTemplateGenerator, CollisionVolume, DrawList, GameBoard,
    TileCatalog, TileDefinition, Transform, Vec2,
};
use tetrogue::types::{Direction, TileType, CHUNK_SIZE};

fn wall_floor_pit() -> TileCatalog {
    TileCatalog::new(vec![
        TileDefinition::new(oryx_region(0, 0, 1, 1), TileType::Wall),
        TileDefinition::new(oryx_region(5, 0, 1, 1), TileType::Floor),
        TileDefinition::new(oryx_region(9, 0, 1, 1), TileType::Pit),
    ])
}

#[test]
fn test_three_kind_catalog_seed_42_then_rotate() {
    let catalog = wall_floor_pit();
    let generator = ChunkTemplateGenerator::new(&catalog);
    let mut chunk = generator.generate(42).unwrap();

    let allowed = [TileType::Wall, TileType::Floor, TileType::Pit];
    for y in 0..CHUNK_SIZE {
        for x in 0..CHUNK_SIZE {
            let tile = chunk.get(x, y).unwrap();
            assert!(allowed.contains(&tile.kind()), "({}, {}) is {:?}", x, y, tile.kind());
        }
    }

    let before = chunk.get(0, 3).unwrap().clone();
    chunk.rotate(Direction::Clockwise);
    assert_eq!(chunk.get(0, 0).unwrap(), &before);
}

#[test]
fn test_generate_update_draw_frame() {
    let catalog = TileCatalog::oryx();
    let generator = ChunkTemplateGenerator::new(&catalog);
    let config = BoardConfig {
        width: 3,
        height: 3,
        ..BoardConfig::default()
    };
    let mut board = GameBoard::generate(&config, &generator, 2024).unwrap();

    board.rotate_chunk(1, 1, Direction::Clockwise).unwrap();
    board.rotate_chunk(2, 0, Direction::CounterClockwise).unwrap();
    board.update().unwrap();

    let mut frame = DrawList::new();
    board.draw(&catalog, Duration::from_millis(16), &mut frame).unwrap();
    assert_eq!(frame.len(), 9 * 16);

    // Every request lands on exactly one tile-grid cell, and every cell is hit once.
    let layout = board.layout();
    let mut hits = vec![0u32; layout.columns() * layout.rows()];
    for request in frame.requests() {
        let (column, row) = layout.screen_cell(request.transform.position).unwrap();
        hits[row * layout.columns() + column] += 1;
    }
    assert!(hits.iter().all(|&h| h == 1));
}

#[test]
fn test_probe_finds_solid_tiles_only() {
    let catalog = TileCatalog::oryx();
    let generator = ChunkTemplateGenerator::new(&catalog);
    let board = GameBoard::generate(&BoardConfig::default(), &generator, 31).unwrap();

    for row in 0..board.tile_rows() {
        for column in 0..board.tile_columns() {
            let tile = board.tile_at(column, row).unwrap();
            let mut probe = CollisionVolume::rect(4.0, 4.0);
            probe.transform(&Transform::at(tile.transform().position + Vec2::new(12.0, -12.0)));
            let hits = board.overlapping(&probe);
            if tile.kind().collides_by_default() {
                assert_eq!(hits, vec![(column, row)]);
            } else {
                assert!(hits.is_empty());
            }
        }
    }
}

#[test]
fn test_catalog_json_round_trips_through_a_board() {
    let json = r#"[
        { "kind": "wall", "region": [0, 0, 24, 24] },
        { "kind": "rock", "region": [72, 0, 24, 24], "collides": false },
        { "kind": "floor", "region": [120, 0, 24, 24] },
        { "kind": "threshold", "region": [288, 0, 24, 24] },
        { "kind": "pit", "region": [216, 0, 24, 24], "collides": true }
    ]"#;
    let catalog = TileCatalog::from_json_str(json).unwrap();
    let generator = ChunkTemplateGenerator::new(&catalog);
    let board = GameBoard::generate(&BoardConfig::default(), &generator, 8).unwrap();
    let snapshot = board.snapshot().unwrap();

    let pits = snapshot.count(TileType::Pit);
    let colliding = (0..board.tile_rows())
        .flat_map(|row| (0..board.tile_columns()).map(move |column| (column, row)))
        .filter(|&(column, row)| board.tile_at(column, row).unwrap().has_collider())
        .count();
    assert_eq!(colliding, snapshot.count(TileType::Wall) + pits);
}
